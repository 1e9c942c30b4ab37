//! Canonical error templates
//!
//! Templates are `const` data. Each use produces a fresh [`ApiError`], so
//! annotating an error for one request never leaks into another.

use crate::error::ApiError;
use http::StatusCode;

/// Static error definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrDef {
    pub status: u16,
    pub id: &'static str,
    pub message: &'static str,
    /// Errors built from this definition want to be reported
    pub report: bool,
    /// Errors built from this definition want a stack trace
    pub trace: bool,
}

impl ErrDef {
    /// A quiet definition: not reported, no trace.
    #[must_use]
    pub const fn new(status: u16, id: &'static str, message: &'static str) -> Self {
        Self {
            status,
            id,
            message,
            report: false,
            trace: false,
        }
    }

    /// Same definition, reported with a stack trace.
    #[must_use]
    pub const fn reported_with_trace(self) -> Self {
        Self {
            report: true,
            trace: true,
            ..self
        }
    }

    /// Build a fresh error from this definition
    pub fn to_error(&self) -> ApiError {
        // Invalid codes fall back to INTERNAL_SERVER_ERROR
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut err = ApiError::new(status, self.id, self.message);
        if self.report {
            err = err.report();
        }
        if self.trace {
            err = err.with_trace();
        }
        err
    }
}

impl From<ErrDef> for ApiError {
    fn from(def: ErrDef) -> Self {
        def.to_error()
    }
}

pub const INTERNAL_SERVER_ERROR: ErrDef = ErrDef::new(
    500,
    "internal_server_error",
    "The server encountered an internal error or misconfiguration and was unable to complete your request.",
)
.reported_with_trace();

pub const FORBIDDEN: ErrDef = ErrDef::new(
    403,
    "forbidden",
    "You don't have permissions to perform this request.",
);

pub const UNAUTHORIZED: ErrDef =
    ErrDef::new(401, "invalid_credentials", "Sent credentials are invalid.");

pub const NOT_FOUND: ErrDef = ErrDef::new(404, "not_found", "Requested object not found.");

pub const BAD_REQUEST: ErrDef = ErrDef::new(
    400,
    "bad_request",
    "The server cannot process the request due to its malformed syntax.",
);

pub const VALIDATION_FAILED: ErrDef = ErrDef::new(422, "validation_failed", "Validation failed.");

/// Every canonical definition
pub const CANONICAL: [ErrDef; 6] = [
    INTERNAL_SERVER_ERROR,
    FORBIDDEN,
    UNAUTHORIZED,
    NOT_FOUND,
    BAD_REQUEST,
    VALIDATION_FAILED,
];

impl ApiError {
    /// 500, reported with a trace.
    pub fn internal_server_error() -> Self {
        INTERNAL_SERVER_ERROR.to_error()
    }

    /// 403
    pub fn forbidden() -> Self {
        FORBIDDEN.to_error()
    }

    /// 401 with id `invalid_credentials`
    pub fn unauthorized() -> Self {
        UNAUTHORIZED.to_error()
    }

    /// 404
    pub fn not_found() -> Self {
        NOT_FOUND.to_error()
    }

    /// 400
    pub fn bad_request() -> Self {
        BAD_REQUEST.to_error()
    }

    /// 422, usually carrying [`crate::ValidationErrors`] as meta
    pub fn validation_failed() -> Self {
        VALIDATION_FAILED.to_error()
    }
}
