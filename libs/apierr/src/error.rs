//! The API error value (pure data model, HTTP framework integration behind features)

use std::backtrace::Backtrace;
use std::fmt;
use std::sync::Arc;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::catalog::INTERNAL_SERVER_ERROR;

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// Standard result type for handlers that fail with an [`ApiError`].
///
/// ```ignore
/// async fn handler() -> ApiResult<Json<User>> {
///     let user = repo.find(id).await?.ok_or_else(ApiError::not_found)?;
///     Ok(Json(user))
/// }
/// ```
pub type ApiResult<T = ()> = Result<T, ApiError>;

/// Client-facing part of an error: a stable identifier and a readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[cfg_attr(feature = "utoipa", schema(title = "ErrorBody"))]
pub struct ErrorBody {
    /// Machine-readable identifier, e.g. `not_found`
    pub id: String,
    /// Human-readable description
    pub message: String,
}

impl ErrorBody {
    /// Body with both fields non-empty.
    ///
    /// An empty id falls back to the internal server error body; an empty
    /// message falls back to the status reason phrase.
    fn checked(status: StatusCode, id: String, message: String) -> Self {
        if id.is_empty() {
            return Self {
                id: INTERNAL_SERVER_ERROR.id.to_owned(),
                message: INTERNAL_SERVER_ERROR.message.to_owned(),
            };
        }
        let message = if message.is_empty() {
            status
                .canonical_reason()
                .unwrap_or(INTERNAL_SERVER_ERROR.message)
                .to_owned()
        } else {
            message
        };
        Self { id, message }
    }
}

/// Failure to turn a typed value into a `meta` or `context` document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MetaError {
    #[error("failed to encode error meta: {0}")]
    Meta(#[source] serde_json::Error),

    #[error("failed to encode error context: {0}")]
    Context(#[source] serde_json::Error),
}

/// Exact shape sent to clients.
///
/// ```json
/// { "error": { "id": "not_found", "message": "..." }, "meta": { ... } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[cfg_attr(feature = "utoipa", schema(title = "ErrorPayload"))]
pub struct ErrorPayload {
    pub error: ErrorBody,
    /// Supplementary data for the client, omitted when not set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "utoipa", schema(value_type = Option<Object>))]
    pub meta: Option<Value>,
}

/// An API-facing error.
///
/// Serializes to the client payload only: `body` under `error` and `meta`
/// when present. Status, context, reporting flags and the captured trace are
/// never serialized.
///
/// Builder methods consume the value and return it, so every request owns its
/// own copy. Start from a catalog template (`ApiError::not_found()`,
/// `catalog::NOT_FOUND.to_error()`) or from [`ApiError::new`].
#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct ApiError {
    #[serde(rename = "error")]
    body: ErrorBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<Value>,
    #[serde(skip)]
    status: StatusCode,
    #[serde(skip)]
    context: Option<Value>,
    #[serde(skip)]
    should_report: bool,
    #[serde(skip)]
    has_trace: bool,
    #[serde(skip)]
    trace: Option<Arc<Backtrace>>,
}

/// `Null` documents are treated as "not set" so they never reach the payload.
fn non_null(value: Value) -> Option<Value> {
    if value.is_null() { None } else { Some(value) }
}

impl ApiError {
    /// Create an error that is neither reported nor traced.
    ///
    /// Empty `id` or `message` are replaced, see [`ErrorBody`] fallbacks:
    /// clients never receive an empty field.
    pub fn new(status: StatusCode, id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            body: ErrorBody::checked(status, id.into(), message.into()),
            meta: None,
            status,
            context: None,
            should_report: false,
            has_trace: false,
            trace: None,
        }
    }

    /// Replace the client message, keeping the identifier.
    /// An empty message keeps the current one.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        if !message.is_empty() {
            self.body.message = message;
        }
        self
    }

    /// Attach internal diagnostics. Only ever logged.
    pub fn with_context(mut self, context: impl Into<Value>) -> Self {
        self.context = non_null(context.into());
        self
    }

    /// Attach any serializable value as internal diagnostics.
    ///
    /// # Errors
    /// Returns [`MetaError::Context`] if the value cannot be encoded as JSON.
    pub fn try_with_context<T: Serialize + ?Sized>(
        mut self,
        context: &T,
    ) -> Result<Self, MetaError> {
        let context = serde_json::to_value(context).map_err(MetaError::Context)?;
        self.context = non_null(context);
        Ok(self)
    }

    /// Attach supplementary data returned to the client. The last call wins.
    pub fn with_meta(mut self, meta: impl Into<Value>) -> Self {
        self.meta = non_null(meta.into());
        self
    }

    /// Attach any serializable value as client meta.
    ///
    /// # Errors
    /// Returns [`MetaError::Meta`] if the value cannot be encoded as JSON.
    pub fn try_with_meta<T: Serialize + ?Sized>(mut self, meta: &T) -> Result<Self, MetaError> {
        self.meta = non_null(serde_json::to_value(meta).map_err(MetaError::Meta)?);
        Ok(self)
    }

    /// Ask for a stack trace; it is captured here, where the error is built.
    pub fn with_trace(mut self) -> Self {
        self.has_trace = true;
        self.capture_trace();
        self
    }

    fn capture_trace(&mut self) {
        if self.trace.is_none() {
            self.trace = Some(Arc::new(Backtrace::force_capture()));
        }
    }

    /// Mark the error for the logs.
    pub fn report(mut self) -> Self {
        self.should_report = true;
        self
    }

    /// Raise the error: returns it as the failure of the current operation.
    ///
    /// Use as `return err.send();` or `err.send()?`. A trace captured earlier
    /// is kept; otherwise one is captured here when the error asks for one.
    ///
    /// # Errors
    /// Always returns `Err(self)`.
    pub fn send<T>(mut self) -> ApiResult<T> {
        if self.has_trace {
            self.capture_trace();
        }
        tracing::debug!(
            error.id = %self.body.id,
            http.status = self.status.as_u16(),
            "api error raised"
        );
        Err(self)
    }

    #[must_use]
    pub fn wants_to_be_reported(&self) -> bool {
        self.should_report
    }

    #[must_use]
    pub fn wants_to_show_trace(&self) -> bool {
        self.has_trace
    }

    #[must_use]
    pub fn body(&self) -> &ErrorBody {
        &self.body
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.body.id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.body.message
    }

    /// HTTP status the response should carry.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    #[must_use]
    pub fn context(&self) -> Option<&Value> {
        self.context.as_ref()
    }

    /// Stack trace captured by [`ApiError::with_trace`] or [`ApiError::send`].
    #[must_use]
    pub fn trace(&self) -> Option<&Backtrace> {
        self.trace.as_deref()
    }

    /// Client payload for this error.
    #[must_use]
    pub fn payload(&self) -> ErrorPayload {
        ErrorPayload {
            error: self.body.clone(),
            meta: self.meta.clone(),
        }
    }

    #[must_use]
    pub fn into_payload(self) -> ErrorPayload {
        ErrorPayload {
            error: self.body,
            meta: self.meta,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body.message)
    }
}

impl std::error::Error for ApiError {}

/// Axum integration: report the error, then render status and payload
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        self.log();
        let status = self.status;
        let mut resp = axum::Json(self.into_payload()).into_response();
        *resp.status_mut() = status;
        resp
    }
}
