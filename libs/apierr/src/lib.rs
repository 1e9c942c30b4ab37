//! Structured API errors for HTTP services
//!
//! This crate provides the error value handlers raise when a request fails:
//! - `ApiError`: client-facing body, optional `meta`, HTTP status, internal
//!   `context` and reporting flags
//! - Canonical templates (`catalog`) for 500, 403, 401, 404, 400 and 422
//! - `ValidationErrors` for per-field 422 payloads
//! - Reporting through `tracing` (`ApiError::log`)
//!
//! ```
//! use apierr::{ApiError, ApiResult};
//!
//! fn find_user(id: u64) -> ApiResult<String> {
//!     if id != 1 {
//!         return ApiError::not_found()
//!             .with_context(serde_json::json!({ "user_id": id }))
//!             .send();
//!     }
//!     Ok("root".to_owned())
//! }
//!
//! let err = find_user(7).unwrap_err();
//! assert_eq!(err.id(), "not_found");
//! assert_eq!(err.status().as_u16(), 404);
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod error;
pub mod report;
pub mod validation;

pub use catalog::ErrDef;
pub use error::{ApiError, ApiResult, ErrorBody, ErrorPayload, MetaError};
pub use validation::{ValidationError, ValidationErrors};
