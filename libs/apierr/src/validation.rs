//! Per-field validation errors for 422 responses

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{ApiError, ApiResult};

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// A single invalid input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[cfg_attr(feature = "utoipa", schema(title = "ValidationError"))]
#[must_use]
pub struct ValidationError {
    /// field path, e.g. "email" or "user.email"
    pub field: String,
    /// Why the value is invalid
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation errors in the order they were found.
///
/// Serializes as `{ "errors": [ { "field": ..., "message": ... }, ... ] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[cfg_attr(feature = "utoipa", schema(title = "ValidationErrors"))]
#[must_use]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationError::new(field, message));
    }

    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.push(field, message);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// A `validation_failed` error carrying these errors as meta.
    pub fn into_error(self) -> ApiError {
        ApiError::validation_failed().with_meta(self)
    }

    /// `Ok(())` when nothing failed, otherwise raises [`Self::into_error`].
    ///
    /// # Errors
    /// Returns the `validation_failed` error if any field was rejected.
    pub fn into_result(self) -> ApiResult {
        if self.is_empty() {
            return Ok(());
        }
        self.into_error().send()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<F, M> FromIterator<(F, M)> for ValidationErrors
where
    F: Into<String>,
    M: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, M)>>(iter: I) -> Self {
        Self {
            errors: iter
                .into_iter()
                .map(|(field, message)| ValidationError::new(field, message))
                .collect(),
        }
    }
}

impl From<ValidationErrors> for Value {
    fn from(v: ValidationErrors) -> Self {
        let errors: Vec<Value> = v
            .errors
            .into_iter()
            .map(|e| json!({ "field": e.field, "message": e.message }))
            .collect();
        json!({ "errors": errors })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn keeps_validation_order() {
        let errors: ValidationErrors = [("email", "required"), ("age", "must be positive")]
            .into_iter()
            .collect();

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            json!({
                "errors": [
                    { "field": "email", "message": "required" },
                    { "field": "age", "message": "must be positive" }
                ]
            })
        );
    }

    #[test]
    fn value_conversion_matches_serde() {
        let errors = ValidationErrors::new()
            .with("name", "too long")
            .with("name", "contains digits");

        let via_serde = serde_json::to_value(&errors).unwrap();
        assert_eq!(Value::from(errors), via_serde);
    }

    #[test]
    fn into_error_attaches_meta() {
        let mut errors = ValidationErrors::new();
        errors.push("email", "required");

        let err = errors.clone().into_error();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.id(), "validation_failed");
        assert_eq!(err.meta(), Some(&Value::from(errors)));
    }

    #[test]
    fn into_result_is_ok_when_empty() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let err = ValidationErrors::new()
            .with("age", "must be positive")
            .into_result()
            .unwrap_err();
        assert_eq!(err.id(), "validation_failed");
    }

    #[test]
    fn iterates_in_order() {
        let errors = ValidationErrors::new().with("a", "1").with("b", "2");
        assert_eq!(errors.len(), 2);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["a", "b"]);
        assert_eq!((&errors).into_iter().count(), 2);
    }
}
