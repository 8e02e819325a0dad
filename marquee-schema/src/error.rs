//! Error types for input validation.

use miette::Diagnostic;
use serde::Serialize;
use smol_str::SmolStr;
use thiserror::Error;

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationFailed>;

/// One field-level validation failure.
///
/// The boundary layer serializes these straight into a 400 response body;
/// messages are worded for the API client, not the operator.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq, Serialize)]
#[error("{field}: {message}")]
#[diagnostic(code(marquee::schema::field_error))]
pub struct FieldError {
    /// Name of the input field that failed.
    pub field: SmolStr,
    /// Client-facing message.
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(field: impl Into<SmolStr>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation failed with one or more field errors.
///
/// Always carries the complete list: the pipeline never short-circuits on the
/// first failing field, so the client gets one full report per round trip.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[error("validation failed with {count} error(s)")]
#[diagnostic(code(marquee::schema::validation_failed))]
pub struct ValidationFailed {
    /// Number of field errors.
    pub count: usize,
    /// Every field-level failure, in schema order.
    #[related]
    pub errors: Vec<FieldError>,
}

impl ValidationFailed {
    /// Create a failure from a non-empty error list.
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self {
            count: errors.len(),
            errors,
        }
    }

    /// Just the messages, the shape the HTTP layer puts in a 400 body.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }
}
