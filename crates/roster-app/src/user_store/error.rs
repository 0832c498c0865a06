//! Error types for the user store.

use roster_framework::form::FieldErrors;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    /// The record failed validation; one message per offending field.
    #[error("User validation failed: {}", summarize(.0))]
    Validation(FieldErrors),

    /// An error occurred while communicating with the store.
    #[error("Store communication error: {0}")]
    Store(String),
}

impl UserError {
    /// The per-field messages, if this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            UserError::Validation(errors) => Some(errors),
            UserError::Store(_) => None,
        }
    }
}

fn summarize(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}
