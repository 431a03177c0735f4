/// Error types shared between the persistence and validation layers
///
/// The API crate maps these onto HTTP responses; nothing here knows about
/// status codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failure reported by a [`UserRepository`](crate::repository::UserRepository)
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing database rejected or failed the operation
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A single validation failure, attached to a field when one applies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation (`non_field_errors` for body-level problems)
    pub field: String,

    /// Human-readable error message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Input rejected by a [`UserValidator`](crate::validation::UserValidator)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {} error(s)", .errors.len())]
pub struct InvalidInput {
    pub errors: Vec<FieldError>,
}

impl InvalidInput {
    /// Builds an error for a problem with the body as a whole
    pub fn non_field(message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(NON_FIELD_ERRORS, message)],
        }
    }
}

/// Field name used for errors that are not tied to a single field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";
