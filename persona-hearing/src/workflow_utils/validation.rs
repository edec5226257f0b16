//! Field-level validation errors for structured agent output

use thiserror::Error;

/// A rule violated by a single field of a structured output
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },

    #[error("{field} must not be empty")]
    Empty { field: String },
}

impl ValidationError {
    pub fn out_of_range(
        field: &'static str,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        Self::OutOfRange {
            field,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            Self::OutOfRange { field, .. } => *field,
            Self::Empty { field } => field.as_str(),
        }
    }
}

/// Reject strings that are empty or whitespace only
pub fn require_non_empty(field: impl Into<String>, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty {
            field: field.into(),
        });
    }
    Ok(())
}
