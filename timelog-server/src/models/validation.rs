//! Validation error types

use std::fmt;

/// Validation error for request input
///
/// Display strings are shown to callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is absent, empty, or blank
    Required { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Field is present but unusable
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Body is not the expected JSON document
    MalformedBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { field } => write!(f, "{} is required", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{} {}", field, reason),
            // Parser detail stays in the logs
            Self::MalformedBody { .. } => f.write_str("Invalid request body"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "Name",
            max: 256,
        };
        assert_eq!(
            err.to_string(),
            "Name exceeds maximum length of 256 characters"
        );

        let err = ValidationError::Required { field: "User ID" };
        assert_eq!(err.to_string(), "User ID is required");
    }

    #[test]
    fn malformed_body_hides_parser_detail() {
        let err = ValidationError::MalformedBody {
            reason: "expected value at line 1 column 1".into(),
        };
        assert_eq!(err.to_string(), "Invalid request body");
    }
}
