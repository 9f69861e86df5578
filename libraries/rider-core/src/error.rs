/// Core error types for Easy Rider
use thiserror::Error;

/// Result type alias using `RiderError`
pub type Result<T> = std::result::Result<T, RiderError>;

/// Core error type for Easy Rider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RiderError {
    /// A date string that is not in wire format
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// An integer that is not one of the known roles
    #[error("Invalid role: {0}")]
    InvalidRole(i64),

    /// A form field failed validation
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RiderError {
    /// Create a validation error for a form field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            RiderError::validation("email", "is required").to_string(),
            "email: is required"
        );
        assert_eq!(
            RiderError::invalid_input("unknown role 'x'").to_string(),
            "Invalid input: unknown role 'x'"
        );
        assert_eq!(RiderError::InvalidRole(3).to_string(), "Invalid role: 3");
    }
}
