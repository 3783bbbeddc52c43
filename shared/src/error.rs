//! Error types for the booking Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the booking Lambda functions.
#[derive(Error, Debug)]
pub enum Error {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Calendar integration error
    #[error("Calendar error: {0}")]
    Calendar(String),

    /// Email integration error
    #[error("Email error: {0}")]
    Email(String),

    /// Outbound HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_validation_maps_to_client_error() {
        assert_eq!(Error::Validation("missing".to_string()).status_code(), 400);
        assert_eq!(Error::Calendar("down".to_string()).status_code(), 500);
        assert_eq!(Error::Email("down".to_string()).status_code(), 500);
        assert_eq!(Error::Internal("bug".to_string()).status_code(), 500);
    }
}
