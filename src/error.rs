use std::io;
use thiserror::Error;

/// Custom result type alias for the application
pub type Result<T> = std::result::Result<T, DelegatorError>;

/// Errors that can occur while delegating tasks
#[derive(Debug, Error)]
pub enum DelegatorError {
    /// I/O errors
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing/serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Task-source API errors (non-2xx responses)
    #[error("API error: {0}")]
    Api(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// General message errors
    #[error("{0}")]
    Message(String),
}

impl DelegatorError {
    /// Creates a new error with the specified message
    pub fn new(message: &str) -> Self {
        Self::Message(message.to_string())
    }

    /// Checks if this error is transient (a remote-call failure that a
    /// later cycle may not see again)
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api(_) | Self::IO(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = DelegatorError::new("test error");
        assert!(matches!(error, DelegatorError::Message(_)));

        if let DelegatorError::Message(msg) = error {
            assert_eq!(msg, "test error");
        }
    }

    #[test]
    fn test_is_transient() {
        let transient = DelegatorError::Api("HTTP 503".into());
        let fatal = DelegatorError::Config("missing api_url".into());

        assert!(transient.is_transient());
        assert!(!fatal.is_transient());
    }
}
