//! Custom error types for projector-proxy
//!
//! This module provides a unified error type used throughout the crate,
//! plus a crate-wide `Result` alias.

use thiserror::Error;

/// Main error type for projector-proxy operations
#[derive(Error, Debug)]
pub enum ProxyError {
    /// An executable, home directory, or icon could not be located
    #[error("{entity} not found: {name}")]
    NotFound {
        entity: &'static str,
        name: String,
    },

    /// Validation errors (malformed IDE identifier or title)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The projector launcher ran but did not succeed
    #[error("projector launcher failed ({status}): {output}")]
    Launcher { status: String, output: String },

    /// IO-related errors (launcher spawn failure, icon materialization)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProxyError {
    /// Create a not found error
    pub fn not_found(entity: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            name: name.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a launcher execution error
    pub fn launcher(status: impl Into<String>, output: impl Into<String>) -> Self {
        Self::Launcher {
            status: status.into(),
            output: output.into(),
        }
    }

    /// True for the errors the registration loop is allowed to swallow
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convert ProxyError to String for host frameworks that surface plain strings
impl From<ProxyError> for String {
    fn from(err: ProxyError) -> Self {
        err.to_string()
    }
}

/// Result type alias using ProxyError
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ProxyError::not_found("IDE executable", "clion");
        assert_eq!(err.to_string(), "IDE executable not found: clion");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_error() {
        let err = ProxyError::validation("ide id cannot be empty");
        assert_eq!(err.to_string(), "Validation error: ide id cannot be empty");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_launcher_error() {
        let err = ProxyError::launcher("exit status: 1", "no such config");
        assert_eq!(
            err.to_string(),
            "projector launcher failed (exit status: 1): no such config"
        );
    }

    #[test]
    fn test_error_to_string_conversion() {
        let err = ProxyError::not_found("icon", "webstorm");
        let s: String = err.into();
        assert_eq!(s, "icon not found: webstorm");
    }
}
