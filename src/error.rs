//! Error types for the selection store
//!
//! Store mutations are total and never fail. Errors only arise at the
//! edges: loading configuration and hydrating state from serialized
//! snapshots.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type encompassing all error categories
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// State snapshot errors
    #[error(transparent)]
    State(#[from] StateError),

    /// Generic unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Configuration related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the configuration file
    #[error("Could not read configuration: {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing configuration
    #[error("Invalid configuration format in {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    /// Invalid configuration value
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// Configuration directory error
    #[error("Could not access configuration directory")]
    DirectoryError,
}

/// Errors raised while restoring store state from a snapshot
#[derive(Error, Debug)]
pub enum StateError {
    /// Snapshot could not be decoded
    #[error("Invalid state snapshot: {0}")]
    InvalidSnapshot(#[from] serde_json::Error),
}

/// Result type alias for operations that can fail with AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for snapshot operations
pub type StateResult<T> = Result<T, StateError>;

impl ConfigError {
    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::ReadError { .. } => {
                "The configuration file could not be read. Check that it exists and is readable."
                    .to_string()
            }
            ConfigError::ParseError { .. } => {
                "The configuration file is not valid JSON. Defaults can be restored by deleting it."
                    .to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("/test/store.json"),
            reason: "expected value".to_string(),
        };
        assert!(err.to_string().contains("/test/store.json"));
    }

    #[test]
    fn test_config_error_user_message() {
        let err = ConfigError::ReadError {
            path: PathBuf::from("/test/store.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.user_message().contains("could not be read"));

        let err = ConfigError::InvalidValue {
            key: "store_id".to_string(),
            reason: "must not be empty".to_string(),
        };
        assert_eq!(err.user_message(), err.to_string());
    }

    #[test]
    fn test_app_error_from_state_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app_err: AppError = StateError::from(json_err).into();
        assert!(matches!(app_err, AppError::State(_)));
    }
}
