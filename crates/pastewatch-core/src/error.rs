//! Core error types for pastewatch.
//!
//! This module defines the central error type used across all subsystems.
//! Each subsystem error is represented as a variant for clear error propagation.

use thiserror::Error;

/// Central error type for all pastewatch operations.
///
/// Each variant represents an error from a specific subsystem, allowing
/// for clear error propagation and handling across module boundaries.
#[derive(Error, Debug)]
pub enum PastewatchError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pattern compilation errors
    #[error("pattern error: {0}")]
    Pattern(String),

    /// Frontier discovery errors (landing page structure)
    #[error("discovery error: {0}")]
    Discovery(String),

    /// Network errors (HTTP requests, DNS, decoding)
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Aggregate store errors
    #[error("store error: {0}")]
    Store(String),

    /// Snapshot persistence errors
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `PastewatchError`.
pub type Result<T> = std::result::Result<T, PastewatchError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PastewatchError::Validation("empty paste id".to_string());
        assert_eq!(err.to_string(), "validation error: empty paste id");

        let err = ConfigError::NoConfigDir;
        assert_eq!(
            err.to_string(),
            "could not determine config directory (XDG base directories not available)"
        );
    }

    #[test]
    fn test_error_from_config() {
        let config_err = ConfigError::NoConfigDir;
        let core_err: PastewatchError = config_err.into();
        assert!(matches!(core_err, PastewatchError::Config(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let core_err: PastewatchError = io_err.into();
        assert!(matches!(core_err, PastewatchError::Io(_)));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            field: "polling.idle_sleep_secs".to_string(),
            reason: "must be greater than active_sleep_secs".to_string(),
        };
        assert!(err.to_string().contains("polling.idle_sleep_secs"));
    }
}
