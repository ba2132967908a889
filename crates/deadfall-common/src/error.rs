//! Error types for Deadfall.

use thiserror::Error;

/// Top-level error type for Deadfall operations.
#[derive(Debug, Error)]
pub enum DeadfallError {
    /// Config file could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Deadfall operations.
pub type DeadfallResult<T> = Result<T, DeadfallError>;
