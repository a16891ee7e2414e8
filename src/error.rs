//! Error types for pomodo.

use thiserror::Error;

/// Errors that can occur while running pomodo.
#[derive(Debug, Error)]
pub enum PomodoError {
    /// A constructor argument or configuration value was out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration file handling failed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal setup or event handling failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// JSON serialization failed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
