//! Error types for artwalk.

use thiserror::Error;

/// Errors that can occur in artwalk operations.
#[derive(Error, Debug)]
pub enum ArtwalkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{kind} date not available for '{event}'")]
    MissingDate { event: String, kind: &'static str },

    #[error("Data source '{0}' is read-only")]
    ReadOnlySource(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<reqwest::Error> for ArtwalkError {
    fn from(e: reqwest::Error) -> Self {
        ArtwalkError::Http(e.to_string())
    }
}

/// Result type alias for artwalk operations.
pub type ArtwalkResult<T> = Result<T, ArtwalkError>;
