//! Common error types for the settings library

use thiserror::Error;

use crate::validator::Rejection;

/// Common result type for settings operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by the settings library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rules file could not be parsed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Form snapshot or sub-document (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Trigger annotated with a category no builder handles
    #[error("Unknown settings category: {0}")]
    UnknownCategory(String),

    /// Form state failed validation; nothing may be submitted
    #[error("Submission cancelled: {0}")]
    Rejected(#[from] Rejection),
}

impl Error {
    /// Validation failure carried by this error, if any
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Error::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}
