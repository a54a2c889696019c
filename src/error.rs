//! Error types for the fallible edges of the crate.
//!
//! The simulation itself never fails; only settings and I/O do.

use thiserror::Error;

/// Errors raised while loading, validating or saving configuration.
#[derive(Debug, Error)]
pub enum CageError {
    /// A settings value is out of range
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CageError {
    /// Creates an invalid-settings error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidSettings(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CageError>;
