//! Error types for effcorr

use thiserror::Error;

/// effcorr error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed input record
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number in the source
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

impl Error {
    /// Build a [`Error::Parse`] for the given line.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse { line, message: message.into() }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
