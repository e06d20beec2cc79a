//! Error types for the error-log subsystem.

use thiserror::Error;

/// A result type using `LogError`.
pub type Result<T> = std::result::Result<T, LogError>;

/// Errors that can occur while writing or reading the error log.
#[derive(Debug, Error)]
pub enum LogError {
    /// An I/O error occurred on the log file.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
