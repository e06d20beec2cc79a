//! Error types for the agent directory.

use std::path::PathBuf;

use thiserror::Error;

/// A result type using `DirectoryError`.
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Errors that can occur when loading or querying the directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The externally curated directory file does not exist.
    ///
    /// This is fatal at startup; there is no fallback mapping.
    #[error("agent directory file missing: {0}")]
    Missing(PathBuf),

    /// The directory file could not be read.
    #[error("I/O error reading directory: {0}")]
    Io(String),

    /// The directory file is not valid JSON of the expected shape.
    #[error("directory file is malformed: {0}")]
    Parse(String),

    /// The identity has no agents mapped and is not an admin.
    ///
    /// Callers must halt further action for this identity.
    #[error("no agents mapped for {0}")]
    NoAgentsMapped(String),
}
