//! Error types for the storage layer.

use thiserror::Error;

/// A result type using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred while reading or writing the store file.
    #[error("I/O error: {0}")]
    Io(String),

    /// The persisted store is not valid structured data.
    ///
    /// Callers decide whether to abort or reset to an empty store;
    /// see [`JsonFileStore::create_empty`](crate::JsonFileStore::create_empty).
    #[error("credential store is corrupt: {0}")]
    Corrupt(String),

    /// Serialization of the in-memory store failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}
