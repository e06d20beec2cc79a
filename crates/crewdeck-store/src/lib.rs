//! Credential storage layer for crewdeck.
//!
//! This crate persists email → credential-record mappings. The persisted
//! form is a single JSON document, `{email: {password_hash, salt, created_at}}`,
//! rewritten in full on every mutation.
//!
//! All mutations serialize through an internal lock held across the
//! read-modify-write and the save, so concurrent registrations on a shared
//! store cannot overwrite each other. Saves are atomic (temp file + rename).
//!
//! # Example
//!
//! ```no_run
//! use crewdeck_store::{CredentialRecord, CredentialStore, JsonFileStore};
//! use chrono::Utc;
//!
//! let store = JsonFileStore::open("users.json").unwrap();
//! store.insert("sup@x.com", CredentialRecord {
//!     password_hash: "ab..".into(),
//!     salt: "cd..".into(),
//!     created_at: Utc::now(),
//! }).unwrap();
//! assert!(store.contains("sup@x.com").unwrap());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod file;
pub mod types;

pub use error::{Result, StoreError};
pub use file::JsonFileStore;
pub use types::CredentialRecord;

use std::collections::BTreeMap;

/// The storage trait defining all credential-store operations.
///
/// This trait abstracts the storage layer so tests can substitute an
/// in-memory implementation.
pub trait CredentialStore: Send + Sync {
    /// Insert a credential record and persist the whole store.
    ///
    /// Inserting an email that already has a record overwrites it; callers
    /// enforce the no-duplicate-registration rule before inserting.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the store fails.
    fn insert(&self, email: &str, record: CredentialRecord) -> Result<()>;

    /// Get the credential record for an email, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, email: &str) -> Result<Option<CredentialRecord>>;

    /// Returns `true` if a record exists for `email`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn contains(&self, email: &str) -> Result<bool>;

    /// List all stored emails in sorted order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn emails(&self) -> Result<Vec<String>>;

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn len(&self) -> Result<usize>;

    /// Returns `true` if the store holds no records.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// A snapshot of the whole mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn all(&self) -> Result<BTreeMap<String, CredentialRecord>>;
}
