//! JSON-file storage implementation.
//!
//! This module provides the `JsonFileStore` implementation of the
//! `CredentialStore` trait. The whole mapping is kept in memory and the
//! file is rewritten on every mutation, under a single lock.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::{Result, StoreError};
use crate::types::CredentialRecord;
use crate::CredentialStore;

/// JSON-file-backed credential store.
///
/// The in-memory map is authoritative; every mutation persists it in full.
/// The lock is held across the read-modify-write and the save, which gives
/// the single-writer discipline whole-file overwrite requires.
pub struct JsonFileStore {
    path: PathBuf,
    inner: Mutex<BTreeMap<String, CredentialRecord>>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// If the file does not exist, an empty store is initialized and
    /// persisted immediately.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if the file exists but is not valid
    /// JSON of the expected shape, or `StoreError::Io` on read/write failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            let store = Self {
                path,
                inner: Mutex::new(BTreeMap::new()),
            };
            store.save(&store.inner.lock())?;
            return Ok(store);
        }

        let raw = fs::read_to_string(&path).map_err(|e| StoreError::Io(e.to_string()))?;
        let map: BTreeMap<String, CredentialRecord> =
            serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        Ok(Self {
            path,
            inner: Mutex::new(map),
        })
    }

    /// Create an empty store at `path`, overwriting whatever is there.
    ///
    /// This is the recovery path for a corrupt store file. It discards the
    /// previous contents, so callers are expected to have logged the
    /// corruption loudly before choosing it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the empty store cannot be persisted.
    pub fn create_empty<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            inner: Mutex::new(BTreeMap::new()),
        };
        store.save(&store.inner.lock())?;
        tracing::warn!(path = %store.path.display(), "credential store reset to empty");
        Ok(store)
    }

    /// The path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the given mapping atomically: write a temp file in the same
    /// directory, then rename over the target.
    fn save(&self, map: &BTreeMap<String, CredentialRecord>) -> Result<()> {
        let json =
            serde_json::to_string_pretty(map).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");

        fs::write(&tmp, json).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(())
    }
}

impl CredentialStore for JsonFileStore {
    fn insert(&self, email: &str, record: CredentialRecord) -> Result<()> {
        let mut map = self.inner.lock();
        map.insert(email.to_string(), record);
        self.save(&map)?;
        tracing::debug!(email, "credential record persisted");
        Ok(())
    }

    fn get(&self, email: &str) -> Result<Option<CredentialRecord>> {
        Ok(self.inner.lock().get(email).cloned())
    }

    fn contains(&self, email: &str) -> Result<bool> {
        Ok(self.inner.lock().contains_key(email))
    }

    fn emails(&self) -> Result<Vec<String>> {
        Ok(self.inner.lock().keys().cloned().collect())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.inner.lock().len())
    }

    fn all(&self) -> Result<BTreeMap<String, CredentialRecord>> {
        Ok(self.inner.lock().clone())
    }
}
