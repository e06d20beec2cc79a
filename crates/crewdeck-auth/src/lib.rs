//! Authentication and session management for crewdeck.
//!
//! This crate orchestrates the credential store and the agent directory to
//! answer "is this identity allowed in, and what can it see":
//!
//! - **Registration**: ordered precondition checks (domain suffix, password
//!   confirmation, duplicate account, directory/admin mapping), then a
//!   salted hash is persisted
//! - **Login**: credential lookup plus constant-time digest comparison
//! - **Sessions**: opaque tokens in an in-memory registry with idle eviction
//!
//! All decisions are pure functions of `(email, password, stores)`; the
//! authenticator holds no mutable state of its own.
//!
//! # Example
//!
//! ```no_run
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//! use crewdeck_auth::{AuthConfig, Authenticator};
//! use crewdeck_directory::Directory;
//! use crewdeck_store::JsonFileStore;
//!
//! let store = Arc::new(JsonFileStore::open("users.json").unwrap());
//! let directory = Arc::new(Directory::from_map(BTreeMap::new()));
//! let config = AuthConfig {
//!     required_domain: "@x.com".to_string(),
//!     admin_emails: vec!["admin@x.com".to_string()],
//!     session_idle_seconds: 1800,
//! };
//!
//! let auth = Authenticator::new(store, directory, config);
//! auth.register("admin@x.com", "secret", "secret").unwrap();
//! let session = auth.login("admin@x.com", "secret").unwrap();
//! assert!(session.is_admin);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod password;
pub mod session;

pub use error::{AuthError, Result};
pub use session::{Session, SessionRegistry};

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crewdeck_core::email;
use crewdeck_directory::Directory;
use crewdeck_store::{CredentialRecord, CredentialStore};

/// Configuration for authentication.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Required organizational email suffix for registration.
    pub required_domain: String,
    /// Fixed admin allow-list; membership is a static configuration
    /// concern, not stored in the credential store.
    pub admin_emails: Vec<String>,
    /// Idle timeout for sessions, in seconds.
    pub session_idle_seconds: u64,
}

impl AuthConfig {
    /// The session idle timeout as a `Duration`.
    #[must_use]
    pub const fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_seconds)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            required_domain: "@example.com".to_string(),
            admin_emails: Vec::new(),
            session_idle_seconds: 1800,
        }
    }
}

/// Validates login attempts and registration requests against the
/// credential store and agent directory.
pub struct Authenticator<S: CredentialStore> {
    store: Arc<S>,
    directory: Arc<Directory>,
    config: AuthConfig,
}

impl<S: CredentialStore> Authenticator<S> {
    /// Create an authenticator over the given stores.
    #[must_use]
    pub fn new(store: Arc<S>, directory: Arc<Directory>, config: AuthConfig) -> Self {
        Self {
            store,
            directory,
            config,
        }
    }

    /// The credential store this authenticator reads and writes.
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Register a new account.
    ///
    /// Preconditions are checked in order; the first failure wins:
    ///
    /// 1. `InvalidDomain` — email lacks the required suffix
    /// 2. `PasswordMismatch` — the two passwords differ
    /// 3. `AlreadyExists` — the email already has a record
    /// 4. `Unmapped` — email is neither a directory supervisor nor an admin
    ///
    /// # Errors
    ///
    /// Returns the first failed precondition, or a storage error if
    /// persisting the new record fails.
    pub fn register(&self, email: &str, password: &str, confirm: &str) -> Result<()> {
        let email = email::normalize(email);

        if !email::has_domain(email, &self.config.required_domain) {
            return Err(AuthError::InvalidDomain {
                required: self.config.required_domain.clone(),
            });
        }
        if password != confirm {
            return Err(AuthError::PasswordMismatch);
        }
        if self.store.contains(email)? {
            return Err(AuthError::AlreadyExists);
        }
        if !self.directory.is_supervisor(email) && !self.is_admin(email) {
            return Err(AuthError::Unmapped(email.to_string()));
        }

        let salt = password::generate_salt();
        let record = CredentialRecord {
            password_hash: password::hash_password(password, &salt),
            salt,
            created_at: Utc::now(),
        };
        self.store.insert(email, record)?;
        tracing::info!(email, "account registered");
        Ok(())
    }

    /// Returns `true` iff a record exists for `email` and its digest
    /// matches the supplied password.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<bool> {
        let Some(record) = self.store.get(email)? else {
            return Ok(false);
        };
        Ok(password::verify_password(
            password,
            &record.salt,
            &record.password_hash,
        ))
    }

    /// Validate a login attempt, producing a session on success.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` on lookup or digest mismatch, or a
    /// storage error if the store cannot be read.
    pub fn login(&self, email: &str, password: &str) -> Result<Session> {
        let email = email::normalize(email);
        if !self.authenticate(email, password)? {
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        Ok(Session {
            email: email.to_string(),
            is_admin: self.is_admin(email),
            created_at: now,
            last_seen_at: now,
        })
    }

    /// Membership test against the fixed admin allow-list.
    #[must_use]
    pub fn is_admin(&self, email: &str) -> bool {
        self.config.admin_emails.iter().any(|a| a == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewdeck_store::JsonFileStore;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn setup() -> (Authenticator<JsonFileStore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(JsonFileStore::open(dir.path().join("users.json")).unwrap());

        let mut map = BTreeMap::new();
        map.insert(
            "sup@x.com".to_string(),
            vec!["Alice".to_string(), "Bob".to_string()],
        );
        let directory = Arc::new(Directory::from_map(map));

        let config = AuthConfig {
            required_domain: "@x.com".to_string(),
            admin_emails: vec!["admin@x.com".to_string()],
            session_idle_seconds: 1800,
        };

        (Authenticator::new(store, directory, config), dir)
    }

    #[test]
    fn register_rejects_wrong_domain() {
        let (auth, _dir) = setup();
        let err = auth.register("sup@other.com", "pw", "pw").unwrap_err();
        assert!(matches!(err, AuthError::InvalidDomain { .. }));
    }

    #[test]
    fn register_rejects_password_mismatch() {
        let (auth, _dir) = setup();
        let err = auth.register("sup@x.com", "pw1", "pw2").unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
    }

    #[test]
    fn register_rejects_duplicate() {
        let (auth, _dir) = setup();
        auth.register("sup@x.com", "pw", "pw").unwrap();
        let err = auth.register("sup@x.com", "pw", "pw").unwrap_err();
        assert!(matches!(err, AuthError::AlreadyExists));
    }

    #[test]
    fn register_rejects_unmapped_identity() {
        let (auth, _dir) = setup();
        let err = auth.register("carol@x.com", "pw", "pw").unwrap_err();
        assert!(matches!(err, AuthError::Unmapped(email) if email == "carol@x.com"));
    }

    #[test]
    fn register_accepts_admin_without_mapping() {
        let (auth, _dir) = setup();
        auth.register("admin@x.com", "pw", "pw").unwrap();
        assert!(auth.authenticate("admin@x.com", "pw").unwrap());
    }

    #[test]
    fn checks_run_in_priority_order() {
        let (auth, _dir) = setup();

        // Wrong domain masks the password mismatch.
        let err = auth.register("sup@other.com", "pw1", "pw2").unwrap_err();
        assert!(matches!(err, AuthError::InvalidDomain { .. }));

        // Password mismatch masks the duplicate.
        auth.register("sup@x.com", "pw", "pw").unwrap();
        let err = auth.register("sup@x.com", "pw1", "pw2").unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));

        // Duplicate masks the mapping check: re-registering an existing
        // account reports AlreadyExists even though sup@x.com is mapped.
        let err = auth.register("sup@x.com", "pw", "pw").unwrap_err();
        assert!(matches!(err, AuthError::AlreadyExists));
    }

    #[test]
    fn authenticate_matches_exact_password_only() {
        let (auth, _dir) = setup();
        auth.register("sup@x.com", "hunter2", "hunter2").unwrap();

        assert!(auth.authenticate("sup@x.com", "hunter2").unwrap());
        assert!(!auth.authenticate("sup@x.com", "hunter3").unwrap());
        assert!(!auth.authenticate("ghost@x.com", "hunter2").unwrap());
    }

    #[test]
    fn login_yields_session_with_admin_flag() {
        let (auth, _dir) = setup();
        auth.register("admin@x.com", "pw", "pw").unwrap();

        let session = auth.login("admin@x.com", "pw").unwrap();
        assert_eq!(session.email, "admin@x.com");
        assert!(session.is_admin);

        let err = auth.login("admin@x.com", "wrong").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn login_trims_whitespace() {
        let (auth, _dir) = setup();
        auth.register("sup@x.com", "pw", "pw").unwrap();
        let session = auth.login(" sup@x.com ", "pw").unwrap();
        assert_eq!(session.email, "sup@x.com");
    }

    #[test]
    fn concurrent_registrations_all_persist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let store = Arc::new(JsonFileStore::open(&path).unwrap());

        let mut map = BTreeMap::new();
        for i in 0..8 {
            map.insert(format!("sup{i}@x.com"), vec![format!("Agent{i}")]);
        }
        let directory = Arc::new(Directory::from_map(map));
        let config = AuthConfig {
            required_domain: "@x.com".to_string(),
            admin_emails: Vec::new(),
            session_idle_seconds: 1800,
        };
        let auth = Arc::new(Authenticator::new(store, directory, config));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let auth = Arc::clone(&auth);
                std::thread::spawn(move || {
                    auth.register(&format!("sup{i}@x.com"), "pw", "pw").unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // No registration was lost to a racing whole-file overwrite.
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(crewdeck_store::CredentialStore::len(&reopened).unwrap(), 8);
    }
}
