//! In-memory session registry.
//!
//! Sessions are transient per-login state: created at login, removed at
//! logout, never persisted. The registry evicts sessions idle longer than
//! the configured timeout on access.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crewdeck_core::SessionToken;

/// Transient per-login session state.
#[derive(Debug, Clone)]
pub struct Session {
    /// The authenticated email.
    pub email: String,
    /// Whether the identity is in the fixed admin allow-list.
    pub is_admin: bool,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Last time the session was presented.
    pub last_seen_at: DateTime<Utc>,
}

/// Registry of active sessions keyed by opaque token.
pub struct SessionRegistry {
    idle_timeout: Duration,
    inner: RwLock<HashMap<SessionToken, Session>>,
}

impl SessionRegistry {
    /// Create a registry with the given idle timeout.
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session for an authenticated identity, returning its token.
    pub fn create(&self, email: &str, is_admin: bool) -> SessionToken {
        let token = SessionToken::generate();
        let now = Utc::now();
        let session = Session {
            email: email.to_string(),
            is_admin,
            created_at: now,
            last_seen_at: now,
        };
        self.inner.write().insert(token, session);
        tracing::debug!(email, is_admin, "session created");
        token
    }

    /// Look up a session by token, refreshing its last-seen time.
    ///
    /// Returns `None` for unknown tokens and for sessions idle longer than
    /// the timeout; expired sessions are evicted.
    pub fn get(&self, token: &SessionToken) -> Option<Session> {
        let mut sessions = self.inner.write();
        let session = sessions.get_mut(token)?;

        let now = Utc::now();
        let idle = (now - session.last_seen_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        if idle > self.idle_timeout {
            let email = session.email.clone();
            sessions.remove(token);
            tracing::debug!(email, "idle session evicted");
            return None;
        }

        session.last_seen_at = now;
        Some(session.clone())
    }

    /// Remove a session (logout). Returns `true` if it existed.
    pub fn remove(&self, token: &SessionToken) -> bool {
        self.inner.write().remove(token).is_some()
    }

    /// Number of live sessions (including not-yet-evicted idle ones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if no sessions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
