//! Domain types persisted by the credential store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored credential record.
///
/// Records are created once at registration and never updated or deleted;
/// there is no password-change or account-removal path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Hex-encoded digest of `salt || password`.
    pub password_hash: String,
    /// Hex-encoded per-record random salt.
    pub salt: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}
