//! Salted password hashing.
//!
//! Each credential record carries its own random 16-byte salt; the stored
//! digest is `blake3(salt_hex || password)`. Verification recomputes the
//! digest and compares `blake3::Hash` values, whose equality is
//! constant-time.

use uuid::Uuid;

/// Generate a fresh hex-encoded 16-byte salt.
#[must_use]
pub fn generate_salt() -> String {
    hex::encode(Uuid::new_v4().into_bytes())
}

/// Hash a password with the given hex salt, returning a hex digest.
#[must_use]
pub fn hash_password(password: &str, salt_hex: &str) -> String {
    digest(password, salt_hex).to_hex().to_string()
}

/// Verify a password against a stored salt and hex digest.
///
/// Returns `false` for a malformed stored digest rather than erroring;
/// such a record can never authenticate.
#[must_use]
pub fn verify_password(password: &str, salt_hex: &str, expected_hash_hex: &str) -> bool {
    let Ok(expected) = blake3::Hash::from_hex(expected_hash_hex) else {
        return false;
    };
    digest(password, salt_hex) == expected
}

fn digest(password: &str, salt_hex: &str) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let salt = generate_salt();
        let hash = hash_password("hunter2", &salt);
        assert!(verify_password("hunter2", &salt, &hash));
    }

    #[test]
    fn one_character_change_flips_result() {
        let salt = generate_salt();
        let hash = hash_password("hunter2", &salt);
        assert!(!verify_password("hunter3", &salt, &hash));
    }

    #[test]
    fn same_password_different_salts_differ() {
        let hash_a = hash_password("hunter2", &generate_salt());
        let hash_b = hash_password("hunter2", &generate_salt());
        assert_ne!(hash_a, hash_b);
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        assert!(!verify_password("hunter2", &generate_salt(), "not-hex"));
    }
}
