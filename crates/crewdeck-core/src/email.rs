//! Email helpers.
//!
//! Emails are plain strings throughout crewdeck; the only structural
//! requirement the system imposes is the organizational-domain suffix
//! check performed at registration.

/// Returns `true` if `email` ends with the required organizational suffix.
///
/// The comparison is case-sensitive; directory files and registration input
/// are expected to use the same casing.
#[must_use]
pub fn has_domain(email: &str, required_suffix: &str) -> bool {
    !required_suffix.is_empty() && email.ends_with(required_suffix)
}

/// Normalize a user-supplied email: trim surrounding whitespace.
#[must_use]
pub fn normalize(email: &str) -> &str {
    email.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_suffix_match() {
        assert!(has_domain("sup@x.com", "@x.com"));
        assert!(!has_domain("sup@y.com", "@x.com"));
        assert!(!has_domain("sup@x.com", ""));
    }

    #[test]
    fn bare_domain_is_not_enough() {
        // The suffix must terminate the address, not merely appear in it.
        assert!(!has_domain("sup@x.com.evil.org", "@x.com"));
    }

    #[test]
    fn normalize_trims() {
        assert_eq!(normalize("  sup@x.com "), "sup@x.com");
        assert_eq!(normalize("sup@x.com"), "sup@x.com");
    }
}
