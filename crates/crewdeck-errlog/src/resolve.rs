//! Heuristic back-reference recovery.
//!
//! Log messages carry no structural reference to the user or agent they
//! concern; this module recovers them by substring search against the
//! known credential and directory key sets. The heuristic is isolated here
//! so it can be swapped for a structured logging format later.

use crewdeck_directory::Directory;

/// References recovered from a log message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRefs {
    /// First known user email appearing in the message, in sorted order.
    pub user: Option<String>,
    /// First known agent name appearing in the message, in sorted order.
    pub agent: Option<String>,
    /// The matched agent's supervisor; `"Unknown"` when an agent matched
    /// but has no directory mapping.
    pub supervisor: Option<String>,
}

/// Scan a message for known users and agents.
///
/// `known_users` must be sorted; candidates are scanned in order so the
/// recovered reference is deterministic. This is substring matching, not a
/// foreign key: a message mentioning two known names resolves to whichever
/// sorts first.
#[must_use]
pub fn resolve_references(
    message: &str,
    known_users: &[String],
    directory: &Directory,
) -> ResolvedRefs {
    let user = known_users
        .iter()
        .find(|u| message.contains(u.as_str()))
        .cloned();

    let agent = directory
        .agents()
        .iter()
        .find(|a| message.contains(a.as_str()))
        .cloned();

    let supervisor = agent.as_ref().map(|a| {
        directory
            .supervisor_of(a)
            .unwrap_or("Unknown")
            .to_string()
    });

    ResolvedRefs {
        user,
        agent,
        supervisor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn directory() -> Directory {
        let mut map = BTreeMap::new();
        map.insert(
            "sup@x.com".to_string(),
            vec!["Alice".to_string(), "Bob".to_string()],
        );
        Directory::from_map(map)
    }

    #[test]
    fn recovers_user_and_agent() {
        let users = vec!["bob@x.com".to_string(), "sup@x.com".to_string()];
        let refs = resolve_references("Login failed: bob@x.com for Alice", &users, &directory());
        assert_eq!(refs.user.as_deref(), Some("bob@x.com"));
        assert_eq!(refs.agent.as_deref(), Some("Alice"));
        assert_eq!(refs.supervisor.as_deref(), Some("sup@x.com"));
    }

    #[test]
    fn nothing_matches() {
        let refs = resolve_references("disk full", &["a@x.com".to_string()], &directory());
        assert_eq!(refs, ResolvedRefs::default());
    }

    #[test]
    fn first_sorted_candidate_wins() {
        let users = vec!["a@x.com".to_string(), "aa@x.com".to_string()];
        // "aa@x.com" contains "a@x.com" as a substring; the sorted-first
        // candidate is the one recovered.
        let refs = resolve_references("problem with aa@x.com", &users, &directory());
        assert_eq!(refs.user.as_deref(), Some("a@x.com"));
    }
}
