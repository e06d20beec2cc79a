//! Supervisor-to-agents directory for crewdeck.
//!
//! The directory is an externally curated JSON document,
//! `{supervisor_email: [agent_name, ...]}`, loaded once at process start and
//! treated as read-only afterwards. This crate derives the reverse index
//! (agent → supervisor) and the sorted supervisor/agent universes, and
//! answers the visibility question: which agents may a given identity see.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use crewdeck_directory::Directory;
//!
//! let mut map = BTreeMap::new();
//! map.insert("sup@x.com".to_string(), vec!["Alice".to_string(), "Bob".to_string()]);
//! let directory = Directory::from_map(map);
//!
//! assert_eq!(directory.supervisor_of("Alice"), Some("sup@x.com"));
//! assert_eq!(directory.visible_agents("sup@x.com", false).unwrap(), vec!["Alice", "Bob"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;

pub use error::{DirectoryError, Result};

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

/// A validation warning produced while deriving directory indices.
///
/// Warnings never fail the load; they surface curation mistakes in the
/// external file that the system otherwise resolves deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryWarning {
    /// One agent name appears under more than one supervisor.
    ///
    /// The reverse index keeps the first supervisor in sorted order.
    DuplicateAgent {
        /// The agent listed more than once.
        agent: String,
        /// The supervisor the reverse index kept.
        kept: String,
        /// The supervisor whose mapping was ignored.
        ignored: String,
    },
}

impl fmt::Display for DirectoryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateAgent {
                agent,
                kept,
                ignored,
            } => write!(
                f,
                "agent {agent} is mapped to both {kept} and {ignored}; keeping {kept}"
            ),
        }
    }
}

/// The supervisor→agents mapping plus its derived indices.
#[derive(Debug, Clone)]
pub struct Directory {
    by_supervisor: BTreeMap<String, Vec<String>>,
    by_agent: HashMap<String, String>,
    agents: Vec<String>,
    warnings: Vec<DirectoryWarning>,
}

impl Directory {
    /// Load the directory from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Missing` if the file does not exist (fatal
    /// to the whole process; there is no fallback), `Io` if it cannot be
    /// read, or `Parse` if it is not `{supervisor: [agent, ...]}` JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DirectoryError::Missing(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path).map_err(|e| DirectoryError::Io(e.to_string()))?;
        let map: BTreeMap<String, Vec<String>> =
            serde_json::from_str(&raw).map_err(|e| DirectoryError::Parse(e.to_string()))?;

        Ok(Self::from_map(map))
    }

    /// Build a directory from an in-memory mapping.
    #[must_use]
    pub fn from_map(by_supervisor: BTreeMap<String, Vec<String>>) -> Self {
        let mut by_agent = HashMap::new();
        let mut warnings = Vec::new();

        // BTreeMap iteration is sorted, so duplicate resolution is
        // deterministic: the first supervisor in sorted order wins.
        for (supervisor, agents) in &by_supervisor {
            for agent in agents {
                match by_agent.get(agent) {
                    None => {
                        by_agent.insert(agent.clone(), supervisor.clone());
                    }
                    Some(kept) => {
                        warnings.push(DirectoryWarning::DuplicateAgent {
                            agent: agent.clone(),
                            kept: kept.clone(),
                            ignored: supervisor.clone(),
                        });
                    }
                }
            }
        }

        let agents: Vec<String> = by_supervisor
            .values()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        for warning in &warnings {
            tracing::warn!(%warning, "directory validation warning");
        }

        Self {
            by_supervisor,
            by_agent,
            agents,
            warnings,
        }
    }

    /// Sorted list of all supervisor emails.
    #[must_use]
    pub fn supervisors(&self) -> Vec<String> {
        self.by_supervisor.keys().cloned().collect()
    }

    /// Sorted unique list of all agent names.
    #[must_use]
    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    /// Returns `true` if `email` is a supervisor in the directory.
    #[must_use]
    pub fn is_supervisor(&self, email: &str) -> bool {
        self.by_supervisor.contains_key(email)
    }

    /// The supervisor owning `agent`, if mapped.
    #[must_use]
    pub fn supervisor_of(&self, agent: &str) -> Option<&str> {
        self.by_agent.get(agent).map(String::as_str)
    }

    /// Validation warnings collected at load time.
    #[must_use]
    pub fn warnings(&self) -> &[DirectoryWarning] {
        &self.warnings
    }

    /// The set of agents visible to `email`.
    ///
    /// Returns the supervisor's own list; an admin with no explicit mapping
    /// sees the full agent universe.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::NoAgentsMapped` if the resulting set is
    /// empty and the identity is not an admin. Callers must halt further
    /// action for this identity.
    pub fn visible_agents(&self, email: &str, is_admin: bool) -> Result<Vec<String>> {
        let mut list: Vec<String> = self
            .by_supervisor
            .get(email)
            .cloned()
            .unwrap_or_default();
        list.sort();
        list.dedup();

        if list.is_empty() && is_admin {
            list = self.agents.clone();
        }
        if list.is_empty() {
            return Err(DirectoryError::NoAgentsMapped(email.to_string()));
        }

        Ok(list)
    }

    /// Sorted union of agents under the given supervisors.
    #[must_use]
    pub fn agents_under(&self, supervisors: &[String]) -> Vec<String> {
        let mut set = BTreeSet::new();
        for supervisor in supervisors {
            if let Some(agents) = self.by_supervisor.get(supervisor) {
                set.extend(agents.iter().cloned());
            }
        }
        set.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Directory {
        let mut map = BTreeMap::new();
        map.insert(
            "sup1@x.com".to_string(),
            vec!["Alice".to_string(), "Bob".to_string()],
        );
        map.insert("sup2@x.com".to_string(), vec!["Carol".to_string()]);
        Directory::from_map(map)
    }

    #[test]
    fn derived_indices() {
        let dir = sample();
        assert_eq!(dir.supervisors(), vec!["sup1@x.com", "sup2@x.com"]);
        assert_eq!(dir.agents(), ["Alice", "Bob", "Carol"]);
        assert_eq!(dir.supervisor_of("Bob"), Some("sup1@x.com"));
        assert_eq!(dir.supervisor_of("Nobody"), None);
        assert!(dir.warnings().is_empty());
    }

    #[test]
    fn visible_agents_for_supervisor() {
        let dir = sample();
        assert_eq!(
            dir.visible_agents("sup1@x.com", false).unwrap(),
            vec!["Alice", "Bob"]
        );
    }

    #[test]
    fn admin_without_mapping_sees_universe() {
        let dir = sample();
        assert_eq!(
            dir.visible_agents("admin@x.com", true).unwrap(),
            vec!["Alice", "Bob", "Carol"]
        );
    }

    #[test]
    fn unmapped_non_admin_is_rejected() {
        let dir = sample();
        let err = dir.visible_agents("nobody@x.com", false).unwrap_err();
        assert!(matches!(err, DirectoryError::NoAgentsMapped(email) if email == "nobody@x.com"));
    }

    #[test]
    fn agents_under_unions_and_sorts() {
        let dir = sample();
        let agents = dir.agents_under(&["sup2@x.com".to_string(), "sup1@x.com".to_string()]);
        assert_eq!(agents, vec!["Alice", "Bob", "Carol"]);
        assert!(dir.agents_under(&["unknown@x.com".to_string()]).is_empty());
    }

    #[test]
    fn duplicate_agent_warns_and_keeps_first() {
        let mut map = BTreeMap::new();
        map.insert("a@x.com".to_string(), vec!["Alice".to_string()]);
        map.insert("b@x.com".to_string(), vec!["Alice".to_string()]);
        let dir = Directory::from_map(map);

        assert_eq!(dir.supervisor_of("Alice"), Some("a@x.com"));
        assert_eq!(
            dir.warnings(),
            &[DirectoryWarning::DuplicateAgent {
                agent: "Alice".to_string(),
                kept: "a@x.com".to_string(),
                ignored: "b@x.com".to_string(),
            }]
        );
    }

    #[test]
    fn load_missing_file_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        let err = Directory::load(&path).unwrap_err();
        assert!(matches!(err, DirectoryError::Missing(_)));
    }

    #[test]
    fn load_parses_json_mapping() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mapping.json");
        std::fs::write(&path, r#"{"sup@x.com": ["Alice", "Bob"]}"#).unwrap();

        let directory = Directory::load(&path).unwrap();
        assert_eq!(directory.agents(), ["Alice", "Bob"]);

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Directory::load(&path),
            Err(DirectoryError::Parse(_))
        ));
    }
}
