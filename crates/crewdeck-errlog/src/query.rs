//! Log query engine: load, filter, paginate.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crewdeck_directory::Directory;

use crate::error::Result;
use crate::parse::parse_line;
use crate::resolve::resolve_references;

/// Sentinel user filter meaning "no filtering".
pub const ALL_USERS: &str = "All";

/// Default page size for log views.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// A fully parsed and resolved log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Entry timestamp, as written.
    pub timestamp: String,
    /// Severity, e.g. `ERROR`.
    pub level: String,
    /// Stable error code tag, or `UNKNOWN`.
    pub error_code: String,
    /// Agent recovered from the message, if any.
    pub agent: Option<String>,
    /// The recovered agent's supervisor, if any.
    pub supervisor: Option<String>,
    /// User email recovered from the message, if any.
    pub user: Option<String>,
    /// The free-text message.
    pub message: String,
}

/// Load all parseable entries from the log file, oldest first.
///
/// The file is re-read from the start on each call; unparseable lines are
/// skipped. A missing file yields an empty sequence — an empty log and no
/// log are the same thing to a reader.
///
/// # Errors
///
/// Returns `LogError::Io` if an existing file cannot be read.
pub fn load_entries(
    path: &Path,
    known_users: &[String],
    directory: &Directory,
) -> Result<Vec<LogEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let raw = fs::read_to_string(path)?;
    let entries = raw
        .lines()
        .filter_map(parse_line)
        .map(|raw| {
            let refs = resolve_references(&raw.message, known_users, directory);
            LogEntry {
                timestamp: raw.timestamp,
                level: raw.level,
                error_code: raw.error_code,
                agent: refs.agent,
                supervisor: refs.supervisor,
                user: refs.user,
                message: raw.message,
            }
        })
        .collect();

    Ok(entries)
}

/// Keep only entries whose recovered user matches `filter` exactly.
///
/// The [`ALL_USERS`] sentinel disables filtering.
#[must_use]
pub fn filter_by_user(entries: Vec<LogEntry>, filter: &str) -> Vec<LogEntry> {
    if filter == ALL_USERS {
        return entries;
    }
    entries
        .into_iter()
        .filter(|e| e.user.as_deref() == Some(filter))
        .collect()
}

/// Number of pages for `total` entries, at least 1.
#[must_use]
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Slice out one page of entries.
///
/// `page` is 1-based and clamped to `[1, page_count]`; out-of-range
/// requests never fail.
#[must_use]
pub fn paginate(entries: &[LogEntry], page: usize, page_size: usize) -> &[LogEntry] {
    if page_size == 0 {
        return &[];
    }
    let page = page.clamp(1, page_count(entries.len(), page_size));
    let start = (page - 1) * page_size;
    let end = (page * page_size).min(entries.len());
    &entries[start.min(entries.len())..end]
}
