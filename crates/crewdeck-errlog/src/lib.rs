//! Append-only error log and query engine for crewdeck.
//!
//! Every user-facing failure is recorded here with a stable code, one
//! textual line per event:
//!
//! ```text
//! 2024-01-01 10:00:00.123 [ERROR] [E1001] Login failed: bob@x.com
//! ```
//!
//! The file is append-only and grows for the life of the deployment. The
//! query side re-parses it on demand: structural parsing first, then a
//! substring heuristic recovers which user/agent an entry concerns, then
//! exact-match user filtering and clamped pagination.
//!
//! # Example
//!
//! ```no_run
//! use crewdeck_errlog::{ErrorCode, ErrorLog, load_entries, filter_by_user, paginate};
//! use crewdeck_directory::Directory;
//! use std::collections::BTreeMap;
//!
//! let log = ErrorLog::new("errors.log");
//! log.record(ErrorCode::InvalidCredentials, "Login failed: bob@x.com").unwrap();
//!
//! let directory = Directory::from_map(BTreeMap::new());
//! let users = vec!["bob@x.com".to_string()];
//! let entries = load_entries(log.path(), &users, &directory).unwrap();
//! let page = paginate(&filter_by_user(entries, "bob@x.com"), 1, 20).to_vec();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod codes;
pub mod error;
pub mod parse;
pub mod query;
pub mod resolve;
pub mod writer;

pub use codes::ErrorCode;
pub use error::{LogError, Result};
pub use parse::{parse_line, RawEntry};
pub use query::{
    filter_by_user, load_entries, page_count, paginate, LogEntry, ALL_USERS, DEFAULT_PAGE_SIZE,
};
pub use resolve::{resolve_references, ResolvedRefs};
pub use writer::ErrorLog;
