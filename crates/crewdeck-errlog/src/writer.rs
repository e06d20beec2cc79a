//! Append-only error log writer.
//!
//! Every line uses the fixed four-field layout:
//!
//! ```text
//! <date> <time> [<LEVEL>] [<CODE>] <message>
//! ```
//!
//! Appends are serialized through a mutex so concurrently recorded lines
//! are neither reordered nor torn. Lines are never mutated or deleted; the
//! file grows for the life of the deployment.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::Mutex;

use crate::codes::ErrorCode;
use crate::error::Result;

/// Handle to the append-only error log file.
pub struct ErrorLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ErrorLog {
    /// Create a handle for the log at `path`. The file is created lazily
    /// on the first append.
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// The path of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one ERROR line with the given code and message.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Io` if the file cannot be opened or written.
    pub fn record(&self, code: ErrorCode, message: &str) -> Result<()> {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let line = format!("{timestamp} [ERROR] [{code}] {message}");

        let _guard = self.lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        file.flush()?;

        tracing::debug!(code = %code, message, "error recorded");
        Ok(())
    }
}
