//! HTTP request handlers.
//!
//! This module contains all the endpoint handlers for the gateway API.

pub mod auth;
pub mod directory;
pub mod health;
pub mod logs;
pub mod reports;

use crewdeck_errlog::{ErrorCode, ErrorLog};

/// Record a user-facing failure in the error log.
///
/// A log write failure must not mask the failure being reported, so it is
/// traced and swallowed here.
pub(crate) fn record_failure(errlog: &ErrorLog, code: ErrorCode, message: &str) {
    if let Err(err) = errlog.record(code, message) {
        tracing::error!(error = %err, %code, message, "failed to record error log entry");
    }
}
