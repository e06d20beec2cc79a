//! Error types for the report pipeline.
//!
//! External failures are split by collaborator and by kind (HTTP failure,
//! timeout, undecodable payload) so operators can tell a dead metrics
//! server from a misbehaving summarizer.

use thiserror::Error;

/// A result type using `ReportError`.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while generating a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Zero agents selected after filtering; halts the current action only.
    #[error("no agents selected")]
    NoSelection,

    /// No view matching the configured name fragment exists.
    #[error("no view matching {0:?} found")]
    ViewNotFound(String),

    /// The fetched dataset contains no rows for the selected agents.
    #[error("no data found for selected agents")]
    NoData,

    /// The metrics source request failed.
    #[error("metrics source error: {0}")]
    MetricsSource(String),

    /// The summarization service request failed.
    #[error("summarizer error: {0}")]
    Summarizer(String),

    /// An external call exceeded its deadline.
    #[error("external service timeout: {0}")]
    Timeout(String),

    /// An external response could not be decoded.
    #[error("undecodable response: {0}")]
    Decode(String),
}

impl ReportError {
    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NoSelection => 422,
            Self::ViewNotFound(_) | Self::NoData => 404,
            Self::Timeout(_) => 504,
            Self::MetricsSource(_) | Self::Summarizer(_) | Self::Decode(_) => 502,
        }
    }

    /// Returns `true` if this failure must also be recorded in the error log.
    ///
    /// Selection emptiness is a user-visible warning only; everything that
    /// reached an external service is durably logged.
    #[must_use]
    pub const fn is_logged(&self) -> bool {
        !matches!(self, Self::NoSelection)
    }
}
