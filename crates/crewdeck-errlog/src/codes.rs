//! Stable error codes embedded in log lines and user-facing messages.
//!
//! Each code maps 1:1 to an entry in the error-handling taxonomy. The wire
//! tags are stable; existing log files must keep parsing after upgrades.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable error code recorded with every logged failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Login lookup or digest mismatch.
    InvalidCredentials,
    /// Registration email lacks the required suffix.
    InvalidDomain,
    /// The two registration passwords differ.
    PasswordMismatch,
    /// Registration email already has a record.
    AlreadyExists,
    /// Identity absent from the directory and the admin list.
    Unmapped,
    /// Zero agents selected after filtering.
    NoSelection,
    /// Required directory file absent at startup.
    MissingDirectory,
    /// Credential file unreadable as structured data.
    CorruptStore,
    /// Metrics fetch or summarization failed.
    ReportFailure,
}

impl ErrorCode {
    /// The stable wire tag written into log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "E1001",
            Self::InvalidDomain => "E1002",
            Self::PasswordMismatch => "E1003",
            Self::AlreadyExists => "E1004",
            Self::Unmapped => "E2001",
            Self::NoSelection => "E2002",
            Self::MissingDirectory => "E9001",
            Self::CorruptStore => "E9002",
            Self::ReportFailure => "E9999",
        }
    }

    /// Parse a wire tag back into a code.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "E1001" => Some(Self::InvalidCredentials),
            "E1002" => Some(Self::InvalidDomain),
            "E1003" => Some(Self::PasswordMismatch),
            "E1004" => Some(Self::AlreadyExists),
            "E2001" => Some(Self::Unmapped),
            "E2002" => Some(Self::NoSelection),
            "E9001" => Some(Self::MissingDirectory),
            "E9002" => Some(Self::CorruptStore),
            "E9999" => Some(Self::ReportFailure),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for code in [
            ErrorCode::InvalidCredentials,
            ErrorCode::InvalidDomain,
            ErrorCode::PasswordMismatch,
            ErrorCode::AlreadyExists,
            ErrorCode::Unmapped,
            ErrorCode::NoSelection,
            ErrorCode::MissingDirectory,
            ErrorCode::CorruptStore,
            ErrorCode::ReportFailure,
        ] {
            assert_eq!(ErrorCode::from_tag(code.as_str()), Some(code));
        }
        assert_eq!(ErrorCode::from_tag("E0000"), None);
    }

    #[test]
    fn display_is_wire_tag() {
        assert_eq!(ErrorCode::InvalidCredentials.to_string(), "E1001");
        assert_eq!(ErrorCode::ReportFailure.to_string(), "E9999");
    }
}
