//! Log line parsing.
//!
//! The line grammar is four whitespace-separated segments: two timestamp
//! tokens, a bracketed level, then the payload. The payload's leading
//! bracketed token, when present, is the error code; the message is what
//! follows the last `"] "` separator. Malformed lines are dropped rather
//! than failing the whole read.

/// A structurally parsed log line, before reference resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// The two timestamp tokens rejoined, e.g. `2024-01-01 10:00:00`.
    pub timestamp: String,
    /// Severity with brackets stripped, e.g. `ERROR`.
    pub level: String,
    /// The bracketed code from the payload, or `UNKNOWN` if absent.
    pub error_code: String,
    /// The free-text message.
    pub message: String,
}

/// Parse one log line.
///
/// Returns `None` if the line does not split into at least four
/// whitespace-separated segments.
#[must_use]
pub fn parse_line(line: &str) -> Option<RawEntry> {
    let mut parts = line.trim().splitn(4, ' ');
    let date = parts.next()?;
    let time = parts.next()?;
    let level = parts.next()?;
    let payload = parts.next()?;

    let error_code = if payload.contains('[') {
        payload
            .split(']')
            .next()
            .unwrap_or("")
            .rsplit('[')
            .next()
            .unwrap_or("UNKNOWN")
            .to_string()
    } else {
        "UNKNOWN".to_string()
    };

    let message = payload
        .rsplit_once("] ")
        .map_or(payload, |(_, rest)| rest)
        .to_string();

    Some(RawEntry {
        timestamp: format!("{date} {time}"),
        level: level.trim_start_matches('[').trim_end_matches(']').to_string(),
        error_code,
        message,
    })
}
