//! Parse timestamped ping log lines into latency samples.
//!
//! Reply lines look like this (Windows `ping` piped through a timestamping filter):
//! ```text
//! 17.10.2026 09:15:02 Reply from 9.9.9.9: bytes=32 time=14ms TTL=58
//! 17.10.2026 09:15:03 Reply from 9.9.9.9: bytes=32 time=211ms TTL=58
//! ```
//!
//! The first 19 characters hold the local timestamp in `DD.MM.YYYY HH:MM:SS`
//! form, and `time=<digits>` carries the round-trip time in whole milliseconds.
//! Everything else on the line (address, payload size, TTL) is ignored.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

/// Marker that identifies a successful echo reply.
pub const REPLY_MARKER: &str = "Reply from";

/// Layout of the timestamp prefix, in `chrono` strftime syntax.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Width in bytes of the timestamp prefix.
pub const TIMESTAMP_WIDTH: usize = 19;

static LATENCY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"time=(\d+)").expect("latency pattern is valid"));

/// One successful echo reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub latency_ms: u32,
}

/// Why a reply line could not be turned into a [`Sample`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The first 19 characters are not a `DD.MM.YYYY HH:MM:SS` timestamp
    MissingTimestamp,
    /// No `time=<digits>` token, or the value does not fit in a `u32`
    MissingLatency,
    /// Timestamp earlier than the reply before it
    TimestampOutOfOrder { previous: NaiveDateTime },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MissingTimestamp => write!(
                f,
                "line does not start with a timestamp in DD.MM.YYYY HH:MM:SS form"
            ),
            RecordError::MissingLatency => {
                write!(f, "line has no time=<milliseconds> latency token")
            }
            RecordError::TimestampOutOfOrder { previous } => write!(
                f,
                "timestamp is earlier than the previous reply ({})",
                previous.format(TIMESTAMP_FORMAT)
            ),
        }
    }
}

impl std::error::Error for RecordError {}

/// Returns true if the line reports a successful echo reply.
pub fn is_reply(line: &str) -> bool {
    line.contains(REPLY_MARKER)
}

/// Parse a single log line.
///
/// Returns `Ok(None)` for lines without the reply marker (banners, timeouts,
/// summaries). A line that carries the marker but not a usable timestamp or
/// latency is an error: the log format assumption itself is broken.
pub fn parse_line(line: &str) -> Result<Option<Sample>, RecordError> {
    if !is_reply(line) {
        return Ok(None);
    }

    let timestamp = parse_timestamp(line).ok_or(RecordError::MissingTimestamp)?;
    let latency_ms = parse_latency(line).ok_or(RecordError::MissingLatency)?;

    Ok(Some(Sample {
        timestamp,
        latency_ms,
    }))
}

/// Parse the fixed-width timestamp prefix.
pub fn parse_timestamp(line: &str) -> Option<NaiveDateTime> {
    let prefix = line.get(..TIMESTAMP_WIDTH)?;
    NaiveDateTime::parse_from_str(prefix, TIMESTAMP_FORMAT).ok()
}

/// Extract the `time=<digits>` round-trip latency in milliseconds.
pub fn parse_latency(line: &str) -> Option<u32> {
    LATENCY_TOKEN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
