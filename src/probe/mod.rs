//! Ping log records.
//!
//! - **Parsing**: turn one log line into a timestamped latency [`Sample`]
//! - **Trimming**: cut a log down to the block between its first and last reply

pub mod parse;
pub mod trim;

pub use parse::{RecordError, Sample, is_reply, parse_line};
pub use trim::{reply_range, trim};
