//! Analysis error types.
//!
//! Uses anyhow for propagation in the binary. `AnalysisError` covers the
//! failure kinds the pipeline must tell apart, because some of them skip one
//! source and others abort the whole run.

use std::fmt;
use std::path::PathBuf;

use chrono::TimeDelta;

use crate::probe::RecordError;
use crate::styling::format_elapsed;

/// Failures while turning ping logs into tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The source could not be opened or read (skips that source)
    UnreadableFile { path: PathBuf, message: String },
    /// No line of the source contains the reply marker (skips that source)
    NoReplyRecords { source: String },
    /// A reply line whose timestamp or latency cannot be extracted (aborts the run)
    MalformedRecord {
        source: String,
        line_number: usize,
        line: String,
        reason: RecordError,
    },
    /// One source has two different latencies at the same elapsed time (aborts the run)
    AlignmentConflict {
        source: String,
        elapsed: TimeDelta,
        /// Line of the second reply
        line_number: usize,
        existing: u32,
        conflicting: u32,
    },
}

impl AnalysisError {
    /// Whether the error must abort the run instead of skipping one source.
    pub fn is_fatal(&self) -> bool {
        match self {
            AnalysisError::UnreadableFile { .. } | AnalysisError::NoReplyRecords { .. } => false,
            AnalysisError::MalformedRecord { .. } | AnalysisError::AlignmentConflict { .. } => {
                true
            }
        }
    }

    /// Name of the source the error is attributed to.
    pub fn source_name(&self) -> String {
        match self {
            AnalysisError::UnreadableFile { path, .. } => path.display().to_string(),
            AnalysisError::NoReplyRecords { source }
            | AnalysisError::MalformedRecord { source, .. }
            | AnalysisError::AlignmentConflict { source, .. } => source.clone(),
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::UnreadableFile { path, message } => {
                write!(f, "Cannot read {}: {message}", path.display())
            }
            AnalysisError::NoReplyRecords { source } => {
                write!(f, "No \"Reply from\" records in {source}; skipping it")
            }
            AnalysisError::MalformedRecord {
                source,
                line_number,
                line,
                reason,
            } => write!(
                f,
                "Malformed reply record in {source} at line {line_number}: {reason}\n  {line}"
            ),
            AnalysisError::AlignmentConflict {
                source,
                elapsed,
                line_number,
                existing,
                conflicting,
            } => write!(
                f,
                "Conflicting reply in {source} at line {line_number}: {conflicting} ms at elapsed time {}, \
                 which already has {existing} ms (timestamps have one-second resolution)",
                format_elapsed(*elapsed)
            ),
        }
    }
}

impl std::error::Error for AnalysisError {}
