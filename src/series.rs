//! Per-source latency series on an elapsed-time axis.
//!
//! Each log carries absolute wall-clock timestamps. Sources started at
//! different times are made comparable by measuring every sample from the
//! first reply of its own log, so every series starts at zero.

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::AnalysisError;
use crate::probe::{self, RecordError};

/// One latency sample positioned on the elapsed-time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub elapsed: TimeDelta,
    pub latency_ms: u32,
    /// 1-based line of the reply in its file
    pub line_number: usize,
}

impl Point {
    pub fn elapsed_seconds(&self) -> f64 {
        elapsed_seconds(self.elapsed)
    }
}

/// Convert an elapsed duration to fractional seconds.
pub fn elapsed_seconds(elapsed: TimeDelta) -> f64 {
    elapsed.num_milliseconds() as f64 / 1000.0
}

/// Latency samples of one source, in log order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub source: String,
    /// Wall-clock time of the first reply (elapsed time zero)
    pub start: NaiveDateTime,
    pub points: Vec<Point>,
    /// Non-reply lines between the first and last reply, e.g. `Request timed out.`
    pub unanswered: usize,
}

impl Series {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Elapsed time of the last sample.
    pub fn duration(&self) -> TimeDelta {
        self.points
            .last()
            .map(|p| p.elapsed)
            .unwrap_or_else(TimeDelta::zero)
    }
}

/// Build a series from a raw log: trim banners and footers, then parse.
pub fn series_from_log<S: AsRef<str>>(source: &str, lines: &[S]) -> Result<Series, AnalysisError> {
    let Some(range) = probe::reply_range(lines) else {
        return Err(AnalysisError::NoReplyRecords {
            source: source.to_string(),
        });
    };
    log::debug!(
        "{source}: dropped {} header and {} trailer lines",
        range.start,
        lines.len() - range.end
    );
    build_series(source, &lines[range.clone()], range.start + 1)
}

/// Build a series from trimmed lines.
///
/// `first_line_number` is the 1-based position of `lines[0]` in the original
/// file, used to attribute malformed records.
pub fn build_series<S: AsRef<str>>(
    source: &str,
    lines: &[S],
    first_line_number: usize,
) -> Result<Series, AnalysisError> {
    let mut samples = Vec::with_capacity(lines.len());
    let mut unanswered = 0;
    let mut previous: Option<NaiveDateTime> = None;

    for (offset, raw) in lines.iter().enumerate() {
        let line = raw.as_ref();
        let malformed = |reason: RecordError| AnalysisError::MalformedRecord {
            source: source.to_string(),
            line_number: first_line_number + offset,
            line: line.to_string(),
            reason,
        };

        let Some(sample) = probe::parse_line(line).map_err(malformed)? else {
            unanswered += 1;
            continue;
        };
        if let Some(previous) = previous
            && sample.timestamp < previous
        {
            return Err(malformed(RecordError::TimestampOutOfOrder { previous }));
        }
        previous = Some(sample.timestamp);
        samples.push((first_line_number + offset, sample));
    }

    let Some(start) = samples.first().map(|(_, s)| s.timestamp) else {
        return Err(AnalysisError::NoReplyRecords {
            source: source.to_string(),
        });
    };

    let points: Vec<Point> = samples
        .iter()
        .map(|(line_number, s)| Point {
            elapsed: s.timestamp - start,
            latency_ms: s.latency_ms,
            line_number: *line_number,
        })
        .collect();

    if unanswered > 0 {
        log::info!("{source}: {unanswered} probes without reply");
    }

    let series = Series {
        source: source.to_string(),
        start,
        points,
        unanswered,
    };
    log::debug!(
        "{source}: {} samples over {}s from {}",
        series.len(),
        series.duration().num_seconds(),
        series.start
    );
    Ok(series)
}
