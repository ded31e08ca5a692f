//! Descriptive statistics per latency column.
//!
//! Missing cells are excluded from every statistic. A column without any
//! present value reports `count = 0` and leaves everything else undefined.

use chrono::TimeDelta;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::series::elapsed_seconds;
use crate::table::AlignedTable;

/// Summary of one column. Latency values are in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Sample standard deviation (n - 1); undefined below two samples
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub p25: Option<f64>,
    pub p75: Option<f64>,
    pub p90: Option<f64>,
    pub p95: Option<f64>,
    /// Elapsed time of the last present sample
    #[serde(serialize_with = "serialize_elapsed")]
    pub last_elapsed: Option<TimeDelta>,
}

/// Rows of the statistics table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum Metric {
    #[strum(serialize = "count")]
    Count,
    #[strum(serialize = "Δt")]
    LastElapsed,
    #[strum(serialize = "mean")]
    Mean,
    #[strum(serialize = "median")]
    Median,
    #[strum(serialize = "std")]
    Std,
    #[strum(serialize = "min")]
    Min,
    #[strum(serialize = "max")]
    Max,
    #[strum(serialize = "25%")]
    P25,
    #[strum(serialize = "75%")]
    P75,
    #[strum(serialize = "90%")]
    P90,
    #[strum(serialize = "95%")]
    P95,
}

impl ColumnStats {
    /// Latency-valued statistic for a metric; `None` for `Count` and `LastElapsed`.
    pub fn latency(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Count | Metric::LastElapsed => None,
            Metric::Mean => self.mean,
            Metric::Median => self.median,
            Metric::Std => self.std,
            Metric::Min => self.min,
            Metric::Max => self.max,
            Metric::P25 => self.p25,
            Metric::P75 => self.p75,
            Metric::P90 => self.p90,
            Metric::P95 => self.p95,
        }
    }
}

/// Statistics keyed by source name, in table column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatsTable {
    columns: IndexMap<String, ColumnStats>,
}

impl StatsTable {
    pub fn get(&self, source: &str) -> Option<&ColumnStats> {
        self.columns.get(source)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnStats)> {
        self.columns.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Keep only the named sources, in the given order.
    pub fn select(&self, names: &[&str]) -> Self {
        let columns = names
            .iter()
            .filter_map(|name| Some((name.to_string(), self.columns.get(*name)?.clone())))
            .collect();
        Self { columns }
    }
}

fn serialize_elapsed<S: Serializer>(
    elapsed: &Option<TimeDelta>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match elapsed {
        Some(t) => serializer.serialize_some(&elapsed_seconds(*t)),
        None => serializer.serialize_none(),
    }
}

/// Summarize every column of the table.
pub fn describe(table: &AlignedTable) -> StatsTable {
    let columns = table
        .columns()
        .map(|(name, cells)| (name.to_string(), describe_column(table.index(), cells)))
        .collect();
    StatsTable { columns }
}

/// Summarize one column positioned against `index`.
pub fn describe_column(index: &[TimeDelta], cells: &[Option<u32>]) -> ColumnStats {
    let mut values: Vec<f64> = cells.iter().flatten().map(|&v| f64::from(v)).collect();
    let last_elapsed = cells
        .iter()
        .zip(index)
        .rev()
        .find_map(|(cell, t)| cell.map(|_| *t));

    if values.is_empty() {
        return ColumnStats::default();
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (sum_sq / (count - 1) as f64).sqrt()
    });

    values.sort_by(f64::total_cmp);

    ColumnStats {
        count,
        mean: Some(mean),
        median: quantile(&values, 0.5),
        std,
        min: values.first().copied(),
        max: values.last().copied(),
        p25: quantile(&values, 0.25),
        p75: quantile(&values, 0.75),
        p90: quantile(&values, 0.90),
        p95: quantile(&values, 0.95),
        last_elapsed,
    }
}

/// Quantile of sorted values, interpolating linearly between ranks.
///
/// The rank of `q` is `q * (n - 1)`; for `[10, 20, 30, 40]` the 0.5 quantile
/// is 25.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = q.clamp(0.0, 1.0) * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
