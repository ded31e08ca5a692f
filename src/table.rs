//! Aligned latency tables.
//!
//! Sources sample on their own clocks, so their elapsed times need not
//! coincide. Alignment merges by elapsed-time *value*: the index is the sorted
//! union of every source's elapsed times, and each column holds its source's
//! latency only at the positions where that source actually recorded one.
//! All other cells are `None`, never zero.
//!
//! ```text
//! elapsed   a.log   b.log
//! 0:00:00      14      31
//! 0:00:01      15       -
//! 0:00:02       -      29
//! 0:00:03      16      30
//! ```

use std::collections::BTreeSet;

use chrono::TimeDelta;
use indexmap::IndexMap;
use serde::Serialize;
use serde::ser::Serializer;

use crate::error::AnalysisError;
use crate::series::{Series, elapsed_seconds};

/// Latency columns keyed by source name over a shared elapsed-time index.
///
/// Every column has exactly `index.len()` cells. Columns keep the order in
/// which sources were added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table<T> {
    #[serde(serialize_with = "serialize_index")]
    index: Vec<TimeDelta>,
    columns: IndexMap<String, Vec<Option<T>>>,
}

/// Raw latencies in milliseconds.
pub type AlignedTable = Table<u32>;

/// Smoothed latencies in milliseconds.
pub type SmoothedTable = Table<f64>;

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            index: Vec::new(),
            columns: IndexMap::new(),
        }
    }
}

impl<T> Table<T> {
    /// Table with an index and no columns.
    pub fn with_index(index: Vec<TimeDelta>) -> Self {
        Self {
            index,
            columns: IndexMap::new(),
        }
    }

    /// Append a column. Panics if its length differs from the index.
    pub fn insert_column(&mut self, name: impl Into<String>, cells: Vec<Option<T>>) {
        assert_eq!(
            cells.len(),
            self.index.len(),
            "column length must match the index"
        );
        self.columns.insert(name.into(), cells);
    }

    pub fn index(&self) -> &[TimeDelta] {
        &self.index
    }

    pub fn column(&self, name: &str) -> Option<&[Option<T>]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Option<T>])> {
        self.columns
            .iter()
            .map(|(name, cells)| (name.as_str(), cells.as_slice()))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Cell of `column` at the given elapsed time, if that time is in the index.
    pub fn get(&self, column: &str, elapsed: TimeDelta) -> Option<&Option<T>> {
        let pos = self.index.binary_search(&elapsed).ok()?;
        self.columns.get(column).map(|cells| &cells[pos])
    }

    /// Same index, same column order, every cell mapped through `f` per column.
    pub fn map_columns<U>(&self, mut f: impl FnMut(&[Option<T>]) -> Vec<Option<U>>) -> Table<U> {
        let mut out = Table::with_index(self.index.clone());
        for (name, cells) in &self.columns {
            out.insert_column(name.clone(), f(cells));
        }
        out
    }
}

impl<T: Clone> Table<T> {
    /// Keep only the named columns (in the given order); the index is kept whole.
    pub fn select(&self, names: &[&str]) -> Self {
        let mut out = Table::with_index(self.index.clone());
        for name in names {
            if let Some(cells) = self.columns.get(*name) {
                out.insert_column(*name, cells.clone());
            }
        }
        out
    }
}

fn serialize_index<S: Serializer>(index: &[TimeDelta], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(index.iter().map(|t| elapsed_seconds(*t)))
}

/// Merge series into one table aligned on elapsed-time value.
///
/// Within a source, two samples at the same elapsed time must agree on the
/// latency; they collapse into one cell. Disagreement is an
/// [`AnalysisError::AlignmentConflict`].
pub fn align(series: &[Series]) -> Result<AlignedTable, AnalysisError> {
    let index: Vec<TimeDelta> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.elapsed))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut table = AlignedTable::with_index(index);

    for s in series {
        let mut cells: Vec<Option<u32>> = vec![None; table.len()];
        for point in &s.points {
            // The index holds every elapsed time, so this lands on an exact match
            let pos = table.index.partition_point(|t| *t < point.elapsed);
            match cells[pos] {
                Some(existing) if existing != point.latency_ms => {
                    return Err(AnalysisError::AlignmentConflict {
                        source: s.source.clone(),
                        elapsed: point.elapsed,
                        line_number: point.line_number,
                        existing,
                        conflicting: point.latency_ms,
                    });
                }
                Some(_) => {
                    log::debug!(
                        "{}: duplicate sample at {}s collapsed",
                        s.source,
                        point.elapsed.num_seconds()
                    );
                }
                None => cells[pos] = Some(point.latency_ms),
            }
        }
        table.insert_column(s.source.clone(), cells);
    }

    log::debug!(
        "aligned {} sources over {} elapsed times",
        table.width(),
        table.len()
    );
    Ok(table)
}
