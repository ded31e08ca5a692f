//! Exponentially weighted moving average trend lines.
//!
//! The span `s` sets the smoothing factor `alpha = 2 / (s + 1)`. Averages are
//! adjusted: the i-th most recent present value weighs `(1 - alpha)^i`, and the
//! weights are normalized by their sum, so early outputs are not biased toward
//! the first sample.
//!
//! Missing cells do not count as steps and contribute nothing. The average is
//! carried unchanged across them and never reset.

use crate::table::{AlignedTable, SmoothedTable};

/// Default span, in samples (seconds at the usual one-second probe cadence).
pub const DEFAULT_SPAN: f64 = 20.0;

/// Smoothing factor for a span. Spans below 1 would give `alpha > 1`.
pub fn alpha(span: f64) -> f64 {
    2.0 / (span + 1.0)
}

/// Smooth every column of the table.
pub fn smooth(table: &AlignedTable, span: f64) -> SmoothedTable {
    table.map_columns(|cells| ewm_mean(cells, span))
}

/// Exponentially weighted moving average of one column.
///
/// Output has the input's length. Positions before the first present value
/// are `None`; every later position holds the average of all present values
/// up to and including it.
pub fn ewm_mean(cells: &[Option<u32>], span: f64) -> Vec<Option<f64>> {
    debug_assert!(span >= 1.0, "span must be at least 1, got {span}");
    let decay = 1.0 - alpha(span);

    // (current average, total weight of past values)
    let mut state: Option<(f64, f64)> = None;

    cells
        .iter()
        .map(|cell| {
            state = match (state, cell) {
                (None, None) => None,
                (None, Some(v)) => Some((f64::from(*v), 1.0)),
                (Some(prev), None) => Some(prev),
                (Some((avg, weight)), Some(v)) => {
                    let old = weight * decay;
                    let value = f64::from(*v);
                    Some(((old * avg + value) / (old + 1.0), old + 1.0))
                }
            };
            state.map(|(avg, _)| avg)
        })
        .collect()
}
