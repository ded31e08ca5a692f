//! Package analysis results into figures for rendering.
//!
//! A figure is what one chart window shows: a title, the smoothed trend lines
//! over the raw samples, and a statistics table beside them. The plot mode only
//! decides how sources are grouped into figures and panels; the numbers are
//! computed once per column and are the same in every packaging.
//!
//! - `single`: one figure, one panel holding every source
//! - `multi`: one figure, one panel per source
//! - `both`: the two figures above, in that order

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::smooth::smooth;
use crate::stats::{ColumnStats, Metric, StatsTable, describe};
use crate::styling::{
    HEADER, LABEL, MISSING, TITLE, format_elapsed, format_latency, format_latency_fixed,
    visual_width,
};
use crate::table::{AlignedTable, SmoothedTable};

/// Which figures to produce.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlotMode {
    /// All sources combined in one panel
    #[default]
    Single,
    /// One panel per source
    Multi,
    /// Both of the above, combined first
    Both,
}

/// How sources are grouped into panels within one figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Layout {
    Combined,
    Separated,
}

impl PlotMode {
    pub fn layouts(self) -> &'static [Layout] {
        match self {
            PlotMode::Single => &[Layout::Combined],
            PlotMode::Multi => &[Layout::Separated],
            PlotMode::Both => &[Layout::Combined, Layout::Separated],
        }
    }

    /// Number of figures this mode produces.
    pub fn figure_count(self) -> usize {
        self.layouts().len()
    }
}

/// One group of sources drawn together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub sources: Vec<String>,
    /// Raw samples
    pub latency: AlignedTable,
    /// Smoothed trend lines
    pub trend: SmoothedTable,
    pub stats: StatsTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub title: String,
    pub layout: Layout,
    pub ma_window: f64,
    pub panels: Vec<Panel>,
}

/// Build the figures for a plot mode.
pub fn build_figures(table: &AlignedTable, mode: PlotMode, ma_window: f64) -> Vec<Figure> {
    let stats = describe(table);
    let trend = smooth(table, ma_window);
    let sources: Vec<&str> = table.column_names().collect();

    let panel = |names: &[&str]| Panel {
        sources: names.iter().map(|n| n.to_string()).collect(),
        latency: table.select(names),
        trend: trend.select(names),
        stats: stats.select(names),
    };

    mode.layouts()
        .iter()
        .map(|&layout| {
            let panels = match layout {
                Layout::Combined => vec![panel(&sources)],
                Layout::Separated => sources.iter().map(|s| panel(&[*s])).collect(),
            };
            Figure {
                title: format!("ping statistics: moving average = {ma_window} s"),
                layout,
                ma_window,
                panels,
            }
        })
        .collect()
}

/// Display text of one statistics cell.
pub fn format_metric(stats: &ColumnStats, metric: Metric) -> String {
    match metric {
        Metric::Count => stats.count.to_string(),
        Metric::LastElapsed => stats
            .last_elapsed
            .map(format_elapsed)
            .unwrap_or_else(|| MISSING.to_string()),
        Metric::Mean | Metric::Std => format_latency_fixed(stats.latency(metric)),
        _ => format_latency(stats.latency(metric)),
    }
}

/// Render a statistics table: one row per metric, one right-aligned column per source.
pub fn render_stats(stats: &StatsTable) -> String {
    let labels: Vec<String> = Metric::iter().map(|m| m.to_string()).collect();
    let label_width = labels.iter().map(|l| visual_width(l)).max().unwrap_or(0);

    let columns: Vec<(&str, Vec<String>)> = stats
        .iter()
        .map(|(name, column)| {
            let cells = Metric::iter().map(|m| format_metric(column, m)).collect();
            (name, cells)
        })
        .collect();
    let widths: Vec<usize> = columns
        .iter()
        .map(|(name, cells)| {
            cells
                .iter()
                .map(|c| visual_width(c))
                .chain([visual_width(name)])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&" ".repeat(label_width));
    for ((name, _), width) in columns.iter().zip(&widths) {
        let pad = " ".repeat(width - visual_width(name));
        let _ = write!(out, "  {pad}{HEADER}{name}{HEADER:#}");
    }

    for (row, label) in labels.iter().enumerate() {
        out.push('\n');
        let pad = " ".repeat(label_width - visual_width(label));
        let _ = write!(out, "{LABEL}{label}{LABEL:#}{pad}");
        for ((_, cells), width) in columns.iter().zip(&widths) {
            let cell = &cells[row];
            let pad = " ".repeat(width - visual_width(cell));
            let _ = write!(out, "  {pad}{cell}");
        }
    }
    out
}

/// Render a figure as terminal text: title, then each panel's statistics.
pub fn render_figure(figure: &Figure) -> String {
    let mut out = format!("{TITLE}{}{TITLE:#}", figure.title);
    for panel in &figure.panels {
        out.push_str("\n\n");
        out.push_str(&render_stats(&panel.stats));
    }
    out
}
