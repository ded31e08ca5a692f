use std::path::PathBuf;

use clap::Parser;
use ping_analysis::config::{AnalysisConfig, OutputFormat, Overrides};
use ping_analysis::report::PlotMode;

#[derive(Parser, Debug)]
#[command(
    name = "ping-analysis",
    version,
    about = "Latency statistics and trends from timestamped ping logs",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// One or more ping logs to analyze.
    #[arg(required = true, num_args = 1.., value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Plot type: one combined figure, one panel per file, or both figures.
    #[arg(short, long, value_enum)]
    pub plot: Option<PlotMode>,

    /// Write each figure's data as JSON; give two paths with `--plot both`.
    #[arg(short, long, num_args = 1.., value_name = "PATH")]
    pub out: Vec<PathBuf>,

    /// Moving-average window in samples (seconds at one probe per second) [default: 20]
    #[arg(long, value_name = "SPAN")]
    pub ma_window: Option<f64>,

    /// Output format for stdout [default: table]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Config file (defaults to ~/.config/ping-analysis/config.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show progress logs on stderr (-vv for debug detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Config file and environment, then command-line flags on top.
    pub fn resolve_config(&self) -> anyhow::Result<AnalysisConfig> {
        let config = AnalysisConfig::load(self.config.as_deref())?;
        Ok(config.merge(Overrides {
            ma_window: self.ma_window,
            plot: self.plot,
            format: self.format,
        })?)
    }
}
