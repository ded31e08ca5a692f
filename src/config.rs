//! Layered analysis configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. Config file (`--config`, `PING_ANALYSIS_CONFIG_PATH`, or the platform config dir)
//! 3. `PING_ANALYSIS_*` environment variables, e.g. `PING_ANALYSIS_MA_WINDOW=30`
//! 4. Command-line flags, applied by the caller through [`AnalysisConfig::merge`]
//!
//! ```toml
//! # ~/.config/ping-analysis/config.toml
//! ma-window = 30
//! plot = "both"
//! format = "table"
//! ```

use std::path::{Path, PathBuf};

use config::{Case, Config, ConfigError, Environment, File, FileFormat};
use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};
use serde::{Deserialize, Serialize};

use crate::report::PlotMode;
use crate::smooth::DEFAULT_SPAN;

/// Prefix of environment variables read as configuration.
pub const ENV_PREFIX: &str = "PING_ANALYSIS";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "PING_ANALYSIS_CONFIG_PATH";

/// How results are written to stdout.
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
pub enum OutputFormat {
    /// Human-readable statistics tables
    #[default]
    Table,
    /// Figure data as JSON
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AnalysisConfig {
    /// Smoothing span in samples
    pub ma_window: f64,
    pub plot: PlotMode,
    pub format: OutputFormat,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ma_window: DEFAULT_SPAN,
            plot: PlotMode::default(),
            format: OutputFormat::default(),
        }
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub ma_window: Option<f64>,
    pub plot: Option<PlotMode>,
    pub format: Option<OutputFormat>,
}

impl AnalysisConfig {
    /// Load defaults, config file and environment.
    ///
    /// An explicit `path` must exist. The default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => Some(File::from(path).format(FileFormat::Toml).required(true)),
            None => default_config_path()
                .map(|path| File::from(path).format(FileFormat::Toml).required(false)),
        };

        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .convert_case(Case::Kebab),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        log::debug!("Loaded config: {config:?}");
        Ok(config)
    }

    /// Apply command-line overrides and re-validate.
    pub fn merge(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(ma_window) = overrides.ma_window {
            self.ma_window = ma_window;
        }
        if let Some(plot) = overrides.plot {
            self.plot = plot;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject spans that do not describe a decaying average.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ma_window.is_finite() || self.ma_window < 1.0 {
            return Err(ConfigError::Message(format!(
                "ma-window must be a number >= 1, got {}",
                self.ma_window
            )));
        }
        Ok(())
    }
}

/// Config file location when `--config` is not given.
///
/// Priority:
/// 1. `PING_ANALYSIS_CONFIG_PATH` environment variable
/// 2. Platform config dir (`~/.config/ping-analysis/config.toml` on Linux and macOS)
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("ping-analysis").join("config.toml"))
}
