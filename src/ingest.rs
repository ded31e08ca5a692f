//! Batch ingestion: ping log files in, one aligned table out.
//!
//! Each file is read whole, trimmed, parsed and turned into a series on its
//! own. Only then are all series aligned. Per-source problems with a defined
//! skip policy (unreadable file, no replies) are collected and the run goes
//! on; anything that means the log format assumption is broken aborts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::AnalysisError;
use crate::series::series_from_log;
use crate::table::{AlignedTable, align};

/// The raw lines of one source, named for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLog {
    pub name: String,
    pub lines: Vec<String>,
}

impl SourceLog {
    /// Split text into lines, accepting `\n` and `\r\n` and a leading BOM.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self {
            name: name.into(),
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// Read a whole file. Bytes that are not UTF-8 are replaced, not rejected.
    pub fn read(path: &Path, name: impl Into<String>) -> Result<Self, AnalysisError> {
        let bytes = std::fs::read(path).map_err(|e| AnalysisError::UnreadableFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        log::debug!("Read {} ({} bytes)", path.display(), bytes.len());
        Ok(Self::from_text(name, &String::from_utf8_lossy(&bytes)))
    }
}

/// Outcome of a run that did not abort.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingestion {
    pub table: AlignedTable,
    /// Sources left out, each with the reason
    pub skipped: Vec<AnalysisError>,
}

/// Display name of a source: the file's base name.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Base names for all paths, with ` (2)`, ` (3)`, ... added to repeats.
pub fn unique_names(paths: &[PathBuf]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    paths
        .iter()
        .map(|path| {
            let base = source_name(path);
            let n = seen.entry(base.clone()).or_insert(0);
            *n += 1;
            if *n == 1 { base } else { format!("{base} ({n})") }
        })
        .collect()
}

/// Read and ingest files, in argument order.
pub fn ingest_files(paths: &[PathBuf]) -> Result<Ingestion, AnalysisError> {
    let names = unique_names(paths);
    collect(
        paths
            .iter()
            .zip(names)
            .map(|(path, name)| SourceLog::read(path, name)),
    )
}

/// Ingest sources already in memory.
pub fn ingest_logs(logs: Vec<SourceLog>) -> Result<Ingestion, AnalysisError> {
    collect(logs.into_iter().map(Ok))
}

fn collect(
    sources: impl Iterator<Item = Result<SourceLog, AnalysisError>>,
) -> Result<Ingestion, AnalysisError> {
    let mut series = Vec::new();
    let mut skipped = Vec::new();

    for source in sources {
        let built = source.and_then(|log| series_from_log(&log.name, &log.lines));
        match built {
            Ok(s) => series.push(s),
            Err(err) if !err.is_fatal() => {
                log::debug!("Skipping {}: {err}", err.source_name());
                skipped.push(err);
            }
            Err(err) => return Err(err),
        }
    }

    let table = align(&series)?;
    log::info!(
        "Ingested {} sources ({} skipped), {} elapsed times",
        table.width(),
        skipped.len(),
        table.len()
    );
    Ok(Ingestion { table, skipped })
}
