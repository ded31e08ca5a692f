//! Latency analysis for timestamped ping logs.
//!
//! Pipeline: files → [`probe::trim`] → [`probe::parse_line`] → [`series::build_series`]
//! → [`table::align`] → [`stats::describe`] and [`smooth::smooth`] → [`report`].

pub mod config;
pub mod error;
pub mod ingest;
pub mod probe;
pub mod report;
pub mod series;
pub mod smooth;
pub mod stats;
pub mod styling;
pub mod table;

pub use error::AnalysisError;
pub use ingest::{Ingestion, ingest_files};
pub use table::{AlignedTable, SmoothedTable};
