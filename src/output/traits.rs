//! Exporter trait and export errors
//!
//! Each export format is one implementation of [`Exporter`]. The crawl hands
//! the finished visited set to every selected exporter in turn.

use crate::output::ExportFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing an export artifact
///
/// Unlike per-page crawl failures these are fatal for the run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Trait for export targets
///
/// Implementations write one artifact holding every visited URL.
pub trait Exporter {
    /// The format this exporter produces
    fn format(&self) -> ExportFormat;

    /// Writes `urls` to `path`, replacing any existing file
    fn write(&self, urls: &[String], path: &Path) -> ExportResult<()>;

    /// Artifact path inside `directory`: `crawled_data.<ext>`
    fn artifact_path(&self, directory: &Path) -> PathBuf {
        directory.join(format!("crawled_data.{}", self.format().extension()))
    }
}
