//! Output module for exporting crawl results
//!
//! This module handles:
//! - Selecting export formats
//! - Writing the visited set as CSV, JSON or XLSX
//! - Summarising crawl statistics

mod csv_output;
mod json_output;
pub mod stats;
mod traits;
mod xlsx_output;

pub use csv_output::CsvExporter;
pub use json_output::JsonExporter;
pub use stats::{format_statistics, print_statistics, CrawlStatistics};
pub use traits::{ExportError, ExportResult, Exporter};
pub use xlsx_output::XlsxExporter;

use std::fmt;
use std::path::{Path, PathBuf};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Json,
}

impl ExportFormat {
    /// File extension of the artifact, also used as the format tag
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Json => "json",
        }
    }

    /// Returns the exporter for this format
    pub fn exporter(&self) -> Box<dyn Exporter> {
        match self {
            Self::Csv => Box::new(CsvExporter),
            Self::Xlsx => Box::new(XlsxExporter),
            Self::Json => Box::new(JsonExporter),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Exports the visited URLs in every requested format
///
/// Creates `directory` if it does not exist and writes
/// `crawled_data.<ext>` for each format. If `urls` is empty nothing is written
/// and an empty list is returned.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths of the artifacts written, in format order
/// * `Err(ExportError)` - Creating the directory or writing an artifact failed
pub fn export_all(
    urls: &[String],
    formats: &[ExportFormat],
    directory: &Path,
) -> ExportResult<Vec<PathBuf>> {
    if formats.is_empty() {
        return Ok(Vec::new());
    }

    if urls.is_empty() {
        tracing::warn!("No data to export.");
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(directory)?;

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        tracing::debug!("Writing {} export", format);
        let exporter = format.exporter();
        let path = exporter.artifact_path(directory);
        exporter.write(urls, &path)?;
        tracing::info!("Data exported successfully: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
