use crate::output::traits::{ExportResult, Exporter};
use crate::output::ExportFormat;
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Column header of the single worksheet
const HEADER: &str = "URL";

/// Longest string an Excel cell accepts, in characters
const MAX_CELL_CHARS: usize = 32_767;

/// Rows left for URLs once the header takes the first of the 1,048,576
const MAX_DATA_ROWS: usize = 1_048_575;

/// Cuts `url` down to what a single cell can hold
fn fit_cell(url: &str) -> &str {
    match url.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => &url[..cut],
        None => url,
    }
}

/// Number of URLs that fit on the sheet
fn sheet_rows(count: usize) -> usize {
    count.min(MAX_DATA_ROWS)
}

/// Writes one worksheet with a `URL` column and one URL per row, no index column
///
/// The sheet limits cannot fail the export: URLs past the last row are left
/// out and over-long URLs are truncated, each with a warning. The CSV and JSON
/// artifacts always carry the full set.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxExporter;

impl XlsxExporter {
    /// Builds the workbook in memory
    pub fn build_workbook(&self, urls: &[String]) -> ExportResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 0, HEADER)?;

        let rows = sheet_rows(urls.len());
        if rows < urls.len() {
            tracing::warn!(
                "XLSX sheet is full: leaving {} of {} URLs out",
                urls.len() - rows,
                urls.len()
            );
        }

        let mut truncated = 0usize;
        for (row, url) in (1u32..).zip(&urls[..rows]) {
            let cell = fit_cell(url);
            if cell.len() < url.len() {
                truncated += 1;
            }
            worksheet.write_string(row, 0, cell)?;
        }

        if truncated > 0 {
            tracing::warn!(
                "{} URLs longer than {} characters were truncated in the XLSX export",
                truncated,
                MAX_CELL_CHARS
            );
        }

        Ok(workbook)
    }
}

impl Exporter for XlsxExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xlsx
    }

    fn write(&self, urls: &[String], path: &Path) -> ExportResult<()> {
        let mut workbook = self.build_workbook(urls)?;
        workbook.save(path)?;
        Ok(())
    }
}
