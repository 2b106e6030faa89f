use crate::output::traits::{ExportResult, Exporter};
use crate::output::ExportFormat;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a `URL` header followed by one URL per row
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    /// Writes the CSV document to any writer
    pub fn write_to<W: Write>(&self, urls: &[String], writer: W) -> ExportResult<()> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        writer.write_record(["URL"])?;
        for url in urls {
            writer.write_record([url.as_str()])?;
        }
        writer.flush()?;

        Ok(())
    }
}

impl Exporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn write(&self, urls: &[String], path: &Path) -> ExportResult<()> {
        let file = File::create(path)?;
        self.write_to(urls, file)
    }
}
