use crate::output::traits::{ExportResult, Exporter};
use crate::output::ExportFormat;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a single JSON array of URL strings, indented by four spaces
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl JsonExporter {
    /// Writes the JSON document to any writer
    pub fn write_to<W: Write>(&self, urls: &[String], writer: W) -> ExportResult<()> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(writer, formatter);
        urls.serialize(&mut serializer)?;
        serializer.into_inner().flush()?;
        Ok(())
    }
}

impl Exporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn write(&self, urls: &[String], path: &Path) -> ExportResult<()> {
        let file = BufWriter::new(File::create(path)?);
        self.write_to(urls, file)
    }
}
