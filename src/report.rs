// SPDX-License-Identifier: MPL-2.0
//! CSV rendering of extracted field records.
//!
//! Columns follow [`HEADERS`]; a column missing from a record is written as
//! an empty cell.

use crate::error::Result;
use crate::metadata::{Column, FieldRecord, FieldValue, HEADERS};
use std::io::Write;

/// Writes one header row followed by one row per record.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
    human_readable_size: bool,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(inner: W, human_readable_size: bool) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
            human_readable_size,
        }
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.writer.write_record(HEADERS.iter().map(|c| c.name()))?;
        Ok(())
    }

    pub fn write_record(&mut self, record: &FieldRecord) -> Result<()> {
        let row: Vec<String> = HEADERS
            .iter()
            .map(|column| self.cell(*column, record.get(*column)))
            .collect();
        self.writer.write_record(&row)?;
        Ok(())
    }

    /// Flushes buffered rows and returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| crate::error::Error::Report(e.error().to_string()))
    }

    fn cell(&self, column: Column, value: Option<&FieldValue>) -> String {
        match (column, value) {
            (_, None) => String::new(),
            (Column::Size, Some(FieldValue::Integer(bytes))) if self.human_readable_size => {
                format_file_size(u64::try_from(*bytes).unwrap_or(0))
            }
            (_, Some(value)) => value.to_string(),
        }
    }
}

/// Format file size in human-readable format.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
