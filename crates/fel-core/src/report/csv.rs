//! CSV output.

use crate::error::ReportError;

use super::{ReportRow, ReportWriter, Result, COLUMNS};

/// Writes the report as comma-separated values with a header line.
#[derive(Debug, Default)]
pub struct CsvReportWriter;

impl CsvReportWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportWriter for CsvReportWriter {
    fn render(&self, rows: &[ReportRow]) -> Result<Vec<u8>> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        wtr.write_record(COLUMNS)?;
        for row in rows {
            wtr.write_record(row.cells())?;
        }

        wtr.into_inner().map_err(|e| ReportError::Io(e.into_error()))
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}
