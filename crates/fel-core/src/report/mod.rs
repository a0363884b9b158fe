//! Line-item report: column schema, row flattening and writers.

mod csv;
mod xlsx;

pub use self::csv::CsvReportWriter;
pub use self::xlsx::XlsxReportWriter;

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::ReportError;
use crate::models::config::{ReportConfig, ReportFormat};
use crate::models::record::{InvoiceRecord, ItemKind, LineItem, TaxAmounts};

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Header row, in output order.
pub const COLUMNS: [&str; 22] = [
    "FechaEmision",
    "TipoDocumento",
    "SerieCertificacion",
    "NumeroCertificacion",
    "NITEmisor",
    "NombreEmisor",
    "CodigoEstablecimiento",
    "NombreReceptor",
    "Cantidad",
    "Descripcion",
    "B/S",
    "PrecioUnitario",
    "Total",
    "Tasa de Alumbrado Público (Cobro Municipal)",
    "GranTotal",
    "IVA",
    "PETROLEO",
    "TURISMO HOSPEDAJE",
    "TIMBRE DE PRENSA",
    "BOMBEROS",
    "BEBIDAS ALCOHOLICAS",
    "BEBIDAS NO ALCOHOLICAS",
];

/// One report line: an invoice's header and tax fields joined with one of
/// its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub issue_date: String,
    pub document_type: String,
    pub certification_series: String,
    pub certification_number: String,
    pub issuer_tax_id: String,
    pub issuer_name: String,
    pub establishment_code: String,
    pub receiver_name: String,
    pub quantity: String,
    pub description: String,
    pub kind: ItemKind,
    pub unit_price: String,
    pub line_total: String,
    /// Municipal street lighting fee. No FEL field feeds it, so it is
    /// always empty.
    pub municipal_lighting_tax: String,
    pub grand_total: String,
    pub tax_amounts: TaxAmounts,
}

impl ReportRow {
    pub fn new(record: &InvoiceRecord, item: &LineItem) -> Self {
        Self {
            issue_date: record.issue_date.clone(),
            document_type: record.document_type.clone(),
            certification_series: record.certification_series.clone(),
            certification_number: record.certification_number.clone(),
            issuer_tax_id: record.issuer_tax_id.clone(),
            issuer_name: record.issuer_name.clone(),
            establishment_code: record.establishment_code.clone(),
            receiver_name: record.receiver_name.clone(),
            quantity: item.quantity.clone(),
            description: item.description.clone(),
            kind: item.kind,
            unit_price: item.unit_price.clone(),
            line_total: item.line_total.clone(),
            municipal_lighting_tax: String::new(),
            grand_total: record.grand_total.clone(),
            tax_amounts: record.tax_amounts.clone(),
        }
    }

    /// Cell values aligned with [`COLUMNS`].
    pub fn cells(&self) -> Vec<&str> {
        let leading: [&str; 15] = [
            &self.issue_date,
            &self.document_type,
            &self.certification_series,
            &self.certification_number,
            &self.issuer_tax_id,
            &self.issuer_name,
            &self.establishment_code,
            &self.receiver_name,
            &self.quantity,
            &self.description,
            self.kind.label(),
            &self.unit_price,
            &self.line_total,
            &self.municipal_lighting_tax,
            &self.grand_total,
        ];

        let mut cells = Vec::with_capacity(COLUMNS.len());
        cells.extend(leading);
        cells.extend(self.tax_amounts.iter().map(|(_, amount)| amount));
        cells
    }
}

/// Flatten records into one row per line item, keeping record order and
/// item order. Records without items produce no rows.
pub fn build_rows(records: &[InvoiceRecord]) -> Vec<ReportRow> {
    records
        .iter()
        .flat_map(|record| {
            record
                .line_items
                .iter()
                .map(move |item| ReportRow::new(record, item))
        })
        .collect()
}

/// Serializes the header row and report rows into a file format.
pub trait ReportWriter {
    /// Render the complete artifact in memory.
    fn render(&self, rows: &[ReportRow]) -> Result<Vec<u8>>;

    /// File extension of the rendered artifact, without the dot.
    fn extension(&self) -> &'static str;
}

/// Writer for the configured format.
pub fn writer_for(config: &ReportConfig) -> Box<dyn ReportWriter> {
    match config.format {
        ReportFormat::Xlsx => Box::new(XlsxReportWriter::new(config.sheet_name.clone())),
        ReportFormat::Csv => Box::new(CsvReportWriter::new()),
    }
}

/// Render `rows` and place the artifact at `path`.
///
/// The bytes are written to a temporary file next to `path` and moved into
/// place only once complete, so a failure never leaves a partial report.
pub fn save_report(writer: &dyn ReportWriter, rows: &[ReportRow], path: &Path) -> Result<()> {
    let bytes = writer.render(rows)?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = tempfile::Builder::new()
        .prefix(".fel-report-")
        .suffix(".part")
        .tempfile_in(dir)?;
    file.write_all(&bytes)?;
    file.flush()?;

    debug!("Persisting {} bytes from {}", bytes.len(), file.path().display());
    file.persist(path)?;

    Ok(())
}
