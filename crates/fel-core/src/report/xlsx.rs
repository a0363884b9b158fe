//! Excel workbook output.

use rust_xlsxwriter::Workbook;

use super::{ReportRow, ReportWriter, Result, COLUMNS};

/// Writes the report to the first sheet of an xlsx workbook. Every cell
/// is a string, exactly as extracted.
pub struct XlsxReportWriter {
    sheet_name: String,
}

impl XlsxReportWriter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }
}

impl ReportWriter for XlsxReportWriter {
    fn render(&self, rows: &[ReportRow]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(self.sheet_name.as_str())?;

        for (col, header) in COLUMNS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let line = index as u32 + 1;
            for (col, value) in row.cells().into_iter().enumerate() {
                worksheet.write_string(line, col as u16, value)?;
            }
        }

        Ok(workbook.save_to_buffer()?)
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::invoice::fixtures::FACTURA;
    use crate::invoice::{FelInvoiceParser, InvoiceParser};
    use crate::report::build_rows;
    use calamine::{Reader, Xlsx};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn read_sheet(bytes: Vec<u8>, sheet: &str) -> Vec<Vec<String>> {
        let mut workbook = Xlsx::new(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range(sheet).unwrap();
        range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_render_produces_zip_container() {
        let bytes = XlsxReportWriter::new("Facturas").render(&[]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_sheet_reads_back_header_and_rows() {
        let record = FelInvoiceParser::new().parse(FACTURA.as_bytes()).unwrap().record;
        let bytes = XlsxReportWriter::new("Compras")
            .render(&build_rows(&[record]))
            .unwrap();

        let rows = read_sheet(bytes, "Compras");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], COLUMNS.to_vec());
        assert_eq!(
            rows[1],
            vec![
                "07/03/2024",
                "FACT",
                "A1B2C3D4",
                "2557891234",
                "12345678",
                "EL MARTILLO, SOCIEDAD ANONIMA",
                "1",
                "JUAN PEREZ",
                "2",
                "MARTILLO DE ACERO 16 OZ",
                "Bien",
                "56.00",
                "112.00",
                "",
                "162.00",
                "17.36",
                "0",
                "0",
                "0",
                "0",
                "0",
                "0",
            ]
        );
        assert_eq!(rows[2][9], "INSTALACION");
        assert_eq!(rows[2][10], "Servicio");
    }

    #[test]
    fn test_invalid_sheet_name() {
        let result = XlsxReportWriter::new("a/b").render(&[]);
        assert!(matches!(result, Err(ReportError::Xlsx(_))));
    }
}
