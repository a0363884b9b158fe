//! FEL invoice parser.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::models::config::ExtractionConfig;
use crate::models::record::{InvoiceRecord, ItemKind, LineItem, TaxAmounts, MISSING_VALUE, ZERO_AMOUNT};
use crate::error::ExtractionError;
use crate::xml::{Element, FEL_NAMESPACE};

use super::rules::{is_calendar_date, reconcile_taxes, reverse_date_segments};
use super::{ItemPolicy, Result};

/// Result of invoice extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted invoice record.
    pub record: InvoiceRecord,
    /// Non-fatal problems noticed while extracting.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for invoice parsing.
pub trait InvoiceParser {
    /// Parse one invoice document.
    fn parse(&self, xml: &[u8]) -> Result<ExtractionResult>;
}

/// Parser for SAT Guatemala FEL documents.
///
/// General data, issuer and receiver nodes are required; a document
/// without them fails. Totals and certification are optional. Absent
/// attributes never fail, they read as the configured missing value.
pub struct FelInvoiceParser {
    /// Namespace URI elements must belong to.
    namespace: String,
    /// Placeholder for absent attributes.
    missing_value: String,
    /// Handling of incomplete items.
    item_policy: ItemPolicy,
}

impl FelInvoiceParser {
    /// Create a parser for FEL 0.2.0 with default settings.
    pub fn new() -> Self {
        Self {
            namespace: FEL_NAMESPACE.to_string(),
            missing_value: MISSING_VALUE.to_string(),
            item_policy: ItemPolicy::FailDocument,
        }
    }

    /// Create a parser from the extraction section of the configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_namespace(config.namespace.clone())
            .with_missing_value(config.missing_value.clone())
            .with_item_policy(config.item_policy)
    }

    /// Set the namespace URI.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the placeholder for absent attributes.
    pub fn with_missing_value(mut self, missing_value: impl Into<String>) -> Self {
        self.missing_value = missing_value.into();
        self
    }

    /// Set the incomplete item policy.
    pub fn with_item_policy(mut self, policy: ItemPolicy) -> Self {
        self.item_policy = policy;
        self
    }

    fn required<'e>(&self, root: &'e Element, name: &'static str) -> Result<&'e Element> {
        root.find(&self.namespace, name)
            .ok_or(ExtractionError::MissingNode(name))
    }

    fn attr(&self, element: &Element, name: &str) -> String {
        element.attr_or(name, &self.missing_value).to_string()
    }

    fn extract_items(&self, root: &Element, warnings: &mut Vec<String>) -> Result<Vec<LineItem>> {
        let mut items = Vec::new();

        for (index, node) in root.find_all(&self.namespace, "Item").enumerate() {
            match self.extract_item(node, index + 1) {
                Ok(item) => items.push(item),
                Err(e) if self.item_policy == ItemPolicy::SkipItem => {
                    warn!("Skipping item: {}", e);
                    warnings.push(e.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        Ok(items)
    }

    fn extract_item(&self, item: &Element, ordinal: usize) -> Result<LineItem> {
        let text = |field: &'static str| {
            item.child(&self.namespace, field)
                .map(|e| e.text().to_string())
                .ok_or(ExtractionError::MissingItemField { item: ordinal, field })
        };

        Ok(LineItem {
            quantity: text("Cantidad")?,
            description: text("Descripcion")?,
            kind: ItemKind::from_code(item.attr("BienOServicio")),
            unit_price: text("PrecioUnitario")?,
            line_total: text("Total")?,
        })
    }

    fn extract_grand_total(&self, root: &Element) -> String {
        root.find(&self.namespace, "Totales")
            .and_then(|totals| totals.child(&self.namespace, "GranTotal"))
            .map(|e| e.text().to_string())
            .unwrap_or_else(|| self.missing_value.clone())
    }

    fn extract_taxes(&self, root: &Element) -> TaxAmounts {
        reconcile_taxes(root.find_all(&self.namespace, "TotalImpuesto").map(|node| {
            (
                node.attr_or("NombreCorto", &self.missing_value),
                node.attr_or("TotalMontoImpuesto", ZERO_AMOUNT),
            )
        }))
    }

    /// Authorization (series, number) from the certification block.
    fn extract_certification(&self, root: &Element) -> (String, String) {
        let authorization = root
            .find(&self.namespace, "Certificacion")
            .and_then(|c| c.find(&self.namespace, "NumeroAutorizacion"));

        match authorization {
            Some(node) => (self.attr(node, "Serie"), self.attr(node, "Numero")),
            None => (self.missing_value.clone(), self.missing_value.clone()),
        }
    }
}

impl Default for FelInvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for FelInvoiceParser {
    fn parse(&self, xml: &[u8]) -> Result<ExtractionResult> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Parsing invoice from {} bytes of XML", xml.len());

        let root = Element::parse(xml)?;

        let general = self.required(&root, "DatosGenerales")?;
        let issuer = self.required(&root, "Emisor")?;
        let receiver = self.required(&root, "Receptor")?;

        let issue_date = reverse_date_segments(general.attr_or("FechaHoraEmision", &self.missing_value));
        if !is_calendar_date(&issue_date) {
            warn!("Issue date {:?} is not a calendar date", issue_date);
            warnings.push(format!("Issue date {:?} is not a calendar date", issue_date));
        }

        let line_items = self.extract_items(&root, &mut warnings)?;
        if line_items.is_empty() {
            warnings.push("Invoice has no line items".to_string());
        }

        let (certification_series, certification_number) = self.extract_certification(&root);

        let record = InvoiceRecord {
            invoice_number: self.attr(general, "ID"),
            issue_date,
            document_type: self.attr(general, "Tipo"),
            issuer_tax_id: self.attr(issuer, "NITEmisor"),
            issuer_name: self.attr(issuer, "NombreEmisor"),
            establishment_code: self.attr(issuer, "CodigoEstablecimiento"),
            receiver_name: self.attr(receiver, "NombreReceptor"),
            line_items,
            grand_total: self.extract_grand_total(&root),
            tax_amounts: self.extract_taxes(&root),
            certification_series,
            certification_number,
        };

        debug!(
            "Extracted {} {} from {} with {} items",
            record.document_type,
            record.certification_number,
            record.issuer_name,
            record.line_items.len()
        );

        Ok(ExtractionResult {
            record,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}
