//! Batch extraction over a set of submitted documents.

use std::path::Path;

use tracing::{error, info, warn};

use crate::error::{ExtractionError, FelError, InputError, Result};
use crate::invoice::InvoiceParser;
use crate::models::record::InvoiceRecord;

/// A submitted file: its name and raw content.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// File name as submitted; decides whether the file is considered.
    pub name: String,
    pub content: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Read a file from disk, naming it after its file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, content))
    }

    /// Only names ending in `.xml` are treated as invoices. The check is
    /// on the name alone and is case-sensitive.
    pub fn is_xml(&self) -> bool {
        self.name.ends_with(".xml")
    }
}

/// A document that could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub name: String,
    pub error: ExtractionError,
}

/// Records extracted from a batch, in submission order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<InvoiceRecord>,
    /// Documents that failed; only populated when continuing on error.
    pub failures: Vec<DocumentFailure>,
    /// Names of submitted files that are not `.xml`.
    pub skipped: Vec<String>,
    /// Extraction warnings, prefixed with the document name.
    pub warnings: Vec<String>,
}

/// Extract every XML document of a batch.
///
/// By default the batch is all-or-nothing: the first failing document
/// aborts it with [`FelError::Document`]. With `continue_on_error` failures
/// are collected in [`BatchOutcome::failures`] instead, unless no document
/// at all succeeded, in which case the first failure is returned.
pub fn extract_batch<P>(
    parser: &P,
    documents: &[SourceDocument],
    continue_on_error: bool,
) -> Result<BatchOutcome>
where
    P: InvoiceParser + ?Sized,
{
    extract_batch_with_progress(parser, documents, continue_on_error, |_| {})
}

/// [`extract_batch`], calling `on_document` after each XML document.
pub fn extract_batch_with_progress<P, F>(
    parser: &P,
    documents: &[SourceDocument],
    continue_on_error: bool,
    mut on_document: F,
) -> Result<BatchOutcome>
where
    P: InvoiceParser + ?Sized,
    F: FnMut(&SourceDocument),
{
    if documents.is_empty() {
        return Err(InputError::NoFiles.into());
    }

    let mut outcome = BatchOutcome::default();
    let (xml, other): (Vec<&SourceDocument>, Vec<&SourceDocument>) =
        documents.iter().partition(|d| d.is_xml());

    for document in other {
        warn!("Skipping {}: not an .xml file", document.name);
        outcome.skipped.push(document.name.clone());
    }

    if xml.is_empty() {
        return Err(InputError::NoValidFiles.into());
    }

    for document in xml {
        match parser.parse(&document.content) {
            Ok(result) => {
                if result.record.line_items.is_empty() {
                    info!("{} has no line items and adds no rows", document.name);
                }
                outcome.warnings.extend(
                    result
                        .warnings
                        .into_iter()
                        .map(|w| format!("{}: {}", document.name, w)),
                );
                outcome.records.push(result.record);
            }
            Err(e) if continue_on_error => {
                warn!("Failed to process {}: {}", document.name, e);
                outcome.failures.push(DocumentFailure {
                    name: document.name.clone(),
                    error: e,
                });
            }
            Err(e) => {
                error!("Failed to process {}: {}", document.name, e);
                return Err(FelError::Document {
                    name: document.name.clone(),
                    source: e,
                });
            }
        }

        on_document(document);
    }

    if outcome.records.is_empty() && !outcome.failures.is_empty() {
        let first = outcome.failures.swap_remove(0);
        return Err(FelError::Document {
            name: first.name,
            source: first.error,
        });
    }

    info!(
        "Extracted {} invoices ({} failed, {} skipped)",
        outcome.records.len(),
        outcome.failures.len(),
        outcome.skipped.len()
    );

    Ok(outcome)
}
