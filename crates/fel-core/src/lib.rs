//! Core library for Guatemalan electronic invoices (DTE/FEL).
//!
//! This crate provides:
//! - A namespace-aware XML element tree built on quick-xml
//! - FEL invoice field extraction into a normalized record
//! - Tax total reconciliation against the fixed SAT tax categories
//! - Batch aggregation and flattening into one row per line item
//! - Spreadsheet (xlsx) and CSV report writers

pub mod batch;
pub mod error;
pub mod invoice;
pub mod models;
pub mod report;
pub mod xml;

pub use batch::{extract_batch, BatchOutcome, DocumentFailure, SourceDocument};
pub use error::{ExtractionError, FelError, InputError, ReportError, Result};
pub use invoice::{ExtractionResult, FelInvoiceParser, InvoiceParser, ItemPolicy};
pub use models::config::FelConfig;
pub use models::record::{InvoiceRecord, ItemKind, LineItem, TaxAmounts, TaxCategory};
pub use report::{build_rows, ReportRow, ReportWriter, COLUMNS};
pub use xml::{Element, FEL_NAMESPACE};
