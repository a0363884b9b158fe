//! Invoice field extraction module.

mod parser;
pub mod rules;

#[cfg(test)]
pub(crate) mod fixtures;

pub use parser::{ExtractionResult, FelInvoiceParser, InvoiceParser};

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Handling of an `Item` that lacks a quantity, description, unit price
/// or total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemPolicy {
    /// Fail the whole document.
    #[default]
    FailDocument,
    /// Drop the item, record a warning and keep going.
    SkipItem,
}
