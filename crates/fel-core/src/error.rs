//! Error types for the fel-core library.

use thiserror::Error;

/// Main error type for the fel library.
#[derive(Error, Debug)]
pub enum FelError {
    /// The submitted batch cannot be processed at all.
    #[error("{0}")]
    Input(#[from] InputError),

    /// Invoice extraction error outside of a named batch document.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Extraction failed for one document of a batch.
    #[error("{name}: {source}")]
    Document {
        name: String,
        #[source]
        source: ExtractionError,
    },

    /// Report rendering or saving failed.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// User-correctable problems with the submitted files.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    /// Nothing was submitted.
    #[error("no file submitted")]
    NoFiles,

    /// Files were submitted but none of them has an `.xml` name.
    #[error("no valid XML files found among submitted files")]
    NoValidFiles,
}

/// Errors raised while extracting a single invoice document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The document is not well-formed XML.
    #[error("malformed XML: {0}")]
    MalformedXml(String),

    /// A node the record cannot be built without is absent.
    #[error("missing required node: {0}")]
    MissingNode(&'static str),

    /// An item lacks one of its value children.
    #[error("item {item} is missing required field {field}")]
    MissingItemField { item: usize, field: &'static str },
}

/// Errors related to report output.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Spreadsheet serialization failed.
    #[error("xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// CSV serialization failed.
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Moving the temporary artifact to its final path failed.
    #[error("failed to persist report: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Result type for the fel library.
pub type Result<T> = std::result::Result<T, FelError>;
