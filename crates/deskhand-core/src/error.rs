//! Error types for the deskhand-core library.

use thiserror::Error;

/// Main error type for the deskhand library.
#[derive(Error, Debug)]
pub enum DeskhandError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Job order parsing error.
    #[error("job order error: {0}")]
    JobOrder(#[from] JobOrderError),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to job order parsing.
#[derive(Error, Debug)]
pub enum JobOrderError {
    /// No recognized address anchor appears in the document.
    #[error("no service address anchor found")]
    MissingAddressAnchor,

    /// The item table header line is missing.
    #[error("item table header not found")]
    MissingItemAnchor,

    /// An item description has no code in the catalog.
    #[error("no catalog code for item: {0}")]
    UnknownCatalogItem(String),

    /// An item row did not end in an integer quantity.
    #[error("item line has no trailing quantity: {0}")]
    MalformedItemLine(String),
}

/// Result type for the deskhand library.
pub type Result<T> = std::result::Result<T, DeskhandError>;
