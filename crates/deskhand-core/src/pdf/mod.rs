//! PDF text acquisition module.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text sources.
///
/// The document parsers consume plain text lines, so this seam keeps
/// them independent of the extraction backend.
pub trait PdfSource {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract the text lines of a specific page (1-indexed).
    fn page_lines(&self, page: u32) -> Result<Vec<String>>;

    /// Extract the text lines of every page, in page order.
    fn all_page_lines(&self) -> Result<Vec<Vec<String>>>;
}
