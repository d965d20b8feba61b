//! Job order parsing module.

mod parser;

pub use parser::JobOrderParser;

use crate::catalog::Catalog;
use crate::error::JobOrderError;
use crate::models::invoice::JobRecord;
use crate::pdf::{PdfExtractor, PdfSource};

/// Result type for job order parsing.
pub type Result<T> = std::result::Result<T, JobOrderError>;

/// Parse one job order PDF into invoice records.
///
/// Job orders are single-page documents; only the first page is read.
pub fn records_from_pdf(data: &[u8], catalog: &Catalog) -> crate::error::Result<Vec<JobRecord>> {
    let pdf = PdfExtractor::from_bytes(data)?;
    let lines = pdf.page_lines(1)?;
    let records = JobOrderParser::new(catalog).parse(&lines)?;
    Ok(records)
}
