//! Card statement parsing module.

mod parser;

pub use parser::StatementParser;

use crate::models::transaction::Transaction;
use crate::pdf::{PdfExtractor, PdfSource};

/// Parse one card statement PDF into purchase transactions.
///
/// Statements spread their transaction table over several pages, so
/// every page is read. A statement with no recognizable rows yields an
/// empty list rather than an error.
pub fn transactions_from_pdf(data: &[u8]) -> crate::error::Result<Vec<Transaction>> {
    let pdf = PdfExtractor::from_bytes(data)?;
    let pages = pdf.all_page_lines()?;
    Ok(StatementParser::new().parse(&pages))
}
