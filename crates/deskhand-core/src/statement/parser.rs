//! Card statement parser.
//!
//! Statement PDFs hard-wrap each transaction row over several physical
//! lines, with the amount landing below the merchant description. The
//! parser first recombines the wrapped lines of each page back into
//! logical rows, then pulls the date, description, and amount out of
//! each row and drops activity that is not a purchase.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::transaction::Transaction;
use crate::scan::find_anchor;

/// Column header line that opens the transaction table on a page.
const TRANSACTION_TABLE_ANCHOR: &str =
    "TRANSACTION POSTINGACTIVITY DESCRIPTION AMOUNT ($)DATE DATE";

/// Separator inserted between physical lines of a recombined row. It
/// keeps the original line boundaries visible to the row pattern.
const LINE_SEPARATOR: &str = " ||| ";

/// Activity categories that are not purchases.
const EXCLUDE_KEYWORDS: [&str; 5] = ["PAYMENT", "CREDIT", "REFUND", "RETURN", "INTEREST"];

lazy_static! {
    /// One logical row: transaction date, posting date, merchant
    /// description running to the first separator, then the first
    /// dollar amount anywhere after it.
    static ref TRANSACTION_ROW: Regex = Regex::new(
        r"(?P<date>\w{3} \d{2})\s+\w{3} \d{2}\s+(?P<name>.+?)\s+\|\|\|.*?(?P<amount>\$[\d,]+\.\d{2})"
    )
    .unwrap();
}

/// Parser for card statement documents.
#[derive(Debug, Default)]
pub struct StatementParser;

impl StatementParser {
    /// Create a new statement parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse the per-page text lines of a statement into purchases.
    pub fn parse(&self, pages: &[Vec<String>]) -> Vec<Transaction> {
        let rows = recombined_rows(pages);
        let transactions: Vec<Transaction> = rows
            .iter()
            .map(String::as_str)
            .filter_map(extract_transaction)
            .collect();
        debug!(
            "extracted {} purchases from {} recombined rows",
            transactions.len(),
            rows.len()
        );
        transactions
    }
}

/// Rebuild logical transaction rows from hard-wrapped page lines.
///
/// On each page the rows start below the table header. Physical lines
/// are accumulated into a buffer, joined by the separator, until a
/// dollar sign appears; the buffer is then flushed as one row. Pages
/// without the header contribute nothing, and a trailing fragment that
/// never reaches an amount is dropped with the page.
fn recombined_rows(pages: &[Vec<String>]) -> Vec<String> {
    let mut rows = Vec::new();

    for (page_idx, lines) in pages.iter().enumerate() {
        let Some(header) = find_anchor(lines, TRANSACTION_TABLE_ANCHOR) else {
            continue;
        };

        let page_start = rows.len();
        let mut buffer = String::new();
        for line in &lines[header + 1..] {
            if buffer.is_empty() {
                buffer.push_str(line);
            } else {
                buffer.push_str(LINE_SEPARATOR);
                buffer.push_str(line);
            }
            if buffer.contains('$') {
                rows.push(std::mem::take(&mut buffer));
            }
        }
        debug!("page {}: {} rows", page_idx + 1, rows.len() - page_start);
    }

    rows
}

/// Pull one purchase out of a recombined row, if it holds one.
fn extract_transaction(row: &str) -> Option<Transaction> {
    let caps = TRANSACTION_ROW.captures(row)?;

    let description = caps["name"].trim().to_string();
    if EXCLUDE_KEYWORDS.iter().any(|kw| description.contains(kw)) {
        return None;
    }

    let amount: f64 = caps["amount"].replace('$', "").replace(',', "").parse().ok()?;

    Some(Transaction {
        date: caps["date"].to_string(),
        description,
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "TRANSACTION POSTINGACTIVITY DESCRIPTION AMOUNT ($)DATE DATE";

    fn page(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_parse_single_page() {
        let pages = vec![page(&[
            "CARD STATEMENT",
            HEADER,
            "Sep 03 Sep 04 HOME HARDWARE #1234 OTTAWA",
            "$104.50",
            "Sep 05 Sep 05 PAYMENT - THANK YOU",
            "-$500.00",
            "Sep 07 Sep 08 COSTCO WHOLESALE #55",
            "$89.99",
        ])];

        let transactions = StatementParser::new().parse(&pages);
        assert_eq!(transactions.len(), 2);

        assert_eq!(transactions[0].date, "Sep 03");
        assert_eq!(transactions[0].description, "HOME HARDWARE #1234 OTTAWA");
        assert_eq!(transactions[0].amount, 104.50);

        assert_eq!(transactions[1].description, "COSTCO WHOLESALE #55");
        assert_eq!(transactions[1].amount, 89.99);
    }

    #[test]
    fn test_amount_with_thousands_separator() {
        let pages = vec![page(&[
            HEADER,
            "Sep 10 Sep 11 TIMBER MART OTTAWA",
            "$1,204.50",
        ])];

        let transactions = StatementParser::new().parse(&pages);
        assert_eq!(transactions[0].amount, 1204.50);
    }

    #[test]
    fn test_row_wrapped_over_three_lines() {
        let pages = vec![page(&[
            HEADER,
            "Sep 12 Sep 13 AMAZON.CA MARKETPLACE",
            "12.99 USD @ 1.3500",
            "$17.54",
        ])];

        let transactions = StatementParser::new().parse(&pages);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].description, "AMAZON.CA MARKETPLACE");
        assert_eq!(transactions[0].amount, 17.54);
    }

    #[test]
    fn test_pages_are_scanned_independently() {
        let pages = vec![
            page(&[
                HEADER,
                "Sep 03 Sep 04 HOME HARDWARE #1234",
                "$104.50",
            ]),
            page(&["Summary of fees", "no table on this page"]),
            page(&[
                HEADER,
                "Oct 01 Oct 02 GAS BAR #9",
                "$60.00",
            ]),
        ];

        let transactions = StatementParser::new().parse(&pages);
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[1].date, "Oct 01");
    }

    #[test]
    fn test_trailing_fragment_is_dropped() {
        let pages = vec![page(&[
            HEADER,
            "Sep 03 Sep 04 HOME HARDWARE #1234",
            "$104.50",
            "Sep 09 Sep 10 ROW THAT NEVER GETS AN AMOUNT",
        ])];

        let transactions = StatementParser::new().parse(&pages);
        assert_eq!(transactions.len(), 1);
    }

    #[test]
    fn test_exclusion_is_case_sensitive() {
        let pages = vec![page(&[
            HEADER,
            "Sep 05 Sep 05 INTEREST CHARGE",
            "$3.10",
            "Sep 06 Sep 06 Interest Free Furniture",
            "$250.00",
        ])];

        let transactions = StatementParser::new().parse(&pages);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].description, "Interest Free Furniture");
    }

    #[test]
    fn test_amount_is_taken_after_the_first_break() {
        let pages = vec![page(&[
            HEADER,
            "OCT 14 OCT 15 ACME HARDWARE STORE",
            "foo $123.45",
        ])];

        let transactions = StatementParser::new().parse(&pages);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].date, "OCT 14");
        assert_eq!(transactions[0].description, "ACME HARDWARE STORE");
        assert_eq!(transactions[0].amount, 123.45);
    }

    #[test]
    fn test_parse_is_repeatable() {
        let pages = vec![page(&[
            HEADER,
            "Sep 03 Sep 04 HOME HARDWARE #1234",
            "$104.50",
        ])];

        let parser = StatementParser::new();
        assert_eq!(parser.parse(&pages), parser.parse(&pages));
    }

    #[test]
    fn test_row_without_both_dates_is_ignored() {
        let pages = vec![page(&[
            HEADER,
            "TOTAL NEW BALANCE",
            "$2,014.99",
        ])];

        assert!(StatementParser::new().parse(&pages).is_empty());
    }

    #[test]
    fn test_no_pages() {
        assert!(StatementParser::new().parse(&[]).is_empty());
    }
}
