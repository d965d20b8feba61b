//! Job order document parser.
//!
//! A job order carries one service address and a table of installed
//! items. Parsing finds both by anchor lines, normalizes each item row
//! against the catalog, and emits a bracket/install record pair per
//! row, all tagged with the service address.

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::JobOrderError;
use crate::models::invoice::JobRecord;
use crate::scan::find_anchor;

use super::Result;

/// Header line that opens the item table.
const ITEM_TABLE_ANCHOR: &str = "Product/Service Description Qty.";

/// Marker that ends the service address block.
const ADDRESS_TERMINATOR: &str = "Job #";

/// Suffix turning a bracket code into its install charge code.
const INSTALL_SUFFIX: char = 'I';

/// Length designators that mark a line as an item row. Matched as
/// substrings of the line with all whitespace removed.
const LENGTH_TOKENS: [&str; 12] = [
    "1ft", "2ft", "3ft", "3.5ft", "4ft", "4.5ft", "5ft", "6ft", "7ft", "8ft", "9ft", "10ft",
];

/// An address anchor and the offset from it to the first address line.
struct AddressRule {
    marker: &'static str,
    offset: usize,
}

/// Known job order layouts, in precedence order. The table layout puts
/// the address right under its label; the letter layout has one line
/// of boilerplate in between.
const ADDRESS_RULES: [AddressRule; 2] = [
    AddressRule {
        marker: "SERVICE ADDRESS:",
        offset: 1,
    },
    AddressRule {
        marker: "RECIPIENT:",
        offset: 2,
    },
];

/// Parser for job order documents.
pub struct JobOrderParser<'a> {
    catalog: &'a Catalog,
}

impl<'a> JobOrderParser<'a> {
    /// Create a parser resolving items against the given catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Parse the text lines of a job order page into invoice records.
    ///
    /// Records come out in table order, each item row contributing a
    /// bracket record followed by its install record.
    pub fn parse(&self, lines: &[String]) -> Result<Vec<JobRecord>> {
        let address = service_address(lines)?;
        let items = self.item_quantities(lines)?;
        debug!("parsed job order: {} item rows at {}", items.len(), address);

        let mut records = Vec::with_capacity(items.len() * 2);
        for (code, quantity) in items {
            let quantity = quantity.to_string();
            records.push(JobRecord {
                item_code: code.to_string(),
                address: address.clone(),
                quantity: quantity.clone(),
            });
            records.push(JobRecord {
                item_code: format!("{code}{INSTALL_SUFFIX}"),
                address: address.clone(),
                quantity,
            });
        }
        Ok(records)
    }

    /// Collect (item code, quantity) pairs from the item table.
    fn item_quantities(&self, lines: &[String]) -> Result<Vec<(&'static str, u32)>> {
        let header =
            find_anchor(lines, ITEM_TABLE_ANCHOR).ok_or(JobOrderError::MissingItemAnchor)?;

        let mut items = Vec::new();
        for line in &lines[header + 1..] {
            if !is_item_row(line) {
                break;
            }
            let (description, quantity) = normalize_item_row(line)?;
            let code = self
                .catalog
                .lookup(&description)
                .ok_or(JobOrderError::UnknownCatalogItem(description))?;
            items.push((code, quantity));
        }
        Ok(items)
    }
}

/// Assemble the service address from the lines under the first
/// matching address anchor.
fn service_address(lines: &[String]) -> Result<String> {
    let start = ADDRESS_RULES
        .iter()
        .find_map(|rule| find_anchor(lines, rule.marker).map(|idx| idx + rule.offset))
        .ok_or(JobOrderError::MissingAddressAnchor)?;

    let mut parts = Vec::new();
    for line in &lines[start.min(lines.len())..] {
        match line.split_once(ADDRESS_TERMINATOR) {
            Some((before, _)) => {
                // The terminator may own the whole line; an empty
                // fragment adds nothing to the address.
                let before = before.trim();
                if !before.is_empty() {
                    parts.push(before.to_string());
                }
                break;
            }
            None => parts.push(line.trim().to_string()),
        }
    }
    Ok(parts.join(", "))
}

/// A line is an item row if, ignoring whitespace, it mentions one of
/// the length designators.
fn is_item_row(line: &str) -> bool {
    let squeezed: String = line.split_whitespace().collect();
    LENGTH_TOKENS.iter().any(|token| squeezed.contains(token))
}

/// Split an item row into its normalized description and quantity.
fn normalize_item_row(line: &str) -> Result<(String, u32)> {
    let mut parts: Vec<String> = line.split_whitespace().map(str::to_string).collect();

    // Rejoin a length designator the text extraction split apart,
    // e.g. "4 ft" -> "4ft".
    if parts.len() >= 2 && parts[1] == "ft" {
        parts[1] = format!("{}{}", parts[0], parts[1]);
        parts.remove(0);
    }

    let malformed = || JobOrderError::MalformedItemLine(line.trim().to_string());
    let quantity: u32 = parts
        .last()
        .ok_or_else(malformed)?
        .parse()
        .map_err(|_| malformed())?;

    // Leading column such as an ordinal gets dropped when the length
    // designator sits in the second token.
    let skip = usize::from(parts.len() >= 2 && parts[1].contains("ft"));
    let mut description = parts[skip..parts.len() - 1].join(" ").to_lowercase();
    if description.contains("support") {
        description = description.replace("support", "straight");
    }

    Ok((description, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    fn parse(text: &str) -> Result<Vec<JobRecord>> {
        let catalog = Catalog::standard();
        let records = JobOrderParser::new(&catalog).parse(&lines(text))?;
        Ok(records)
    }

    const TABLE_LAYOUT: &str = "\
Work Order
SERVICE ADDRESS:
12 Pine Crt
Ottawa ON Job #1204
Product/Service Description Qty.
4ft Straight Bracket 3
6ft Garage Bracket 1
Subtotal 4";

    #[test]
    fn test_parse_table_layout() {
        let records = parse(TABLE_LAYOUT).unwrap();
        assert_eq!(records.len(), 4);

        assert_eq!(records[0].item_code, "4S");
        assert_eq!(records[1].item_code, "4SI");
        assert_eq!(records[2].item_code, "6G");
        assert_eq!(records[3].item_code, "6GI");

        for record in &records {
            assert_eq!(record.address, "12 Pine Crt, Ottawa ON");
        }
        assert_eq!(records[0].quantity, "3");
        assert_eq!(records[2].quantity, "1");
    }

    #[test]
    fn test_parse_letter_layout() {
        let text = "\
RECIPIENT:
Please complete the work below.
45 Birch Ave Unit 2
Kanata ON
Job #88
Product/Service Description Qty.
2ft WWE 5";
        let records = parse(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].item_code, "2W");
        assert_eq!(records[0].address, "45 Birch Ave Unit 2, Kanata ON");
    }

    #[test]
    fn test_terminator_on_its_own_line_adds_nothing() {
        let text = "\
SERVICE ADDRESS:
12 Pine Crt
Job #123
Product/Service Description Qty.
4ft Hump 1";
        let records = parse(text).unwrap();
        assert_eq!(records[0].address, "12 Pine Crt");
    }

    #[test]
    fn test_first_address_rule_wins() {
        let text = "\
RECIPIENT:
boilerplate
SERVICE ADDRESS:
9 Oak St Job #7
Product/Service Description Qty.
4ft Hump 1";
        let records = parse(text).unwrap();
        assert_eq!(records[0].address, "9 Oak St");
    }

    #[test]
    fn test_address_terminator_on_anchor_line() {
        let text = "\
SERVICE ADDRESS:
9 Oak St Job #7
Product/Service Description Qty.
4ft Hump 2";
        let records = parse(text).unwrap();
        assert_eq!(records[0].address, "9 Oak St");
        assert_eq!(records[0].item_code, "4H");
        assert_eq!(records[1].item_code, "4HI");
    }

    #[test]
    fn test_missing_address_anchor() {
        let text = "\
Work Order
Product/Service Description Qty.
4ft Hump 2";
        assert!(matches!(
            parse(text),
            Err(JobOrderError::MissingAddressAnchor)
        ));
    }

    #[test]
    fn test_missing_item_anchor() {
        let text = "\
SERVICE ADDRESS:
9 Oak St Job #7";
        assert!(matches!(parse(text), Err(JobOrderError::MissingItemAnchor)));
    }

    #[test]
    fn test_empty_item_table() {
        let text = "\
SERVICE ADDRESS:
9 Oak St Job #7
Product/Service Description Qty.
Notes: leave gate open";
        assert_eq!(parse(text).unwrap(), vec![]);
    }

    #[test]
    fn test_split_length_designator_is_rejoined() {
        let text = "\
SERVICE ADDRESS:
9 Oak St Job #7
Product/Service Description Qty.
4 ft Straight Bracket 2";
        let records = parse(text).unwrap();
        assert_eq!(records[0].item_code, "4S");
        assert_eq!(records[0].quantity, "2");
    }

    #[test]
    fn test_support_is_normalized_to_straight() {
        let text = "\
SERVICE ADDRESS:
9 Oak St Job #7
Product/Service Description Qty.
3.5ft Support Bracket 4";
        let records = parse(text).unwrap();
        assert_eq!(records[0].item_code, "3.5S");
    }

    #[test]
    fn test_leading_ordinal_column_is_dropped() {
        let text = "\
SERVICE ADDRESS:
9 Oak St Job #7
Product/Service Description Qty.
1 7ft HD Bracket 2";
        let records = parse(text).unwrap();
        assert_eq!(records[0].item_code, "7HD");
    }

    #[test]
    fn test_unknown_item_reports_description() {
        let text = "\
SERVICE ADDRESS:
9 Oak St Job #7
Product/Service Description Qty.
11ft Straight Bracket 2";
        match parse(text) {
            Err(JobOrderError::UnknownCatalogItem(desc)) => {
                assert_eq!(desc, "11ft straight bracket");
            }
            other => panic!("expected UnknownCatalogItem, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_quantity() {
        let text = "\
SERVICE ADDRESS:
9 Oak St Job #7
Product/Service Description Qty.
4ft Straight Bracket two";
        assert!(matches!(
            parse(text),
            Err(JobOrderError::MalformedItemLine(_))
        ));
    }

    #[test]
    fn test_table_stops_at_first_non_item_line() {
        let text = "\
SERVICE ADDRESS:
9 Oak St Job #7
Product/Service Description Qty.
4ft Straight Bracket 2
Subtotal 2
6ft Garage Bracket 1";
        let records = parse(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].item_code, "4S");
    }

    #[test]
    fn test_is_item_row_ignores_internal_spaces() {
        assert!(is_item_row("3. 5ft Straight Bracket 1"));
        assert!(is_item_row("4 ft Straight Bracket 2"));
        assert!(!is_item_row("Subtotal 4"));
    }
}
