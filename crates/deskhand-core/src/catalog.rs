//! Billable item catalog.
//!
//! Maps the normalized item descriptions that appear on job orders to
//! the short item codes used on invoices. The product line changes
//! rarely, so the catalog ships as a fixed table; adding a product
//! means adding one entry here.

use std::collections::HashMap;

/// Normalized description to item code, one entry per product.
///
/// Descriptions are lowercase with single spaces, exactly as produced
/// by job order item normalization.
const STANDARD_ITEMS: &[(&str, &str)] = &[
    ("1ft straight bracket", "1S"),
    ("2ft straight bracket", "2S"),
    ("2ft wwe", "2W"),
    ("3ft straight bracket", "3S"),
    ("3ft wwe", "3W"),
    ("3.5ft straight bracket", "3.5S"),
    ("4ft straight bracket", "4S"),
    ("4ft wwe", "4W"),
    ("4.5ft straight bracket", "4.5S"),
    ("5ft straight bracket", "5S"),
    ("5ft wwe", "5W"),
    ("6ft straight bracket", "6S"),
    ("7ft straight bracket", "7S"),
    ("8ft straight bracket", "8S"),
    ("9ft straight bracket", "9S"),
    ("10ft straight bracket", "10S"),
    ("2ft corner bracket", "2C"),
    ("3ft corner bracket", "3C"),
    ("4ft corner bracket", "4C"),
    ("5ft corner bracket", "5C"),
    ("6ft corner bracket", "6C"),
    ("7ft corner bracket", "7C"),
    ("6ft garage bracket", "6G"),
    ("7ft garage bracket", "7G"),
    ("8ft garage bracket", "8G"),
    ("7ft hd bracket", "7HD"),
    ("8ft hd bracket", "8HD"),
    ("9ft hd bracket", "9HD"),
    ("10ft hd bracket", "10HD"),
    ("4ft hump", "4H"),
];

/// Lookup table from item description to invoice item code.
#[derive(Debug, Clone)]
pub struct Catalog {
    codes: HashMap<&'static str, &'static str>,
}

impl Catalog {
    /// The standard product catalog.
    pub fn standard() -> Self {
        Self {
            codes: STANDARD_ITEMS.iter().copied().collect(),
        }
    }

    /// Look up the item code for a normalized description.
    pub fn lookup(&self, description: &str) -> Option<&'static str> {
        self.codes.get(description).copied()
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_size() {
        assert_eq!(Catalog::standard().len(), 30);
    }

    #[test]
    fn test_lookup_known_items() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.lookup("4ft straight bracket"), Some("4S"));
        assert_eq!(catalog.lookup("3.5ft straight bracket"), Some("3.5S"));
        assert_eq!(catalog.lookup("10ft hd bracket"), Some("10HD"));
        assert_eq!(catalog.lookup("4ft hump"), Some("4H"));
        assert_eq!(catalog.lookup("2ft wwe"), Some("2W"));
    }

    #[test]
    fn test_lookup_requires_normalized_form() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.lookup("4ft Straight Bracket"), None);
        assert_eq!(catalog.lookup("4ft support bracket"), None);
    }

    #[test]
    fn test_lookup_unknown_item() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.lookup("11ft straight bracket"), None);
    }
}
