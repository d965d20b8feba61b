//! Anchor line scanning shared by the document parsers.
//!
//! Both supported document families are located by searching extracted
//! text for known marker lines rather than by position on the page, so
//! layout drift between template revisions does not break parsing.

/// Find the first line containing `marker` as a substring.
///
/// Matching is case-sensitive and does not require the marker to span
/// the whole line. Returns the zero-based line index.
pub fn find_anchor<S: AsRef<str>>(lines: &[S], marker: &str) -> Option<usize> {
    lines.iter().position(|line| line.as_ref().contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_anchor_on_substring() {
        let lines = ["Order 1204", "SERVICE ADDRESS: (see below)", "12 Pine Crt"];
        assert_eq!(find_anchor(&lines, "SERVICE ADDRESS:"), Some(1));
    }

    #[test]
    fn test_find_anchor_returns_first_match() {
        let lines = ["total", "total", "subtotal"];
        assert_eq!(find_anchor(&lines, "total"), Some(0));
    }

    #[test]
    fn test_find_anchor_is_case_sensitive() {
        let lines = ["service address:"];
        assert_eq!(find_anchor(&lines, "SERVICE ADDRESS:"), None);
    }

    #[test]
    fn test_find_anchor_missing() {
        let lines = ["nothing", "of", "interest"];
        assert_eq!(find_anchor(&lines, "RECIPIENT:"), None);
    }

    #[test]
    fn test_find_anchor_empty_input() {
        let lines: [&str; 0] = [];
        assert_eq!(find_anchor(&lines, "RECIPIENT:"), None);
    }
}
