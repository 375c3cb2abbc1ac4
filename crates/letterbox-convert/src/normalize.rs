//! Whitespace normalization

use once_cell::sync::Lazy;
use regex::Regex;

static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());
static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Collapse space runs to one space, cap newline runs at two, then trim.
///
/// Only U+0020 counts as a space here; tabs are content and stay put.
pub fn normalize_whitespace(text: &str) -> String {
    let text = SPACE_RUN.replace_all(text, " ");
    let text = NEWLINE_RUN.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_spaces() {
        assert_eq!(normalize_whitespace("a    b  c d"), "a b c d");
    }

    #[test]
    fn test_keeps_tabs() {
        assert_eq!(normalize_whitespace("a\t\tb"), "a\t\tb");
    }

    #[test]
    fn test_caps_blank_lines() {
        assert_eq!(normalize_whitespace("a\n\n\n\n\nb\n\nc\nd"), "a\n\nb\n\nc\nd");
    }

    #[test]
    fn test_trims() {
        assert_eq!(normalize_whitespace("\n\n  body  \n\n"), "body");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_whitespace("  x  \n\n\n\n y   z\n\n\n");
        assert_eq!(normalize_whitespace(&once), once);
    }
}
