//! Compiled regex patterns and CSS selectors used by the extractor.
//!
//! Patterns are compiled once on first use via `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Any run of whitespace, collapsed to a single space in text content.
pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex"));

/// Elements whose text becomes `Text` records.
pub const TEXT_CANDIDATES: &str = "p, h1, h2, h3, h4, h5, h6, span, div, article, section";

/// Anchors with an `href` attribute.
pub const LINKS: &str = "a[href]";

/// Images with a `src` attribute.
pub const IMAGES: &str = "img[src]";

/// Form controls.
pub const FORM_CONTROLS: &str = "input, textarea, select";

/// Table cells, header or data.
pub const TABLE_CELLS: &str = "td, th";

/// Collapse whitespace runs to single spaces and trim both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_whitespace_joins_runs() {
        assert_eq!(collapse_whitespace("  a \n\t b   c "), "a b c");
    }

    #[test]
    fn collapse_whitespace_empty_input() {
        assert_eq!(collapse_whitespace(" \n "), "");
    }
}
