//! Page snapshots handed to the extractor.

use crate::dom::{self, Document};
use crate::encoding;

/// Markup and address of a page at one point in time.
///
/// The snapshot keeps the source text rather than a parsed tree: each
/// extraction pass parses its own document, so passes never share DOM
/// state and a snapshot can move freely between tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    html: String,
    url: String,
}

impl PageSnapshot {
    /// Snapshot of UTF-8 markup served from `url`.
    pub fn new(html: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            url: url.into(),
        }
    }

    /// Snapshot of raw bytes; the charset is sniffed from BOM or `<meta>`.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], url: impl Into<String>) -> Self {
        Self::new(encoding::decode_html(bytes), url)
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Parse the markup into a fresh document.
    #[must_use]
    pub fn document(&self) -> Document {
        dom::parse(&self.html)
    }
}
