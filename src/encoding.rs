//! Character set sniffing for raw page bytes.
//!
//! A snapshot captured as bytes is decoded the way a browser would before
//! building the DOM: byte order mark first, then a charset declared in the
//! first kilobyte of markup, then UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Bytes of markup searched for a charset declaration.
const SNIFF_WINDOW: usize = 1024;

/// `<meta charset=...>` or `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[allow(clippy::expect_used)]
static DECLARED_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+?charset\s*=\s*["']?([^"'\s;/>]+)"#).expect("valid regex")
});

/// Charset label declared in a `<meta>` tag, if any.
#[must_use]
pub fn declared_charset(markup: &str) -> Option<String> {
    DECLARED_CHARSET_RE
        .captures(markup)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Pick the encoding for a byte snapshot.
#[must_use]
pub fn sniff_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(SNIFF_WINDOW)]);
    declared_charset(&head)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode a byte snapshot to UTF-8 text.
///
/// Malformed sequences become U+FFFD; decoding never fails.
///
/// ```
/// use page_csv::encoding::decode_html;
///
/// let html = b"<meta charset=\"windows-1252\"><p>Caf\xE9</p>";
/// assert!(decode_html(html).contains("Café"));
/// ```
#[must_use]
pub fn decode_html(bytes: &[u8]) -> String {
    let (decoded, _used, _had_errors) = sniff_encoding(bytes).decode(bytes);
    decoded.into_owned()
}
