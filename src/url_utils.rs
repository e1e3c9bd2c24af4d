//! URL Utility Functions
//!
//! Resolution of `href`/`src` attribute values against the document base,
//! and the scheme/host accessors used by the orchestrator.

use url::Url;

/// Parse an absolute URL, `None` for relative or malformed input.
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    Url::parse(url_str.trim()).ok()
}

/// Base URL used to resolve relative references in a document.
///
/// A `<base href>` wins when it resolves against the page URL; otherwise the
/// page URL itself is the base.
#[must_use]
pub fn document_base(page_url: &str, base_href: Option<&str>) -> Option<Url> {
    let page = parse_url(page_url);
    match (base_href.map(str::trim).filter(|b| !b.is_empty()), &page) {
        (Some(href), Some(page)) => page.join(href).ok().or_else(|| Some(page.clone())),
        (Some(href), None) => parse_url(href),
        (None, _) => page,
    }
}

/// Resolve an attribute value to an absolute URL the way `element.href` does.
///
/// Values that cannot be resolved pass through trimmed.
///
/// # Examples
///
/// ```
/// use page_csv::url_utils::{parse_url, resolve};
///
/// let base = parse_url("https://example.com/docs/index.html");
/// assert_eq!(resolve("guide.html", base.as_ref()), "https://example.com/docs/guide.html");
/// assert_eq!(resolve("mailto:me@example.com", base.as_ref()), "mailto:me@example.com");
/// ```
#[must_use]
pub fn resolve(raw: &str, base: Option<&Url>) -> String {
    let raw = raw.trim();

    if let Ok(absolute) = Url::parse(raw) {
        return absolute.to_string();
    }

    match base.map(|b| b.join(raw)) {
        Some(Ok(resolved)) => resolved.to_string(),
        _ => raw.to_string(),
    }
}

/// Host name of a URL, `None` when it has none (e.g. `about:blank`).
#[must_use]
pub fn hostname(url_str: &str) -> Option<String> {
    parse_url(url_str).and_then(|u| u.host_str().map(ToString::to_string))
}

/// Lowercase scheme of an address, without the colon.
///
/// Falls back to the text before the first `:` when the address does not
/// parse, so malformed internal addresses are still classified.
#[must_use]
pub fn scheme(url_str: &str) -> Option<String> {
    if let Some(url) = parse_url(url_str) {
        return Some(url.scheme().to_string());
    }
    url_str
        .trim()
        .split_once(':')
        .map(|(scheme, _)| scheme.to_ascii_lowercase())
        .filter(|s| !s.is_empty())
}
