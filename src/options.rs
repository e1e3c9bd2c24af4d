//! Configuration for extraction and scrape orchestration.
//!
//! Both structs expose public fields and a `Default` impl holding the
//! reference behavior. Override only what you need with struct update
//! syntax.

use std::time::Duration;

/// Options controlling a single extraction pass.
///
/// # Example
///
/// ```rust
/// use page_csv::ExtractOptions;
///
/// let options = ExtractOptions {
///     min_text_len: 20,
///     ..ExtractOptions::default()
/// };
/// assert!(options.include_tables);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct ExtractOptions {
    /// Text blocks must be strictly longer than this (in characters, after
    /// trimming and whitespace collapsing) to be emitted.
    ///
    /// Default: `10`
    pub min_text_len: usize,

    /// Emit `Link` records for `a[href]`.
    ///
    /// Default: `true`
    pub include_links: bool,

    /// Emit `Image` records for `img[src]`.
    ///
    /// Default: `true`
    pub include_images: bool,

    /// Emit `FormElement` records for `input`, `textarea` and `select`.
    ///
    /// Default: `true`
    pub include_forms: bool,

    /// Emit `Meta` records for every `meta` tag.
    ///
    /// Default: `true`
    pub include_meta: bool,

    /// Emit `TableCell` records for every `td`/`th` of every table.
    ///
    /// Default: `true`
    pub include_tables: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_text_len: 10,
            include_links: true,
            include_images: true,
            include_forms: true,
            include_meta: true,
            include_tables: true,
        }
    }
}

/// Address schemes that a page agent can never be injected into.
pub const RESTRICTED_SCHEMES: &[&str] = &[
    "chrome",
    "chrome-extension",
    "edge",
    "about",
    "moz-extension",
    "view-source",
    "devtools",
];

/// Configuration for the scrape orchestrator.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use page_csv::ScrapeConfig;
///
/// let config = ScrapeConfig {
///     max_attempts: 3,
///     attempt_timeout: Duration::from_secs(2),
///     ..ScrapeConfig::default()
/// };
/// assert_eq!(config.filename_prefix, "scraped");
/// ```
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Upper bound on how long one delivery attempt may wait for a reply.
    ///
    /// Default: `5s`
    pub attempt_timeout: Duration,

    /// Pause between a failed attempt and the next one.
    ///
    /// Default: `500ms`
    pub retry_backoff: Duration,

    /// Total number of delivery attempts, including the first.
    ///
    /// Default: `5`
    pub max_attempts: u32,

    /// Leading component of the output file name.
    ///
    /// Default: `"scraped"`
    pub filename_prefix: String,

    /// Schemes rejected before any delivery attempt (compared
    /// case-insensitively, without the trailing colon).
    ///
    /// Default: [`RESTRICTED_SCHEMES`]
    pub restricted_schemes: Vec<String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(5),
            retry_backoff: Duration::from_millis(500),
            max_attempts: 5,
            filename_prefix: "scraped".to_string(),
            restricted_schemes: RESTRICTED_SCHEMES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl ScrapeConfig {
    /// Whether `scheme` is one of the restricted schemes.
    #[must_use]
    pub fn is_restricted(&self, scheme: &str) -> bool {
        self.restricted_schemes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme))
    }
}
