//! Record extraction from a page snapshot.
//!
//! One pass walks a freshly parsed document and emits records grouped by
//! kind: page info, text, links, images, form elements, meta tags, table
//! cells. Within a group records follow document order.

mod content;
mod forms;
mod page;
mod tables;

pub use page::iso_timestamp;

use chrono::{DateTime, Utc};
use tracing::debug;
use url::Url;

use crate::dom::{self, Document};
use crate::error::{Error, Result};
use crate::options::ExtractOptions;
use crate::record::Record;
use crate::snapshot::PageSnapshot;
use crate::url_utils;

/// Per-pass state shared by the group extractors.
pub(crate) struct Pass<'a> {
    pub(crate) doc: &'a Document,
    pub(crate) options: &'a ExtractOptions,
    /// Base for resolving `href`/`src`.
    pub(crate) base: Option<Url>,
}

/// Extract records from `snapshot`, stamping the page info with the
/// current time.
///
/// # Errors
///
/// Returns [`Error::ExtractionFailed`] when the snapshot has no usable
/// document element.
pub fn extract_records(snapshot: &PageSnapshot, options: &ExtractOptions) -> Result<Vec<Record>> {
    extract_records_at(snapshot, options, Utc::now())
}

/// Extract records from `snapshot` with an explicit capture time.
///
/// # Errors
///
/// Returns [`Error::ExtractionFailed`] when the snapshot has no usable
/// document element.
pub fn extract_records_at(
    snapshot: &PageSnapshot,
    options: &ExtractOptions,
    captured_at: DateTime<Utc>,
) -> Result<Vec<Record>> {
    let doc = snapshot.document();
    if dom::document_element(&doc).is_none() {
        return Err(Error::ExtractionFailed(
            "document has no root element".to_string(),
        ));
    }

    let base_href = dom::select_all(&doc, "base[href]")
        .first()
        .map(|base| dom::attr(base, "href"));
    let pass = Pass {
        doc: &doc,
        options,
        base: url_utils::document_base(snapshot.url(), base_href.as_deref()),
    };

    let mut records = vec![page::page_info(&pass, snapshot.url(), captured_at)];
    records.extend(content::text_blocks(&pass));
    if options.include_links {
        records.extend(content::links(&pass));
    }
    if options.include_images {
        records.extend(content::images(&pass));
    }
    if options.include_forms {
        records.extend(forms::form_elements(&pass));
    }
    if options.include_meta {
        records.extend(page::meta_tags(&pass));
    }
    if options.include_tables {
        records.extend(tables::table_cells(&pass));
    }

    debug!(
        url = %snapshot.url(),
        records = records.len(),
        "extraction pass complete"
    );
    Ok(records)
}
