//! Sectioned CSV rendering of a scrape result.
//!
//! The document groups records by kind into fixed sections, each headed by
//! a `=== NAME ===` marker line and a quoted header row, and always ends
//! with a SUMMARY section of per-kind counts. Rendering is a pure function
//! of its input.

use std::collections::BTreeMap;

use crate::record::{Record, RecordKind};

/// Rendered in place of a document when there is nothing to export.
pub const EMPTY_DOCUMENT: &str = "No data scraped";

/// MIME type of the exported artifact.
pub const CSV_MIME: &str = "text/csv;charset=utf-8";

/// Quote one field: double embedded quotes, wrap in quotes.
///
/// # Examples
///
/// ```
/// use page_csv::export::quote_field;
///
/// assert_eq!(quote_field(r#"He said "hi""#), r#""He said ""hi""""#);
/// assert_eq!(quote_field(""), r#""""#);
/// ```
#[must_use]
pub fn quote_field(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if ch == '"' {
            quoted.push('"');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Section title for a kind.
#[must_use]
pub const fn section_name(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::PageInfo => "PAGE INFORMATION",
        RecordKind::Text => "TEXT CONTENT",
        RecordKind::Link => "LINKS",
        RecordKind::Image => "IMAGES",
        RecordKind::FormElement => "FORM ELEMENTS",
        RecordKind::Meta => "META TAGS",
        RecordKind::TableCell => "TABLE DATA",
    }
}

/// Column names of a kind's section.
#[must_use]
pub const fn section_headers(kind: RecordKind) -> &'static [&'static str] {
    match kind {
        RecordKind::PageInfo => &["Type", "URL", "Title", "Domain", "Timestamp"],
        RecordKind::Text => &["Element", "Content", "Index", "XPath"],
        RecordKind::Link => &["URL", "Link Text", "Title", "Index", "XPath"],
        RecordKind::Image => &["Image URL", "Alt Text", "Title", "Width", "Height", "Index", "XPath"],
        RecordKind::FormElement => &[
            "Element",
            "Type",
            "Name",
            "ID",
            "Placeholder",
            "Value",
            "Index",
            "XPath",
        ],
        RecordKind::Meta => &["Name/Property", "Content", "Index"],
        RecordKind::TableCell => &["Table Index", "Row", "Column", "Content", "Is Header", "XPath"],
    }
}

/// Label of a kind's line in the SUMMARY section.
#[must_use]
pub const fn summary_label(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::PageInfo => "Page Information",
        RecordKind::Text => "Text Elements",
        RecordKind::Link => "Links",
        RecordKind::Image => "Images",
        RecordKind::FormElement => "Form Elements",
        RecordKind::Meta => "Meta Tags",
        RecordKind::TableCell => "Table Cells",
    }
}

/// Stringified fields of one record, in header order.
#[must_use]
pub fn record_fields(record: &Record) -> Vec<String> {
    fn opt(n: Option<u32>) -> String {
        n.map(|n| n.to_string()).unwrap_or_default()
    }

    match record {
        Record::PageInfo(p) => vec![
            record.kind().tag().to_string(),
            p.url.clone(),
            p.title.clone(),
            p.domain.clone(),
            p.timestamp.clone(),
        ],
        Record::Text(t) => vec![
            t.element.clone(),
            t.content.clone(),
            t.index.to_string(),
            t.locator.clone(),
        ],
        Record::Link(l) => vec![
            l.href.clone(),
            l.text.clone(),
            l.title.clone(),
            l.index.to_string(),
            l.locator.clone(),
        ],
        Record::Image(i) => vec![
            i.src.clone(),
            i.alt.clone(),
            i.title.clone(),
            opt(i.width),
            opt(i.height),
            i.index.to_string(),
            i.locator.clone(),
        ],
        Record::FormElement(f) => vec![
            f.element.clone(),
            f.input_type.clone(),
            f.name.clone(),
            f.id.clone(),
            f.placeholder.clone(),
            f.value.clone(),
            f.index.to_string(),
            f.locator.clone(),
        ],
        Record::Meta(m) => vec![m.name.clone(), m.content.clone(), m.index.to_string()],
        Record::TableCell(c) => vec![
            c.table_index.to_string(),
            c.row_index.to_string(),
            c.cell_index.to_string(),
            c.content.clone(),
            c.is_header.to_string(),
            c.locator.clone(),
        ],
    }
}

/// Per-kind record counts of a scrape result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordCounts {
    by_kind: BTreeMap<RecordKind, usize>,
    total: usize,
}

impl RecordCounts {
    #[must_use]
    pub fn of(records: &[Record]) -> Self {
        let mut counts = Self::default();
        for record in records {
            *counts.by_kind.entry(record.kind()).or_default() += 1;
            counts.total += 1;
        }
        counts
    }

    #[must_use]
    pub fn get(&self, kind: RecordKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }
}

fn push_row<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    let row: Vec<String> = fields.iter().map(|f| quote_field(f.as_ref())).collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

/// Render `records` as a sectioned CSV document.
///
/// Returns [`EMPTY_DOCUMENT`] for an empty slice. Sections with no
/// records are left out entirely; SUMMARY is always present.
#[must_use]
pub fn render(records: &[Record]) -> String {
    if records.is_empty() {
        return EMPTY_DOCUMENT.to_string();
    }

    let mut out = String::new();

    for kind in RecordKind::ALL {
        let mut section = records.iter().filter(|r| r.kind() == kind).peekable();
        if section.peek().is_none() {
            continue;
        }

        out.push_str("=== ");
        out.push_str(section_name(kind));
        out.push_str(" ===\n");
        push_row(&mut out, section_headers(kind));
        for record in section {
            push_row(&mut out, &record_fields(record));
        }
        out.push('\n');
    }

    let counts = RecordCounts::of(records);
    out.push_str("=== SUMMARY ===\n");
    push_row(&mut out, &["Data Type", "Count"]);
    for kind in RecordKind::ALL {
        push_row(&mut out, &[summary_label(kind).to_string(), counts.get(kind).to_string()]);
    }
    push_row(&mut out, &["Total Items".to_string(), counts.total().to_string()]);

    out
}
