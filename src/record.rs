//! Record types produced by an extraction pass.
//!
//! A scrape result is an ordered `Vec<Record>`. Records travel between
//! contexts as JSON with a `type` tag, so every field is plain data.

use serde::{Deserialize, Serialize};

/// One typed unit of scraped content.
///
/// # Examples
///
/// ```
/// use page_csv::{Record, RecordKind, TableCell};
///
/// let cell = Record::TableCell(TableCell {
///     content: "Price".to_string(),
///     is_header: true,
///     ..TableCell::default()
/// });
/// assert_eq!(cell.kind(), RecordKind::TableCell);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    /// Page-level metadata, always first in a scrape result.
    PageInfo(PageInfo),
    /// A text-bearing block element.
    Text(TextBlock),
    /// An anchor with an `href`.
    Link(Link),
    /// An image with a `src`.
    Image(Image),
    /// An `input`, `textarea` or `select` control.
    FormElement(FormElement),
    /// A `meta` tag.
    Meta(MetaTag),
    /// A `td` or `th` cell.
    TableCell(TableCell),
}

/// Discriminant of a [`Record`], in export section order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    PageInfo,
    Text,
    Link,
    Image,
    FormElement,
    Meta,
    TableCell,
}

impl RecordKind {
    /// All kinds in export section order.
    pub const ALL: [RecordKind; 7] = [
        RecordKind::PageInfo,
        RecordKind::Text,
        RecordKind::Link,
        RecordKind::Image,
        RecordKind::FormElement,
        RecordKind::Meta,
        RecordKind::TableCell,
    ];

    /// Wire tag, as written in the `type` field.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            RecordKind::PageInfo => "page_info",
            RecordKind::Text => "text",
            RecordKind::Link => "link",
            RecordKind::Image => "image",
            RecordKind::FormElement => "form_element",
            RecordKind::Meta => "meta",
            RecordKind::TableCell => "table_cell",
        }
    }
}

impl Record {
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Record::PageInfo(_) => RecordKind::PageInfo,
            Record::Text(_) => RecordKind::Text,
            Record::Link(_) => RecordKind::Link,
            Record::Image(_) => RecordKind::Image,
            Record::FormElement(_) => RecordKind::FormElement,
            Record::Meta(_) => RecordKind::Meta,
            Record::TableCell(_) => RecordKind::TableCell,
        }
    }
}

/// Page URL, title and capture time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Address the snapshot was taken from.
    pub url: String,
    /// Whitespace-collapsed `<title>` text.
    pub title: String,
    /// Host name, empty when the address has none.
    pub domain: String,
    /// ISO-8601 UTC with milliseconds, e.g. `2024-05-01T12:30:00.250Z`.
    pub timestamp: String,
}

/// A text-bearing block and its content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Tag of the source element (`p`, `h2`, `div`, ...).
    pub element: String,
    /// Trimmed, whitespace-collapsed text content.
    pub content: String,
    /// Position among all text candidates, short ones included.
    pub index: usize,
    /// Structural locator of the element.
    pub locator: String,
}

/// An `a[href]` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute URL.
    pub href: String,
    /// Trimmed anchor text.
    pub text: String,
    /// `title` attribute, empty when absent.
    pub title: String,
    /// Position among the page's links.
    pub index: usize,
    pub locator: String,
}

/// An `img[src]` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Absolute URL.
    pub src: String,
    pub alt: String,
    pub title: String,
    /// Declared `width`/`height` attributes; `None` when absent or not a number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Position among the page's images.
    pub index: usize,
    pub locator: String,
}

/// A form control as the page would reflect it on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormElement {
    /// `input`, `textarea` or `select`.
    pub element: String,
    /// Effective control type (`text`, `checkbox`, `select-one`, ...).
    pub input_type: String,
    pub name: String,
    pub id: String,
    pub placeholder: String,
    /// Initial value; `on` for checkboxes and radios without one.
    pub value: String,
    pub index: usize,
    pub locator: String,
}

/// A `meta` tag's name and content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    /// `name` attribute, else `property`.
    pub name: String,
    pub content: String,
    pub index: usize,
}

/// One `td`/`th` cell, addressed by table, row and column position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Position of the table in the document.
    pub table_index: usize,
    /// Row position within the table.
    pub row_index: usize,
    /// Cell position within the row.
    pub cell_index: usize,
    /// Trimmed cell text.
    pub content: String,
    /// `true` for `th` cells.
    pub is_header: bool,
    pub locator: String,
}
