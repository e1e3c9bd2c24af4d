//! Text blocks, links and images.

use super::Pass;
use crate::dom::{self, NodeRef};
use crate::locator::locate;
use crate::patterns::{self, collapse_whitespace};
use crate::record::{Image, Link, Record, TextBlock};
use crate::url_utils;

/// Text-bearing candidates whose collapsed text is long enough.
///
/// `index` is the position among all candidates, so it stays in document
/// order and unique even when short blocks are filtered out.
pub(super) fn text_blocks(pass: &Pass) -> Vec<Record> {
    let min_len = pass.options.min_text_len;

    dom::select_all(pass.doc, patterns::TEXT_CANDIDATES)
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let content = collapse_whitespace(&dom::text_content(node));
            if content.chars().count() <= min_len {
                return None;
            }
            Some(Record::Text(TextBlock {
                element: dom::tag_name(node),
                content,
                index,
                locator: locate(node),
            }))
        })
        .collect()
}

pub(super) fn links(pass: &Pass) -> Vec<Record> {
    dom::select_all(pass.doc, patterns::LINKS)
        .iter()
        .enumerate()
        .map(|(index, a)| {
            Record::Link(Link {
                href: url_utils::resolve(&dom::attr(a, "href"), pass.base.as_ref()),
                text: dom::text_content(a).trim().to_string(),
                title: dom::attr(a, "title"),
                index,
                locator: locate(a),
            })
        })
        .collect()
}

pub(super) fn images(pass: &Pass) -> Vec<Record> {
    dom::select_all(pass.doc, patterns::IMAGES)
        .iter()
        .enumerate()
        .map(|(index, img)| {
            Record::Image(Image {
                src: url_utils::resolve(&dom::attr(img, "src"), pass.base.as_ref()),
                alt: dom::attr(img, "alt"),
                title: dom::attr(img, "title"),
                width: dimension(img, "width"),
                height: dimension(img, "height"),
                index,
                locator: locate(img),
            })
        })
        .collect()
}

/// Non-negative integer dimension attribute; `"120px"` reads as 120.
fn dimension(img: &NodeRef, name: &str) -> Option<u32> {
    let raw = dom::attr(img, name);
    let digits: String = raw
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
