//! DOM Operations Adapter
//!
//! Thin layer over `dom_query` exposing the handful of node operations the
//! extractor and locator need, with the live-DOM defaults a page script
//! would observe (missing attributes read as empty strings, tag names are
//! lowercase).

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

pub use tendril::StrTendril;

/// Parse an HTML document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attribute Operations ===

/// Attribute value, or `None` when the attribute is absent.
#[inline]
#[must_use]
pub fn attr_opt(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|s| s.to_string())
}

/// Attribute value, empty when absent.
#[inline]
#[must_use]
pub fn attr(node: &NodeRef, name: &str) -> String {
    attr_opt(node, name).unwrap_or_default()
}

/// Non-empty `id` attribute.
#[must_use]
pub fn id(node: &NodeRef) -> Option<String> {
    attr_opt(node, "id").filter(|id| !id.is_empty())
}

/// Whether the attribute is present, regardless of value.
#[inline]
#[must_use]
pub fn has_attribute(node: &NodeRef, name: &str) -> bool {
    node.has_attr(name)
}

// === Tag/Node Information ===

/// Lowercase tag name, empty for non-element nodes.
#[must_use]
pub fn tag_name(node: &NodeRef) -> String {
    if !node.is_element() {
        return String::new();
    }
    node.node_name()
        .map(|t| t.to_ascii_lowercase())
        .unwrap_or_default()
}

/// All text content of node and descendants.
#[inline]
#[must_use]
pub fn text_content(node: &NodeRef) -> StrTendril {
    node.text()
}

// === Tree Navigation ===

/// Parent node if it is an element.
///
/// The document node above `<html>` is not an element, so this is `None`
/// for the document element and for detached nodes.
#[must_use]
pub fn parent_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    node.parent().filter(NodeRef::is_element)
}

/// Number of preceding element siblings sharing the node's tag name.
#[must_use]
pub fn preceding_same_tag_count(node: &NodeRef) -> usize {
    let tag = tag_name(node);
    let mut count = 0;
    let mut sibling = node.prev_sibling();
    while let Some(s) = sibling {
        if s.is_element() && tag_name(&s) == tag {
            count += 1;
        }
        sibling = s.prev_sibling();
    }
    count
}

// === Querying ===

/// All nodes under `doc` matching `selector`, in document order.
#[must_use]
pub fn select_all<'a>(doc: &'a Document, selector: &str) -> Vec<NodeRef<'a>> {
    doc.select(selector).nodes().to_vec()
}

/// All descendants of `node` matching `selector`, in document order.
#[must_use]
pub fn select_within<'a>(node: &NodeRef<'a>, selector: &str) -> Vec<NodeRef<'a>> {
    Selection::from(*node).select(selector).nodes().to_vec()
}

/// The `<html>` element, if the document has one.
#[must_use]
pub fn document_element(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("html").nodes().first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_defaults_to_empty() {
        let doc = parse(r#"<a href="/x" title="">link</a>"#);
        let nodes = select_all(&doc, "a");
        let a = &nodes[0];

        assert_eq!(attr(a, "href"), "/x");
        assert_eq!(attr(a, "title"), "");
        assert_eq!(attr(a, "rel"), "");
        assert!(attr_opt(a, "rel").is_none());
        assert!(has_attribute(a, "title"));
    }

    #[test]
    fn test_empty_id_is_none() {
        let doc = parse(r#"<div id="">x</div><p id="main">y</p>"#);

        assert!(id(&select_all(&doc, "div")[0]).is_none());
        assert_eq!(id(&select_all(&doc, "p")[0]), Some("main".to_string()));
    }

    #[test]
    fn test_tag_name_lowercase() {
        let doc = parse("<DIV><SPAN>x</SPAN></DIV>");

        assert_eq!(tag_name(&select_all(&doc, "span")[0]), "span");
    }

    #[test]
    fn test_preceding_same_tag_count_skips_other_tags() {
        let doc = parse("<div><p>1</p><span>s</span><p>2</p>text<p>3</p></div>");
        let ps = select_all(&doc, "p");

        assert_eq!(preceding_same_tag_count(&ps[0]), 0);
        assert_eq!(preceding_same_tag_count(&ps[1]), 1);
        assert_eq!(preceding_same_tag_count(&ps[2]), 2);
    }

    #[test]
    fn test_document_element_has_no_parent_element() {
        let doc = parse("<p>x</p>");
        let html = document_element(&doc);

        assert!(html.is_some());
        assert!(html.as_ref().and_then(parent_element).is_none());
    }

    #[test]
    fn test_select_within_is_scoped() {
        let doc = parse("<table><tr><td>a</td></tr></table><p><span>b</span></p>");
        let table = select_all(&doc, "table")[0];

        assert_eq!(select_within(&table, "td").len(), 1);
        assert!(select_within(&table, "span").is_empty());
    }
}
