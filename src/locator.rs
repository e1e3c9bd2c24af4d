//! Structural locators for DOM nodes.
//!
//! A locator is either `id("<id>")` or a chain of `tag[rank]` segments from
//! the document element down, where `rank` is the 1-based position among
//! same-tag element siblings. Locators are recomputed on every call and are
//! only meaningful for the DOM state they were computed against.

use crate::dom::{self, NodeRef};

/// Compute the locator of `node`.
///
/// # Examples
///
/// ```
/// use page_csv::{dom, locator::locate};
///
/// let doc = dom::parse("<div><p>a</p><p>b</p></div><p id='x'>c</p>");
/// let ps = dom::select_all(&doc, "p");
/// assert_eq!(locate(&ps[1]), "html/body[1]/div[1]/p[2]");
/// assert_eq!(locate(&ps[2]), r#"id("x")"#);
/// ```
#[must_use]
pub fn locate(node: &NodeRef) -> String {
    if let Some(id) = dom::id(node) {
        return format!("id(\"{id}\")");
    }

    let tag = dom::tag_name(node);
    match dom::parent_element(node) {
        None => tag,
        Some(parent) => {
            let rank = dom::preceding_same_tag_count(node) + 1;
            format!("{}/{tag}[{rank}]", locate(&parent))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_element_is_bare_tag() {
        let doc = dom::parse("<p>x</p>");
        let html = dom::document_element(&doc);

        assert_eq!(html.map(|n| locate(&n)), Some("html".to_string()));
    }

    #[test]
    fn ranks_count_only_same_tag_siblings() {
        let doc = dom::parse("<section><h2>t</h2><p>a</p><div>d</div><p>b</p></section>");
        let ps = dom::select_all(&doc, "p");

        assert_eq!(locate(&ps[0]), "html/body[1]/section[1]/p[1]");
        assert_eq!(locate(&ps[1]), "html/body[1]/section[1]/p[2]");
    }

    #[test]
    fn id_ancestor_shortens_chain() {
        let doc = dom::parse(r#"<div id="main"><ul><li>a</li><li>b</li></ul></div>"#);
        let items = dom::select_all(&doc, "li");

        assert_eq!(locate(&items[1]), r#"id("main")/ul[1]/li[2]"#);
    }

    #[test]
    fn empty_id_is_ignored() {
        let doc = dom::parse(r#"<span id="">x</span>"#);
        let span = dom::select_all(&doc, "span");

        assert_eq!(locate(&span[0]), "html/body[1]/span[1]");
    }

    #[test]
    fn locate_is_deterministic() {
        let doc = dom::parse("<div><div><a href='#'>x</a></div></div>");
        let a = dom::select_all(&doc, "a");

        assert_eq!(locate(&a[0]), locate(&a[0]));
    }
}
