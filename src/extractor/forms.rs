//! Form control records.
//!
//! The snapshot has no live control state, so `type` and `value` are
//! derived from markup the way the DOM reflects them on page load.

use super::Pass;
use crate::dom::{self, NodeRef};
use crate::locator::locate;
use crate::patterns::{self, collapse_whitespace};
use crate::record::{FormElement, Record};

/// `input` types a browser recognizes; anything else reflects as `text`.
const INPUT_TYPES: &[&str] = &[
    "button",
    "checkbox",
    "color",
    "date",
    "datetime-local",
    "email",
    "file",
    "hidden",
    "image",
    "month",
    "number",
    "password",
    "radio",
    "range",
    "reset",
    "search",
    "submit",
    "tel",
    "text",
    "time",
    "url",
    "week",
];

pub(super) fn form_elements(pass: &Pass) -> Vec<Record> {
    dom::select_all(pass.doc, patterns::FORM_CONTROLS)
        .iter()
        .enumerate()
        .map(|(index, control)| {
            let element = dom::tag_name(control);
            let input_type = control_type(control, &element);
            let value = control_value(control, &element, &input_type);
            Record::FormElement(FormElement {
                input_type,
                value,
                name: dom::attr(control, "name"),
                id: dom::attr(control, "id"),
                placeholder: dom::attr(control, "placeholder"),
                index,
                locator: locate(control),
                element,
            })
        })
        .collect()
}

fn control_type(control: &NodeRef, element: &str) -> String {
    match element {
        "textarea" => "textarea".to_string(),
        "select" if dom::has_attribute(control, "multiple") => "select-multiple".to_string(),
        "select" => "select-one".to_string(),
        _ => {
            let declared = dom::attr(control, "type").trim().to_ascii_lowercase();
            if INPUT_TYPES.contains(&declared.as_str()) {
                declared
            } else {
                "text".to_string()
            }
        }
    }
}

fn control_value(control: &NodeRef, element: &str, input_type: &str) -> String {
    match element {
        "textarea" => dom::text_content(control).to_string(),
        "select" => selected_option_value(control, input_type == "select-multiple"),
        _ => match dom::attr_opt(control, "value") {
            Some(value) => value,
            None if matches!(input_type, "checkbox" | "radio") => "on".to_string(),
            None => String::new(),
        },
    }
}

fn selected_option_value(select: &NodeRef, multiple: bool) -> String {
    let options = dom::select_within(select, "option");
    let mut selected = options
        .iter()
        .filter(|o| dom::has_attribute(o, "selected"));

    let chosen = if multiple {
        selected.next()
    } else {
        selected.last().or_else(|| options.first())
    };

    chosen.map(option_value).unwrap_or_default()
}

fn option_value(option: &NodeRef) -> String {
    dom::attr_opt(option, "value")
        .unwrap_or_else(|| collapse_whitespace(&dom::text_content(option)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ExtractOptions;

    fn controls(html: &str) -> Vec<FormElement> {
        let doc = dom::parse(html);
        let options = ExtractOptions::default();
        let pass = Pass {
            doc: &doc,
            options: &options,
            base: None,
        };
        form_elements(&pass)
            .into_iter()
            .map(|r| match r {
                Record::FormElement(f) => f,
                other => panic!("unexpected record {other:?}"),
            })
            .collect()
    }

    #[test]
    fn input_type_defaults_to_text() {
        let found = controls(r#"<input name="a"><input type="EMAIL"><input type="bogus">"#);

        let types: Vec<_> = found.iter().map(|f| f.input_type.as_str()).collect();
        assert_eq!(types, vec!["text", "email", "text"]);
    }

    #[test]
    fn input_attributes_degrade_to_empty() {
        let found = controls(r#"<form><input id="q" name="query" placeholder="Search" value="rust"></form>"#);

        assert_eq!(
            found[0],
            FormElement {
                element: "input".to_string(),
                input_type: "text".to_string(),
                name: "query".to_string(),
                id: "q".to_string(),
                placeholder: "Search".to_string(),
                value: "rust".to_string(),
                index: 0,
                locator: r#"id("q")"#.to_string(),
            }
        );

        let bare = controls("<input>");
        assert_eq!(bare[0].name, "");
        assert_eq!(bare[0].value, "");
        assert_eq!(bare[0].placeholder, "");
    }

    #[test]
    fn checkbox_without_value_reports_on() {
        let found = controls(r#"<input type="checkbox"><input type="radio" value="b">"#);

        assert_eq!(found[0].value, "on");
        assert_eq!(found[1].value, "b");
    }

    #[test]
    fn textarea_value_is_its_text() {
        let found = controls("<textarea name=\"bio\">Hello\nworld</textarea>");

        assert_eq!(found[0].input_type, "textarea");
        assert_eq!(found[0].value, "Hello\nworld");
    }

    #[test]
    fn select_one_uses_last_selected_or_first() {
        let found = controls(
            r#"<select><option value="a">A</option><option value="b" selected>B</option><option selected>  C  c </option></select>
               <select><option>first</option><option value="2">second</option></select>"#,
        );

        assert_eq!(found[0].input_type, "select-one");
        assert_eq!(found[0].value, "C c");
        assert_eq!(found[1].value, "first");
    }

    #[test]
    fn select_multiple_uses_first_selected_or_empty() {
        let found = controls(
            r#"<select multiple><option value="a">A</option><option value="b" selected>B</option><option value="c" selected>C</option></select>
               <select multiple><option value="x">X</option></select>"#,
        );

        assert_eq!(found[0].input_type, "select-multiple");
        assert_eq!(found[0].value, "b");
        assert_eq!(found[1].value, "");
    }

    #[test]
    fn indexes_follow_document_order_across_tags() {
        let found = controls("<textarea></textarea><input><select></select>");

        let order: Vec<_> = found.iter().map(|f| (f.element.as_str(), f.index)).collect();
        assert_eq!(order, vec![("textarea", 0), ("input", 1), ("select", 2)]);
    }
}
