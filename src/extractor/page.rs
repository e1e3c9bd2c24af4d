//! Page info and meta tag records.

use chrono::{DateTime, SecondsFormat, Utc};

use super::Pass;
use crate::dom;
use crate::patterns::collapse_whitespace;
use crate::record::{MetaTag, PageInfo, Record};
use crate::url_utils;

/// ISO-8601 UTC with millisecond precision and a `Z` suffix.
#[must_use]
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(super) fn page_info(pass: &Pass, url: &str, captured_at: DateTime<Utc>) -> Record {
    let title = dom::select_all(pass.doc, "title")
        .first()
        .map(|t| collapse_whitespace(&dom::text_content(t)))
        .unwrap_or_default();

    Record::PageInfo(PageInfo {
        url: url.to_string(),
        title,
        domain: url_utils::hostname(url).unwrap_or_default(),
        timestamp: iso_timestamp(captured_at),
    })
}

pub(super) fn meta_tags(pass: &Pass) -> Vec<Record> {
    dom::select_all(pass.doc, "meta")
        .iter()
        .enumerate()
        .map(|(index, meta)| {
            let name = Some(dom::attr(meta, "name"))
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| dom::attr(meta, "property"));
            Record::Meta(MetaTag {
                name,
                content: dom::attr(meta, "content"),
                index,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::options::ExtractOptions;

    fn pass_over<'a>(doc: &'a dom::Document, options: &'a ExtractOptions) -> Pass<'a> {
        Pass {
            doc,
            options,
            base: None,
        }
    }

    #[test]
    fn iso_timestamp_has_millis_and_z() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(iso_timestamp(at), "2024-05-01T12:30:00.000Z");
    }

    #[test]
    fn page_info_collapses_title_and_extracts_domain() {
        let doc = dom::parse("<title>\n  My   Page \n</title>");
        let options = ExtractOptions::default();
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let record = page_info(&pass_over(&doc, &options), "https://shop.example.com/a?b=c", at);

        assert_eq!(
            record,
            Record::PageInfo(PageInfo {
                url: "https://shop.example.com/a?b=c".to_string(),
                title: "My Page".to_string(),
                domain: "shop.example.com".to_string(),
                timestamp: "2024-01-02T03:04:05.000Z".to_string(),
            })
        );
    }

    #[test]
    fn meta_name_falls_back_to_property() {
        let doc = dom::parse(
            r#"<head>
                <meta charset="utf-8">
                <meta name="description" content="About us">
                <meta property="og:title" content="Title">
                <meta name="" property="og:type" content="website">
            </head>"#,
        );
        let options = ExtractOptions::default();

        let records = meta_tags(&pass_over(&doc, &options));

        let names: Vec<_> = records
            .iter()
            .map(|r| match r {
                Record::Meta(m) => (m.name.as_str(), m.content.as_str(), m.index),
                other => panic!("unexpected record {other:?}"),
            })
            .collect();
        assert_eq!(
            names,
            vec![
                ("", "", 0),
                ("description", "About us", 1),
                ("og:title", "Title", 2),
                ("og:type", "website", 3),
            ]
        );
    }
}
