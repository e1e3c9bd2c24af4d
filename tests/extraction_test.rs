use chrono::{TimeZone, Utc};
use page_csv::{
    extract_records, extract_records_at, ExtractOptions, PageSnapshot, Record, RecordKind,
};

const SMALL_PAGE: &str = r#"
<html>
  <head><title>Tiny</title></head>
  <body>
    <p>Hello world, hi</p>
    <a href="/x">X</a>
    <table><tr><td>c</td></tr></table>
  </body>
</html>
"#;

fn kinds(records: &[Record]) -> Vec<RecordKind> {
    records.iter().map(Record::kind).collect()
}

#[test]
fn small_page_yields_one_record_per_kind_present() {
    let snapshot = PageSnapshot::new(SMALL_PAGE, "https://example.com/page");

    let records = extract_records(&snapshot, &ExtractOptions::default()).unwrap();

    assert_eq!(
        kinds(&records),
        vec![
            RecordKind::PageInfo,
            RecordKind::Text,
            RecordKind::Link,
            RecordKind::TableCell
        ]
    );

    match &records[1] {
        Record::Text(text) => {
            assert_eq!(text.element, "p");
            assert_eq!(text.content, "Hello world, hi");
        }
        other => panic!("expected text record, got {other:?}"),
    }
    match &records[2] {
        Record::Link(link) => assert_eq!(link.href, "https://example.com/x"),
        other => panic!("expected link record, got {other:?}"),
    }
    match &records[3] {
        Record::TableCell(cell) => {
            assert_eq!((cell.table_index, cell.row_index, cell.cell_index), (0, 0, 0));
            assert_eq!(cell.content, "c");
            assert!(!cell.is_header);
        }
        other => panic!("expected table cell, got {other:?}"),
    }
}

#[test]
fn page_info_carries_title_domain_and_timestamp() {
    let snapshot = PageSnapshot::new(SMALL_PAGE, "https://example.com/page");
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();

    let records = extract_records_at(&snapshot, &ExtractOptions::default(), at).unwrap();

    match &records[0] {
        Record::PageInfo(info) => {
            assert_eq!(info.url, "https://example.com/page");
            assert_eq!(info.title, "Tiny");
            assert_eq!(info.domain, "example.com");
            assert_eq!(info.timestamp, "2024-05-01T12:30:00.000Z");
        }
        other => panic!("expected page info first, got {other:?}"),
    }
}

#[test]
fn short_text_is_filtered_but_keeps_positional_index() {
    let html = "<body><p>short</p><p>a long enough paragraph</p></body>";
    let snapshot = PageSnapshot::new(html, "https://example.com/");

    let records = extract_records(&snapshot, &ExtractOptions::default()).unwrap();
    let texts: Vec<_> = records
        .iter()
        .filter_map(|r| match r {
            Record::Text(t) => Some(t),
            _ => None,
        })
        .collect();

    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].content, "a long enough paragraph");
    assert_eq!(texts[0].index, 1);
}

#[test]
fn locators_are_deterministic_across_passes() {
    let html = r#"<body><div><p>First paragraph text</p><p>Second paragraph text</p></div>
        <div id="side"><a href="/a">a</a></div></body>"#;
    let snapshot = PageSnapshot::new(html, "https://example.com/");
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let first = extract_records_at(&snapshot, &ExtractOptions::default(), at).unwrap();
    let second = extract_records_at(&snapshot, &ExtractOptions::default(), at).unwrap();

    assert_eq!(first, second);

    let locators: Vec<&str> = first
        .iter()
        .filter_map(|r| match r {
            Record::Text(t) => Some(t.locator.as_str()),
            Record::Link(l) => Some(l.locator.as_str()),
            _ => None,
        })
        .collect();
    assert!(locators.contains(&"html/body[1]/div[1]/p[2]"));
    assert!(locators.contains(&"id(\"side\")/a[1]"));
}

#[test]
fn disabled_kinds_are_not_extracted() {
    let html = r#"<head><meta name="description" content="d"></head>
        <body><a href="/a">a</a><img src="/i.png"><input name="q"><table><tr><td>x</td></tr></table></body>"#;
    let snapshot = PageSnapshot::new(html, "https://example.com/");
    let options = ExtractOptions {
        include_links: false,
        include_images: false,
        include_forms: false,
        include_meta: false,
        include_tables: false,
        ..ExtractOptions::default()
    };

    let records = extract_records(&snapshot, &options).unwrap();

    assert_eq!(kinds(&records), vec![RecordKind::PageInfo]);
}

#[test]
fn images_forms_and_meta_are_collected() {
    let html = r#"<head><meta property="og:title" content="OG"></head>
        <body>
          <img src="pic.png" alt="A pic" width="120" height="80px">
          <form>
            <input type="email" name="mail" placeholder="you@example.com">
            <input type="checkbox" name="agree">
            <textarea name="msg">hello</textarea>
            <select name="size"><option>S</option><option selected value="m">M</option></select>
          </form>
        </body>"#;
    let snapshot = PageSnapshot::new(html, "https://example.com/dir/");

    let records = extract_records(&snapshot, &ExtractOptions::default()).unwrap();

    let image = records
        .iter()
        .find_map(|r| match r {
            Record::Image(i) => Some(i),
            _ => None,
        })
        .unwrap();
    assert_eq!(image.src, "https://example.com/dir/pic.png");
    assert_eq!(image.alt, "A pic");
    assert_eq!((image.width, image.height), (Some(120), Some(80)));

    let forms: Vec<_> = records
        .iter()
        .filter_map(|r| match r {
            Record::FormElement(f) => Some(f),
            _ => None,
        })
        .collect();
    assert_eq!(forms.len(), 4);
    assert_eq!(forms[0].input_type, "email");
    assert_eq!(forms[0].placeholder, "you@example.com");
    assert_eq!(forms[1].value, "on");
    assert_eq!(forms[2].element, "textarea");
    assert_eq!(forms[2].value, "hello");
    assert_eq!(forms[3].value, "m");

    let meta = records
        .iter()
        .find_map(|r| match r {
            Record::Meta(m) => Some(m),
            _ => None,
        })
        .unwrap();
    assert_eq!(meta.name, "og:title");
    assert_eq!(meta.content, "OG");
}

#[test]
fn malformed_html_does_not_panic() {
    let inputs = [
        "",
        "<",
        "<p>unclosed <b>bold <i>italic",
        "<table><td>orphan cell</table></tr>",
        "<a href=>empty</a><img src=''>",
        "<html><html><body><body><p>doubled roots here</p>",
    ];

    for html in inputs {
        let snapshot = PageSnapshot::new(html, "https://example.com/");
        let records = extract_records(&snapshot, &ExtractOptions::default()).unwrap();
        assert_eq!(records[0].kind(), RecordKind::PageInfo, "{html:?}");
    }
}

#[test]
fn bytes_are_decoded_with_declared_charset() {
    let mut bytes = b"<html><head><meta charset=\"windows-1252\"></head><body><p>Caf".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b" au lait du matin</p></body></html>");
    let snapshot = PageSnapshot::from_bytes(&bytes, "https://example.com/");

    let records = extract_records(&snapshot, &ExtractOptions::default()).unwrap();

    assert!(records.iter().any(|r| matches!(
        r,
        Record::Text(t) if t.content == "Café au lait du matin"
    )));
}
