//! Integration tests for the document operations, driven through the
//! public byte-oriented API.

use lopdf::{dictionary, Document, Object, Stream};
use pdfdesk::{
    Error, MergeInput, PageNumberOptions, PageRange, WatermarkOptions,
};

/// Minimal valid PDF with `num_pages` A4 pages, each carrying a text
/// marker naming its page number.
fn make_test_pdf(num_pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();
    let mut page_ids = Vec::new();

    for i in 0..num_pages {
        let content = format!("BT /F1 12 Tf 100 700 Td (Page {}) Tj ET", i + 1);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let page_refs: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => num_pages as i64,
            "Kids" => page_refs,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut out = Vec::new();
    doc.save_to(&mut out).unwrap();
    out
}

/// The text marker of page `page` in `bytes`, e.g. "Page 3".
fn page_marker(bytes: &[u8], page: u32) -> String {
    let doc = Document::load_mem(bytes).unwrap();
    let page_id = doc.get_pages()[&page];
    let content = doc.get_page_content(page_id).unwrap();
    let text = String::from_utf8_lossy(&content);
    let start = text.find("(Page ").expect("marker missing");
    let end = text[start..].find(')').unwrap() + start;
    text[start + 1..end].to_string()
}

#[test]
fn test_merge_preserves_page_order() {
    let a = make_test_pdf(2);
    let b = make_test_pdf(1);
    let merged = pdfdesk::merge(&[MergeInput::all(&a), MergeInput::all(&b)]).unwrap();

    assert_eq!(pdfdesk::page_count(&merged).unwrap(), 3);
    assert_eq!(page_marker(&merged, 1), "Page 1");
    assert_eq!(page_marker(&merged, 2), "Page 2");
    assert_eq!(page_marker(&merged, 3), "Page 1"); // first page of b
}

#[test]
fn test_merge_selected_pages() {
    let a = make_test_pdf(5);
    let b = make_test_pdf(2);
    let merged = pdfdesk::merge(&[
        MergeInput::pages(&a, PageRange::validate("2,4").unwrap()),
        MergeInput::pages(&b, PageRange::validate("1").unwrap()),
    ])
    .unwrap();

    assert_eq!(pdfdesk::page_count(&merged).unwrap(), 3);
    assert_eq!(page_marker(&merged, 1), "Page 2");
    assert_eq!(page_marker(&merged, 2), "Page 4");
    assert_eq!(page_marker(&merged, 3), "Page 1");
}

#[test]
fn test_merge_requires_two_inputs() {
    let a = make_test_pdf(1);
    assert!(matches!(
        pdfdesk::merge(&[MergeInput::all(&a)]),
        Err(Error::NotEnoughInputs(1))
    ));
}

#[test]
fn test_extract_keeps_selected_content() {
    let pdf = make_test_pdf(4);
    let out = pdfdesk::extract_pages(&pdf, &PageRange::parse("2,4")).unwrap();
    assert_eq!(pdfdesk::page_count(&out).unwrap(), 2);
    assert_eq!(page_marker(&out, 1), "Page 2");
    assert_eq!(page_marker(&out, 2), "Page 4");
}

#[test]
fn test_reorder_moves_content() {
    let pdf = make_test_pdf(3);
    let out = pdfdesk::reorder_pages(&pdf, &[3, 1, 2]).unwrap();
    assert_eq!(page_marker(&out, 1), "Page 3");
    assert_eq!(page_marker(&out, 2), "Page 1");
    assert_eq!(page_marker(&out, 3), "Page 2");
}

#[test]
fn test_delete_shifts_following_pages() {
    let pdf = make_test_pdf(3);
    let out = pdfdesk::delete_pages(&pdf, &PageRange::parse("1")).unwrap();
    assert_eq!(pdfdesk::page_count(&out).unwrap(), 2);
    assert_eq!(page_marker(&out, 1), "Page 2");
    assert_eq!(page_marker(&out, 2), "Page 3");
}

#[test]
fn test_delete_everything_is_refused() {
    let pdf = make_test_pdf(2);
    assert!(matches!(
        pdfdesk::delete_pages(&pdf, &PageRange::parse("1-2")),
        Err(Error::EmptyDocument)
    ));
}

#[test]
fn test_rotate_round_trip() {
    let pdf = make_test_pdf(2);
    let quarter = pdfdesk::rotate_pages(&pdf, None, 90).unwrap();
    let full = pdfdesk::rotate_pages(&quarter, None, 270).unwrap();

    let info = pdfdesk::read_info(&full).unwrap();
    assert!(info.pages.iter().all(|p| p.rotation == 0));
}

#[test]
fn test_rotate_rejects_odd_angles() {
    let pdf = make_test_pdf(1);
    assert!(matches!(
        pdfdesk::rotate_pages(&pdf, None, 17),
        Err(Error::InvalidRotation(17))
    ));
}

#[test]
fn test_split_produces_named_single_pages() {
    let pdf = make_test_pdf(3);
    let parts = pdfdesk::split(&pdf).unwrap();

    assert_eq!(parts.len(), 3);
    for (i, (name, bytes)) in parts.iter().enumerate() {
        assert_eq!(name, &format!("page_{}.pdf", i + 1));
        assert_eq!(pdfdesk::page_count(bytes).unwrap(), 1);
        assert_eq!(page_marker(bytes, 1), format!("Page {}", i + 1));
    }
}

#[test]
fn test_split_file_writes_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.pdf");
    std::fs::write(&input, make_test_pdf(2)).unwrap();

    let written = pdfdesk::split_file(&input, &dir.path().join("out")).unwrap();
    assert_eq!(written.len(), 2);
    for path in &written {
        assert!(path.exists());
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(pdfdesk::page_count(&bytes).unwrap(), 1);
    }
}

#[test]
fn test_watermark_every_page() {
    let pdf = make_test_pdf(2);
    let out = pdfdesk::add_watermark(&pdf, &WatermarkOptions::new("DRAFT")).unwrap();

    let doc = Document::load_mem(&out).unwrap();
    for (_, page_id) in doc.get_pages() {
        let content = doc.get_page_content(page_id).unwrap();
        let text = String::from_utf8_lossy(&content);
        assert!(text.contains("(DRAFT) Tj"));
    }
}

#[test]
fn test_page_numbers_count_correctly() {
    let pdf = make_test_pdf(3);
    let out = pdfdesk::add_page_numbers(&pdf, &PageNumberOptions::default()).unwrap();

    let doc = Document::load_mem(&out).unwrap();
    let page_id = doc.get_pages()[&2];
    let content = doc.get_page_content(page_id).unwrap();
    assert!(String::from_utf8_lossy(&content).contains("(2 of 3) Tj"));
}

#[test]
fn test_compress_round_trips() {
    let pdf = make_test_pdf(5);
    let out = pdfdesk::compress(&pdf).unwrap();
    assert_eq!(pdfdesk::page_count(&out).unwrap(), 5);
    // Content must survive the re-save
    assert_eq!(page_marker(&out, 5), "Page 5");
}

#[test]
fn test_read_info_reflects_operations() {
    let pdf = make_test_pdf(4);
    let rotated = pdfdesk::rotate_pages(&pdf, Some(&PageRange::parse("2")), 180).unwrap();

    let info = pdfdesk::read_info(&rotated).unwrap();
    assert_eq!(info.page_count, 4);
    assert_eq!(info.version, "1.7");
    assert!(!info.encrypted);
    assert_eq!(info.pages[1].rotation, 180);
    assert_eq!(info.pages[0].rotation, 0);
    assert_eq!(info.pages[0].width, 595.0);
    assert_eq!(info.pages[0].height, 842.0);
}

#[test]
fn test_operations_reject_garbage() {
    let garbage = b"definitely not a pdf";
    assert!(pdfdesk::page_count(garbage).is_err());
    assert!(pdfdesk::extract_pages(garbage, &PageRange::parse("1")).is_err());
    assert!(pdfdesk::split(garbage).is_err());
    assert!(pdfdesk::compress(garbage).is_err());
    assert!(pdfdesk::add_watermark(garbage, &WatermarkOptions::new("X")).is_err());
}
