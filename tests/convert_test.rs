//! End-to-end tests for the text-to-Markdown structure inference pipeline.

use pdfdesk::convert::{self, ConvertMode, ConvertOptions, HeaderFields, StructureConverter};

fn markdown(text: &str) -> String {
    convert::convert(text, ConvertMode::Markdown)
}

#[test]
fn test_full_document_conversion() {
    let input = "TITLE\n\nName\tScore\nBob\t10\n\nSee https://x";
    let out = markdown(input);

    let heading_pos = out.find("## TITLE").expect("heading missing");
    let table_pos = out.find("| Name | Score |").expect("table header missing");
    let para_pos = out.find("See https://x").expect("paragraph missing");

    assert!(heading_pos < table_pos);
    assert!(table_pos < para_pos);
    assert!(out.contains("| --- | --- |"));
    assert!(out.contains("| Bob | 10 |"));
}

#[test]
fn test_report_like_document() {
    let input = "\
Chapter 1 Getting Started

1.1 Installation

Install the THING from source.

- build it
- test it
- ship it

    cargo build --release;

Should we ship it?";
    let out = markdown(input);

    assert!(out.contains("## Chapter 1 Getting Started"), "{}", out);
    assert!(out.contains("### 1.1 Installation"), "{}", out);
    assert!(out.contains("Install the **THING** from source."), "{}", out);
    assert!(out.contains("- build it"));
    assert!(out.contains("```\n    cargo build --release;\n```"), "{}", out);
    assert!(out.contains("### Should we ship it?"), "{}", out);
}

#[test]
fn test_code_fences_always_balanced() {
    let inputs = [
        "text\n\n    foo();",
        "    foo();\n    bar();",
        "    foo();\nplain\n    bar();",
        "a\n\n    x();\n\n    y();\n\nb",
    ];
    for input in inputs {
        let out = markdown(input);
        assert_eq!(out.matches("```").count() % 2, 0, "unbalanced for {:?}: {}", input, out);
    }
}

#[test]
fn test_headings_surrounded_by_blank_lines() {
    let out = markdown("before\n\nSECTION ONE\nafter");
    assert!(out.contains("before\n\n## SECTION ONE\n\nafter"), "{}", out);
}

#[test]
fn test_space_aligned_table() {
    let out = markdown("Name     Age     City\nAlice    30      NYC\nBob      25      LA");
    assert!(out.contains("| Name | Age | City |"), "{}", out);
    assert!(out.contains("| Alice | 30 | NYC |"));
    assert!(out.contains("| Bob | 25 | LA |"));
}

#[test]
fn test_quotes_and_rules() {
    let out = markdown("> words of wisdom\n\n------\n\ndone");
    assert!(out.contains("> words of wisdom"));
    assert!(out.contains("---"));
    assert!(out.contains("done"));
}

#[test]
fn test_ordered_list_numbers_preserved() {
    let out = markdown("1. first\n2. second\n10. tenth");
    assert!(out.contains("1. first"));
    assert!(out.contains("2. second"));
    assert!(out.contains("10. tenth"));
}

#[test]
fn test_acronyms_not_bolded() {
    let out = markdown("Save the file as PDF and upload the JSON.");
    assert!(!out.contains("**PDF**"));
    assert!(!out.contains("**JSON**"));
}

#[test]
fn test_text_mode_is_idempotent() {
    let input = "  Heading\n\n\n\n\nbody -- 3 of 9 --\n-- 4 of 9 --\nmore  ";
    let once = convert::convert(input, ConvertMode::Text);
    let twice = convert::convert(&once, ConvertMode::Text);
    assert_eq!(once, twice);
    assert!(!once.contains("of 9"));
}

#[test]
fn test_metadata_header_precedes_body() {
    let header = HeaderFields {
        title: Some("Annual Review".to_string()),
        author: Some("Team".to_string()),
        subject: Some("numbers".to_string()),
        created: Some("2024-01-15T10:30:00".to_string()),
    };
    let options = ConvertOptions::new(ConvertMode::Markdown).with_header(header);
    let out = StructureConverter::new().convert("SUMMARY\n\nFine year.", &options);

    assert!(out.starts_with("# Annual Review"), "{}", out);
    assert!(out.contains("**Author:** Team"));
    assert!(out.contains("**Subject:** numbers"));
    assert!(out.contains("**Created:** 2024-01-15T10:30:00"));
    let sep = out.find("---").unwrap();
    let body = out.find("## SUMMARY").unwrap();
    assert!(sep < body);
}

#[test]
fn test_empty_input() {
    assert_eq!(markdown(""), "");
    assert_eq!(convert::convert("", ConvertMode::Text), "");
}

#[test]
fn test_no_triple_blank_lines_in_output() {
    let out = markdown("A\n\n\n\n\nB HEADING HERE\n\n\n\nC");
    assert!(!out.contains("\n\n\n"), "{:?}", out);
}
