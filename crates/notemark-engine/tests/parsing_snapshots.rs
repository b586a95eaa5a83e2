use notemark_engine::{MarkdownElement, MarkdownParser, parse_document};

#[test]
fn fixture_mixed_document() {
    assert_fixture("mixed_document");
}

#[test]
fn fixture_nested_lists() {
    assert_fixture("nested_lists");
}

fn assert_fixture(name: &str) {
    let md = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();

    let elements = parse_document(&md);
    insta::assert_debug_snapshot!(name, elements);
}

/// Parsing the same text twice gives the same elements, cached or not.
#[test]
fn parse_is_idempotent() {
    let md = "# a\n\n- [ ] b\n\n> c";
    let parser = MarkdownParser::new();
    assert_eq!(parser.parse(md).elements, parser.parse(md).elements);
    assert_eq!(parse_document(md), parse_document(md));
}

/// Escaped markup is plain text.
#[test]
fn escaped_markup_stays_paragraph() {
    let elements = parse_document(r"\*\*not bold\*\*");
    assert_eq!(elements, vec![MarkdownElement::paragraph("**not bold**")]);
}

/// Crlf input parses like lf input.
#[test]
fn crlf_matches_lf() {
    let lf = "# t\n\n- a\n- b\n\n| x |\n|---|\n| 1 |\n";
    let crlf = lf.replace('\n', "\r\n");
    assert_eq!(parse_document(lf), parse_document(&crlf));
}
