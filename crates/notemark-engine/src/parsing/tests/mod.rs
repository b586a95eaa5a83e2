//! Behavioural tests for the parsing module.
//!
//! Every parse in here also runs through [`invariants::check`].


use std::sync::Arc;

use pretty_assertions::assert_eq;

use crate::parsing::{
    Alignment, Degradation, MarkdownElement, MarkdownParser, ParseCache, ParseLimits, Parsed,
    diagnostics::{PARTIALLY_PARSED_NOTICE, TRUNCATED_NOTICE},
    dispatch::{PANIC_ON_DISPATCH, PANIC_ON_LINE},
};

fn parse_with(limits: ParseLimits, text: &str) -> Parsed {
    let parser = MarkdownParser::with_limits(limits);
    let parsed = parser.parse(text);
    invariants::check(&parsed.elements, parser.limits());
    parsed
}

fn parse(text: &str) -> Parsed {
    parse_with(ParseLimits::default(), text)
}

/// Limits that force chunking on tiny inputs.
fn chunking_limits() -> ParseLimits {
    ParseLimits {
        chunk_threshold: 8,
        chunk_size: 1,
        ..ParseLimits::default()
    }
}

#[test]
fn empty_document() {
    let parsed = parse("");
    assert!(parsed.elements.is_empty());
    assert!(parsed.diagnostics.is_clean());
}

#[test]
fn blank_lines_only() {
    assert!(parse("\n\n\n").elements.is_empty());
}

#[test]
fn heading_levels() {
    assert_eq!(
        &*parse("# a").elements,
        &[MarkdownElement::Heading {
            level: 1,
            text: "a".into()
        }]
    );
    assert_eq!(
        &*parse("####### a").elements,
        &[MarkdownElement::paragraph("####### a")]
    );
}

#[test]
fn table_alignment() {
    let parsed = parse("| A | B |\n|:---|---:|\n| 1 | 2 |");
    assert_eq!(
        &*parsed.elements,
        &[MarkdownElement::Table {
            headers: vec!["A".into(), "B".into()],
            rows: vec![vec!["1".into(), "2".into()]],
            alignments: vec![Alignment::Left, Alignment::Right],
        }]
    );
}

#[test]
fn quote_levels() {
    let parsed = parse(">a\n>>b\n>>>c");
    let quotes: Vec<(String, usize)> = parsed
        .elements
        .iter()
        .map(|e| match e {
            MarkdownElement::BlockQuote { text, level } => (text.clone(), *level),
            other => panic!("expected quote, got {other:?}"),
        })
        .collect();
    assert_eq!(
        quotes,
        vec![("a".into(), 1), ("b".into(), 2), ("c".into(), 3)]
    );
}

#[test]
fn quote_deeper_than_nesting_limit_falls_through() {
    let limits = ParseLimits {
        max_nesting_level: 2,
        ..ParseLimits::default()
    };
    let parsed = parse_with(limits, ">>> deep");
    assert_eq!(&*parsed.elements, &[MarkdownElement::paragraph(">>> deep")]);
}

#[test]
fn unterminated_code_fence_is_never_a_code_block() {
    let parsed = parse("```\ncode");
    assert!(
        !parsed
            .elements
            .iter()
            .any(|e| matches!(e, MarkdownElement::CodeBlock { .. }))
    );
    assert_eq!(&*parsed.elements, &[MarkdownElement::paragraph("```\ncode")]);
}

#[test]
fn oversized_input_is_one_paragraph() {
    let limits = ParseLimits {
        max_text_length: 10,
        ..ParseLimits::default()
    };
    let parser = MarkdownParser::with_limits(limits);
    let parsed = parser.parse("# heading\n- [ ] a task");

    assert_eq!(parsed.elements.len(), 1);
    assert!(matches!(
        &parsed.elements[0],
        MarkdownElement::Paragraph { text } if text.starts_with("Document too large")
    ));
    assert_eq!(parsed.diagnostics.degraded, Some(Degradation::InputTooLarge));
    assert!(parser.cache().is_empty());
}

#[test]
fn length_limit_counts_characters() {
    let limits = ParseLimits {
        max_text_length: 5,
        ..ParseLimits::default()
    };
    // Five chars, ten bytes.
    let parsed = parse_with(limits, "ééééé");
    assert_eq!(&*parsed.elements, &[MarkdownElement::paragraph("ééééé")]);
}

#[test]
fn parse_is_idempotent_and_cached() {
    let parser = MarkdownParser::new();
    let text = "# Title\n\n- [ ] one\n- [x] two\n\n| a |\n|---|\n| 1 |";

    let first = parser.parse(text);
    let second = parser.parse(text);

    assert!(!first.from_cache);
    assert!(second.from_cache);
    assert_eq!(first.elements, second.elements);
    assert_eq!(first.diagnostics, second.diagnostics);
    assert_eq!(parser.cache().len(), 1);
}

#[test]
fn cache_can_be_shared_between_parsers() {
    let cache = Arc::new(ParseCache::new(4));
    let a = MarkdownParser::new().with_cache(Arc::clone(&cache));
    let b = MarkdownParser::new().with_cache(Arc::clone(&cache));

    a.parse("shared text");
    assert!(b.parse("shared text").from_cache);
}

#[test]
fn shared_cache_keeps_results_per_limits() {
    let cache = Arc::new(ParseCache::new(4));
    let roomy = MarkdownParser::new().with_cache(Arc::clone(&cache));
    let tight = MarkdownParser::with_limits(ParseLimits {
        max_elements: 1,
        ..ParseLimits::default()
    })
    .with_cache(Arc::clone(&cache));

    assert_eq!(roomy.parse("a\nb").elements.len(), 2);
    let parsed = tight.parse("a\nb");
    assert!(!parsed.from_cache);
    assert_eq!(parsed.diagnostics.degraded, Some(Degradation::Truncated));
    assert_eq!(cache.len(), 2);
}

#[test]
fn panicking_line_keeps_its_neighbours() {
    let parsed = parse(&format!("# t\n{PANIC_ON_LINE}\nafter"));
    assert_eq!(
        &*parsed.elements,
        &[
            MarkdownElement::Heading {
                level: 1,
                text: "t".into()
            },
            MarkdownElement::paragraph("after"),
        ]
    );
    assert_eq!(parsed.diagnostics.error_count, 1);
    assert_eq!(
        parsed.diagnostics.last_error.as_deref(),
        Some("Line 2 could not be parsed: forced line failure")
    );
    assert_eq!(parsed.diagnostics.degraded, None);
}

#[test]
fn panicking_chunk_becomes_raw_paragraph() {
    let parsed = parse_with(
        chunking_limits(),
        &format!("aaa\n\n{PANIC_ON_DISPATCH}\n\n- [ ] ccc"),
    );
    assert_eq!(
        &*parsed.elements,
        &[
            MarkdownElement::paragraph("aaa"),
            MarkdownElement::paragraph(PANIC_ON_DISPATCH),
            MarkdownElement::TaskList {
                text: "ccc".into(),
                checked: false,
                level: 1
            },
        ]
    );
    assert_eq!(parsed.diagnostics.error_count, 1);
    assert_eq!(
        parsed.diagnostics.last_error.as_deref(),
        Some("Chunk 2 could not be parsed: forced dispatch failure")
    );
    assert_eq!(parsed.diagnostics.degraded, None);
}

#[test]
fn failed_dispatch_falls_back_to_simple_paragraphs() {
    let parser = MarkdownParser::new();
    let text = format!("# Title\n\n{PANIC_ON_DISPATCH}\n\n- [ ] a");
    let parsed = parser.parse(&text);
    invariants::check(&parsed.elements, parser.limits());

    assert_eq!(
        &*parsed.elements,
        &[
            MarkdownElement::Heading {
                level: 1,
                text: "Title".into()
            },
            MarkdownElement::paragraph(PANIC_ON_DISPATCH),
            MarkdownElement::paragraph("- [ ] a"),
        ]
    );
    assert_eq!(parsed.diagnostics.degraded, Some(Degradation::SimpleFallback));
    assert_eq!(
        parsed.diagnostics.last_error.as_deref(),
        Some("Parser failed: forced dispatch failure")
    );
    assert!(parser.cache().is_empty());
    assert!(parser.tasks(&text).is_empty());
}

#[test]
fn element_cap_appends_one_notice() {
    let limits = ParseLimits {
        max_elements: 3,
        ..ParseLimits::default()
    };
    let parsed = parse_with(limits, "a\nb\nc\nd\ne\nf");
    assert_eq!(parsed.elements.len(), 4);
    assert_eq!(parsed.elements[3], MarkdownElement::paragraph(TRUNCATED_NOTICE));
    assert_eq!(parsed.diagnostics.degraded, Some(Degradation::Truncated));
}

#[test]
fn list_item_cap_drops_extras() {
    let limits = ParseLimits {
        max_list_items: 3,
        ..ParseLimits::default()
    };
    let text: String = (0..10).map(|i| format!("- item {i}\n")).collect();
    let parsed = parse_with(limits, &text);
    assert_eq!(
        &*parsed.elements,
        &[MarkdownElement::UnorderedList {
            items: vec!["item 0".into(), "item 1".into(), "item 2".into()],
            level: 1
        }]
    );
}

#[test]
fn deep_list_nesting_is_bounded() {
    let text: String = (0..40)
        .map(|depth| format!("{}- level {depth}\n", "    ".repeat(depth)))
        .collect();
    let parsed = parse(&text);
    let deepest = parsed.elements.iter().filter_map(|e| e.level()).max();
    assert_eq!(deepest, Some(ParseLimits::default().max_nesting_level));
}

#[test]
fn chunked_parse_matches_direct_parse() {
    let text = "# Title\n\nIntro paragraph.\n\n- a\n- b\n    - nested\n\n```rust\nlet x = 1;\n\nlet y = 2;\n```\n\n| h1 | h2 |\n|---|:---:|\n| 1 | 2 |\n\n> quote\n\n- [ ] task\n";

    let direct = parse(text);
    let chunked = parse_with(chunking_limits(), text);

    assert_eq!(chunked.elements, direct.elements);
    assert!(chunked.diagnostics.is_clean());
}

#[test]
fn chunk_cap_appends_partial_notice() {
    let limits = ParseLimits {
        max_chunks: 2,
        ..chunking_limits()
    };
    let parsed = parse_with(limits, "aaa\n\nbbb\n\nccc\n\nddd");
    assert_eq!(
        &*parsed.elements,
        &[
            MarkdownElement::paragraph("aaa"),
            MarkdownElement::paragraph("bbb"),
            MarkdownElement::paragraph(PARTIALLY_PARSED_NOTICE),
        ]
    );
    assert_eq!(parsed.diagnostics.degraded, Some(Degradation::PartiallyParsed));
}

#[test]
fn element_cap_spans_chunks() {
    let limits = ParseLimits {
        max_elements: 2,
        ..chunking_limits()
    };
    let parsed = parse_with(limits, "aaa\n\nbbb\n\nccc\n\nddd");
    assert_eq!(
        &*parsed.elements,
        &[
            MarkdownElement::paragraph("aaa"),
            MarkdownElement::paragraph("bbb"),
            MarkdownElement::paragraph(TRUNCATED_NOTICE),
        ]
    );
}

#[test]
fn wide_table_degrades_to_raw_text() {
    let limits = ParseLimits {
        max_table_columns: 2,
        ..ParseLimits::default()
    };
    let parsed = parse_with(limits, "| a | b | c |\n|---|---|---|\n\nafter");
    assert_eq!(
        &*parsed.elements,
        &[
            MarkdownElement::paragraph("| a | b | c |\n|---|---|---|"),
            MarkdownElement::paragraph("after"),
        ]
    );
}

#[test]
fn every_line_kind_in_one_document() {
    let text = "\
## Section
**bold** words
*soft* words
~~gone~~
==marked==
[docs](https://docs.rs)
![img](a.png)
```sh
ls
```
use `grep`
> quoted
1. first
2. second
---
[^1]: note
$$
x^2
$$
plain";
    let parsed = parse(text);
    assert_eq!(
        &*parsed.elements,
        &[
            MarkdownElement::Heading {
                level: 2,
                text: "Section".into()
            },
            MarkdownElement::Bold {
                text: "bold".into()
            },
            MarkdownElement::Italic {
                text: "soft".into()
            },
            MarkdownElement::Strikethrough {
                text: "gone".into()
            },
            MarkdownElement::Highlight {
                text: "marked".into()
            },
            MarkdownElement::Link {
                text: "docs".into(),
                url: "https://docs.rs".into()
            },
            MarkdownElement::Image {
                url: "a.png".into()
            },
            MarkdownElement::CodeBlock {
                text: "ls".into(),
                language: "sh".into()
            },
            MarkdownElement::Code {
                text: "grep".into()
            },
            MarkdownElement::BlockQuote {
                text: "quoted".into(),
                level: 1
            },
            MarkdownElement::OrderedList {
                items: vec!["first".into(), "second".into()],
                level: 1
            },
            MarkdownElement::Divider,
            MarkdownElement::Footnote {
                id: "1".into(),
                text: "note".into(),
                is_reference: false
            },
            MarkdownElement::Math {
                expression: "x^2".into(),
                is_inline: false
            },
            MarkdownElement::paragraph("plain"),
        ]
    );
}

#[test]
fn parser_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MarkdownParser>();

    let parser = MarkdownParser::new();
    let text = "# t\n\n- [ ] a\n- [ ] b";
    let expected = parser.parse(text).elements;

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| assert_eq!(parser.parse(text).elements, expected));
        }
    });
}
