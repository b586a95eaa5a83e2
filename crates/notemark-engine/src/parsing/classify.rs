//! # Line Classifiers
//!
//! Pure single-line classifiers, one per syntax family. Each takes a trimmed
//! line and returns the element it recognizes, or `None` so the dispatcher
//! can try the next family. Multi-line constructs live in
//! [`super::blocks::kinds`].

use super::{
    limits::caps,
    patterns::{self, first_span},
    text::{cap, char_len, unescape},
    types::MarkdownElement,
};

/// `# text` … `###### text`.
pub fn heading(line: &str) -> Option<MarkdownElement> {
    let found = patterns::heading().captures(line)?;
    let text = found[2].trim();
    if text.is_empty() {
        return None;
    }
    Some(MarkdownElement::Heading {
        level: found[1].len() as u8,
        text: cap(text, caps::HEADING_TEXT),
    })
}

/// Footnotes, single-line block math, inline math, superscript, subscript,
/// tried in that order.
pub fn extended(line: &str) -> Option<MarkdownElement> {
    if let Some(found) = patterns::footnote_definition().captures(line) {
        return Some(MarkdownElement::Footnote {
            id: cap(&found[1], caps::FOOTNOTE_ID),
            text: cap(found[2].trim(), caps::FOOTNOTE_TEXT),
            is_reference: false,
        });
    }
    if let Some(id) = first_span(patterns::footnote_reference(), line, 2) {
        return Some(MarkdownElement::Footnote {
            id: cap(id, caps::FOOTNOTE_ID),
            text: String::new(),
            is_reference: true,
        });
    }
    if let Some(found) = patterns::block_math().captures(line) {
        let expression = found[1].trim();
        if !expression.is_empty() {
            return Some(MarkdownElement::Math {
                expression: cap(expression, caps::MATH_EXPRESSION),
                is_inline: false,
            });
        }
    }
    if let Some(expression) = first_span(patterns::inline_math(), line, 1)
        .map(str::trim)
        .filter(|e| !e.is_empty())
    {
        return Some(MarkdownElement::Math {
            expression: cap(expression, caps::MATH_EXPRESSION),
            is_inline: true,
        });
    }
    if let Some(text) = first_span(patterns::superscript(), line, 1) {
        return Some(MarkdownElement::Superscript {
            text: cap(text, caps::INLINE_TEXT),
        });
    }
    first_span(patterns::subscript(), line, 1).map(|text| MarkdownElement::Subscript {
        text: cap(text, caps::INLINE_TEXT),
    })
}

/// Highlight, strikethrough, bold, italic. The first family with a match
/// wins and only its first span is kept.
pub fn inline_format(line: &str) -> Option<MarkdownElement> {
    let text = |s: &str| cap(s, caps::INLINE_TEXT);

    if let Some(s) = first_span(patterns::highlight(), line, 2) {
        return Some(MarkdownElement::Highlight { text: text(s) });
    }
    if let Some(s) = first_span(patterns::strikethrough(), line, 2) {
        return Some(MarkdownElement::Strikethrough { text: text(s) });
    }
    if let Some(s) = first_span(patterns::bold(), line, 2) {
        return Some(MarkdownElement::Bold { text: text(s) });
    }
    first_span(patterns::italic(), line, 1).map(|s| MarkdownElement::Italic { text: text(s) })
}

/// Image, then link.
pub fn media(line: &str) -> Option<MarkdownElement> {
    if !line.contains("](") {
        return None;
    }
    if line.starts_with('!') {
        image(line)
    } else {
        link(line)
    }
}

fn image(line: &str) -> Option<MarkdownElement> {
    let open = line.find("](")? + 2;
    let close = open + line[open..].find(')')?;
    let url = line[open..close].trim();
    if url.is_empty() {
        return None;
    }
    Some(MarkdownElement::Image {
        url: cap(url, caps::URL),
    })
}

/// `[text](url)` with the two parts adjacent, no stray brackets inside the
/// text, no `(` inside the url, and both parts within their caps.
fn link(line: &str) -> Option<MarkdownElement> {
    let mid = line.find("](")?;
    let open = line[..mid].rfind('[')?;
    let text = &line[open + 1..mid];
    let url_start = mid + 2;
    let close = url_start + line[url_start..].find(')')?;
    let url = &line[url_start..close];

    if text.contains(']') || url.contains('(') {
        return None;
    }
    let (text, url) = (text.trim(), url.trim());
    if text.is_empty() || url.is_empty() {
        return None;
    }
    if char_len(text) > caps::LINK_TEXT || char_len(url) > caps::URL {
        return None;
    }
    Some(MarkdownElement::Link {
        text: text.to_string(),
        url: url.to_string(),
    })
}

/// A backtick pair with content between.
pub fn inline_code(line: &str) -> Option<MarkdownElement> {
    first_span(patterns::inline_code(), line, 1).map(|s| MarkdownElement::Code {
        text: cap(s, caps::INLINE_CODE),
    })
}

/// `---`, `***`, `___`.
pub fn divider(line: &str) -> Option<MarkdownElement> {
    patterns::divider()
        .is_match(line)
        .then_some(MarkdownElement::Divider)
}

/// Unconditional fallback.
pub fn paragraph(line: &str) -> MarkdownElement {
    MarkdownElement::Paragraph {
        text: cap(&unescape(line), caps::PARAGRAPH_TEXT),
    }
}
