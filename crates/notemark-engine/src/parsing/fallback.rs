use super::{
    limits::{ParseLimits, caps},
    patterns,
    text::cap,
    types::MarkdownElement,
};

/// Last-resort parse: every blank-line-delimited block becomes a heading
/// (when it starts with `#`) or a paragraph. Used when the dispatch loop
/// itself failed, so it deliberately touches none of the classifiers.
pub fn simple_paragraphs(text: &str, limits: &ParseLimits) -> Vec<MarkdownElement> {
    patterns::blank_line_separator()
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .take(limits.max_fallback_blocks)
        .map(block_element)
        .collect()
}

fn block_element(block: &str) -> MarkdownElement {
    if !block.starts_with('#') {
        return MarkdownElement::paragraph(cap(block, caps::PARAGRAPH_TEXT));
    }
    let hashes = block.chars().take_while(|&c| c == '#').count();
    MarkdownElement::Heading {
        level: hashes.clamp(1, 6) as u8,
        text: cap(block[hashes..].trim(), caps::HEADING_TEXT),
    }
}
