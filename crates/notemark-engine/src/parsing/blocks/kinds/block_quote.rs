use crate::parsing::{limits::caps, text::cap, types::MarkdownElement};

/// Blockquote line type with owned delimiter constant.
///
/// Every physical quote line becomes its own element; consecutive lines are
/// not merged.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Counts contiguous leading `>` markers, returning (depth, byte_offset).
    ///
    /// One space after the last marker is part of the prefix: `>> text`
    /// yields depth 2 with content starting at `text`.
    pub fn strip_prefixes(s: &str) -> (usize, usize) {
        let b = s.as_bytes();
        let mut i = 0usize;
        while i < b.len() && b[i] == (Self::PREFIX as u8) {
            i += 1;
        }
        let depth = i;
        if depth > 0 && i < b.len() && b[i] == b' ' {
            i += 1;
        }
        (depth, i)
    }

    /// Classifies a trimmed line. Depths above `max_level` are no match.
    pub fn classify(line: &str, max_level: usize) -> Option<MarkdownElement> {
        let (depth, idx) = Self::strip_prefixes(line);
        if depth == 0 || depth > max_level {
            return None;
        }
        Some(MarkdownElement::BlockQuote {
            text: cap(line[idx..].trim(), caps::QUOTE_TEXT),
            level: depth,
        })
    }
}
