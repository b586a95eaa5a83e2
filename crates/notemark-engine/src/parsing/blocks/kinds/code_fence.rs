use crate::parsing::{
    blocks::{Consumed, raw_paragraph},
    limits::{ParseLimits, caps},
    text::{cap, char_len},
    types::MarkdownElement,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    fn char(self) -> char {
        match self {
            FenceKind::Backticks => '`',
            FenceKind::Tildes => '~',
        }
    }
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    /// Fence kind if the trimmed line opens (or could close) a fence.
    pub fn sig(line: &str) -> Option<FenceKind> {
        let t = line.trim();
        if t.starts_with(Self::BACKTICKS) {
            Some(FenceKind::Backticks)
        } else if t.starts_with(Self::TILDES) {
            Some(FenceKind::Tildes)
        } else {
            None
        }
    }

    /// A closing fence is three or more fence characters and nothing else.
    pub fn closes(kind: FenceKind, line: &str) -> bool {
        let t = line.trim();
        t.len() >= 3 && t.chars().all(|c| c == kind.char())
    }

    /// Consumes a fenced block starting at `start`.
    ///
    /// Body lines keep their indentation. Without a closing fence before the
    /// end of input or the line limit, the scanned lines degrade to a raw
    /// paragraph and the cursor moves past them.
    pub fn consume(lines: &[&str], start: usize, limits: &ParseLimits) -> Consumed {
        let opener = lines[start].trim();
        let Some(kind) = Self::sig(opener) else {
            return Consumed::one(raw_paragraph(&lines[start..=start]), start + 1);
        };
        let language = opener
            .trim_start_matches(kind.char())
            .split_whitespace()
            .next()
            .map(|tag| cap(tag, caps::CODE_LANGUAGE))
            .unwrap_or_default();

        let mut body = String::new();
        let mut body_chars = 0usize;
        let mut i = start + 1;
        while i < lines.len() && i - start <= limits.max_code_block_lines {
            let line = lines[i];
            if Self::closes(kind, line) {
                return Consumed::one(
                    MarkdownElement::CodeBlock {
                        text: cap(&body, caps::CODE_BLOCK_TEXT),
                        language,
                    },
                    i + 1,
                );
            }
            if body_chars < caps::CODE_BLOCK_TEXT {
                if i > start + 1 {
                    body.push('\n');
                    body_chars += 1;
                }
                let line = cap(line, caps::CODE_LINE);
                body_chars += char_len(&line);
                body.push_str(&line);
            }
            i += 1;
        }

        log::debug!("unterminated code fence at line {}", start + 1);
        Consumed::one(raw_paragraph(&lines[start..i]), i)
    }
}
