use crate::parsing::{
    blocks::{Consumed, raw_paragraph},
    limits::{ParseLimits, caps},
    text::cap,
    types::MarkdownElement,
};

/// Display math spanning several lines between two `$$` lines.
///
/// Single-line `$$expr$$` is handled by the extended-syntax classifier.
pub struct MathBlock;

impl MathBlock {
    pub const DELIMITER: &'static str = "$$";

    pub fn opens(line: &str) -> bool {
        line.trim() == Self::DELIMITER
    }

    pub fn consume(lines: &[&str], start: usize, limits: &ParseLimits) -> Consumed {
        let mut i = start + 1;
        while i < lines.len() && i - start <= limits.max_code_block_lines {
            if Self::opens(lines[i]) {
                let expression = lines[start + 1..i].join("\n");
                return Consumed::one(
                    MarkdownElement::Math {
                        expression: cap(expression.trim(), caps::MATH_EXPRESSION),
                        is_inline: false,
                    },
                    i + 1,
                );
            }
            i += 1;
        }

        log::debug!("unterminated math block at line {}", start + 1);
        Consumed::one(raw_paragraph(&lines[start..i]), i)
    }
}
