//! # Multi-line Consumers
//!
//! Block constructs that may span more than one source line. Each consumer
//! starts at the line the dispatcher handed it and reports how far it got.
//!
//! ## Modules
//!
//! - **`kinds`**: one type per construct owning its delimiters
//!   (`BlockQuote`, `CodeFence`, `MathBlock`, `Table`, `ListConsumer`)
//!
//! ## Key Invariants
//!
//! - A consumer always advances the cursor by at least one line
//! - Unterminated or oversized constructs degrade to a [`raw_paragraph`]
//!   holding the scanned text instead of disappearing
//! - List nesting is bounded by the nesting limit, not by the call stack

pub mod kinds;

use super::{limits::caps, text::cap, types::MarkdownElement};

/// Output of a multi-line consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumed {
    pub elements: Vec<MarkdownElement>,
    /// Index of the first line the consumer did not take.
    pub next: usize,
    /// Source line of each [`MarkdownElement::TaskList`] in `elements`, in
    /// order.
    pub task_lines: Vec<usize>,
}

impl Consumed {
    pub fn one(element: MarkdownElement, next: usize) -> Self {
        Self {
            elements: vec![element],
            next,
            task_lines: Vec::new(),
        }
    }
}

/// Degraded form of a multi-line construct: its raw lines as one paragraph.
pub fn raw_paragraph(lines: &[&str]) -> MarkdownElement {
    MarkdownElement::Paragraph {
        text: cap(&lines.join("\n"), caps::PARAGRAPH_TEXT),
    }
}
