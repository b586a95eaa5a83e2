//! # Dispatch Engine
//!
//! Walks the lines of one document (or one chunk) with a cursor, trying the
//! classifiers and consumers in a fixed priority order:
//!
//! heading → extended syntax → inline format → media → code fence →
//! inline code → block quote → list → divider → table → paragraph
//!
//! Every step advances the cursor by at least one line. A panic inside a step
//! is contained to that line.

use std::panic::{self, AssertUnwindSafe};

use super::{
    blocks::{
        Consumed,
        kinds::{BlockQuote, CodeFence, ListConsumer, ListLine, MathBlock, Table},
    },
    classify,
    diagnostics::{Degradation, Diagnostics, ParseError, TRUNCATED_NOTICE, panic_message},
    limits::ParseLimits,
    types::MarkdownElement,
};

/// Elements of one dispatch run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Dispatched {
    pub elements: Vec<MarkdownElement>,
    /// Input line index of each [`MarkdownElement::TaskList`] in `elements`,
    /// in order. This is what the task patcher edits.
    pub task_lines: Vec<usize>,
}

impl Dispatched {
    /// Cuts back to the first `len` elements, dropping the source lines of
    /// any task items removed with them.
    fn truncate(&mut self, len: usize) {
        self.elements.truncate(len);
        let tasks = self.elements.iter().filter(|e| e.is_task()).count();
        self.task_lines.truncate(tasks);
    }
}

/// A line containing this panics mid-step.
#[cfg(test)]
pub(crate) const PANIC_ON_LINE: &str = "<<panic line>>";
/// Input containing this panics before the line loop starts.
#[cfg(test)]
pub(crate) const PANIC_ON_DISPATCH: &str = "<<panic dispatch>>";

pub struct Dispatcher<'a> {
    limits: &'a ParseLimits,
}

impl<'a> Dispatcher<'a> {
    pub fn new(limits: &'a ParseLimits) -> Self {
        Self { limits }
    }

    /// Parses `lines`, producing at most `budget` elements plus one
    /// truncation notice if the budget runs out before the input does.
    pub fn parse_lines(
        &self,
        lines: &[&str],
        budget: usize,
        diagnostics: &mut Diagnostics,
    ) -> Result<Dispatched, ParseError> {
        #[cfg(test)]
        if lines.iter().any(|l| l.contains(PANIC_ON_DISPATCH)) {
            panic!("forced dispatch failure");
        }

        let mut out = Dispatched::default();
        out.elements.try_reserve(lines.len().min(budget))?;

        let mut truncated = false;
        let mut i = 0;
        while i < lines.len() {
            if lines[i].trim().is_empty() {
                i += 1;
                continue;
            }
            if out.elements.len() >= budget {
                truncated = true;
                break;
            }
            let mark = out.elements.len();
            let step = panic::catch_unwind(AssertUnwindSafe(|| self.step(lines, i, &mut out)));
            i = match step {
                Ok(next) => next.max(i + 1),
                Err(payload) => {
                    out.truncate(mark);
                    diagnostics.record(&ParseError::LinePanicked {
                        line: i + 1,
                        message: panic_message(payload.as_ref()),
                    });
                    i + 1
                }
            };
        }

        if truncated || out.elements.len() > budget {
            out.truncate(budget);
            out.elements.push(MarkdownElement::paragraph(TRUNCATED_NOTICE));
            diagnostics.degrade(Degradation::Truncated);
        }
        Ok(out)
    }

    /// Handles the non-blank line at `i`, returning the index of the next
    /// unconsumed line.
    fn step(&self, lines: &[&str], i: usize, out: &mut Dispatched) -> usize {
        let raw = lines[i];
        let line = raw.trim();

        #[cfg(test)]
        if raw.contains(PANIC_ON_LINE) {
            out.elements.push(MarkdownElement::paragraph(line));
            panic!("forced line failure");
        }

        let single = |out: &mut Dispatched, element| {
            out.elements.push(element);
            i + 1
        };
        let multi = |out: &mut Dispatched, consumed: Consumed| {
            out.elements.extend(consumed.elements);
            out.task_lines.extend(consumed.task_lines);
            consumed.next
        };

        if let Some(element) = classify::heading(line) {
            return single(out, element);
        }
        if MathBlock::opens(line) {
            return multi(out, MathBlock::consume(lines, i, self.limits));
        }
        if let Some(element) = classify::extended(line)
            .or_else(|| classify::inline_format(line))
            .or_else(|| classify::media(line))
        {
            return single(out, element);
        }
        if CodeFence::sig(line).is_some() {
            return multi(out, CodeFence::consume(lines, i, self.limits));
        }
        if let Some(element) = classify::inline_code(line)
            .or_else(|| BlockQuote::classify(line, self.limits.max_nesting_level))
        {
            return single(out, element);
        }
        if ListLine::parse(raw, self.limits.max_nesting_level).is_some() {
            return multi(out, ListConsumer::consume(lines, i, self.limits));
        }
        if let Some(element) = classify::divider(line) {
            return single(out, element);
        }
        if Table::opens(line) {
            return multi(out, Table::consume(lines, i, self.limits));
        }
        single(out, classify::paragraph(line))
    }
}
