//! # Parsing
//!
//! Turns Markdown-like text into a flat sequence of [`MarkdownElement`]s, one
//! per recognized line or multi-line construct.
//!
//! ## Modules
//!
//! - **`patterns`**: precompiled regexes shared by everything below
//! - **`classify`**: single-line classifiers
//! - **`blocks`**: multi-line consumers (fences, math, tables, lists, quotes)
//! - **`dispatch`**: the priority-ordered line loop
//! - **`chunk`**: blank-line splitting of large inputs
//! - **`cache`**: LRU of finished results
//! - **`fallback`**: paragraph splitting used when dispatch fails
//!
//! ## Degradation Ladder
//!
//! [`MarkdownParser::parse`] always returns. From mildest to most severe:
//!
//! 1. a single failing line is skipped
//! 2. a failing chunk becomes one paragraph of its raw text
//! 3. a failing dispatch loop falls back to [`fallback::simple_paragraphs`]
//! 4. a failed allocation clears the cache and yields one notice paragraph
//! 5. oversized input yields one notice paragraph without being scanned
//!
//! Which rung was reached is reported in [`Diagnostics::degraded`].

pub mod blocks;
pub mod cache;
pub mod chunk;
pub mod classify;
pub mod diagnostics;
pub mod dispatch;
pub mod fallback;
pub mod limits;
pub mod patterns;
pub mod text;
pub mod types;

#[cfg(test)]
mod tests;

use std::{
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use crate::editing::tasks::{TaskItem, TaskPatcher, ToggleError};

pub use cache::{CacheEntry, ParseCache};
pub use diagnostics::{Degradation, Diagnostics, ParseError};
pub use limits::ParseLimits;
pub use types::{Alignment, MarkdownElement};

use diagnostics::{PARTIALLY_PARSED_NOTICE, panic_message};
use dispatch::{Dispatched, Dispatcher};
use limits::caps;
use text::{cap, char_len};

/// Result of one [`MarkdownParser::parse`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub elements: Arc<[MarkdownElement]>,
    pub diagnostics: Diagnostics,
    /// True when the elements came straight from the cache.
    pub from_cache: bool,
}

impl Parsed {
    /// Task items in document order. Their position in this iterator is the
    /// task index understood by the task patcher.
    pub fn tasks(&self) -> impl Iterator<Item = &MarkdownElement> {
        self.elements.iter().filter(|e| e.is_task())
    }
}

/// Bounded, cached Markdown parser.
///
/// Cheap to share across threads; the only mutable state is the injected
/// [`ParseCache`].
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    limits: ParseLimits,
    cache: Arc<ParseCache>,
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self::with_limits(ParseLimits::default())
    }

    pub fn with_limits(limits: ParseLimits) -> Self {
        Self {
            limits: limits.sanitized(),
            cache: Arc::new(ParseCache::default()),
        }
    }

    /// Replaces the cache, e.g. to share one between several parsers. Entries
    /// are keyed by text and limits, so parsers with different limits never
    /// see each other's results.
    pub fn with_cache(mut self, cache: Arc<ParseCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn limits(&self) -> &ParseLimits {
        &self.limits
    }

    pub fn cache(&self) -> &Arc<ParseCache> {
        &self.cache
    }

    /// Parses `text`. Never panics; failures show up as notice paragraphs in
    /// the elements and in the returned diagnostics.
    pub fn parse(&self, text: &str) -> Parsed {
        let mut diagnostics = Diagnostics::default();

        if text.len() > self.limits.max_text_length {
            let len = char_len(text);
            if len > self.limits.max_text_length {
                let err = ParseError::InputTooLarge {
                    len,
                    max: self.limits.max_text_length,
                };
                diagnostics.record(&err);
                diagnostics.degrade(Degradation::InputTooLarge);
                return Parsed {
                    elements: vec![MarkdownElement::paragraph(err.to_string())].into(),
                    diagnostics,
                    from_cache: false,
                };
            }
        }

        let key = ParseCache::key_for(text, &self.limits);
        if let Some(entry) = self.cache.lookup(key) {
            log::debug!("parse cache hit for {key:016x}");
            return Parsed {
                elements: entry.elements,
                diagnostics: entry.diagnostics,
                from_cache: true,
            };
        }

        let outcome =
            panic::catch_unwind(AssertUnwindSafe(|| self.parse_uncached(text, &mut diagnostics)));
        let elements = match outcome {
            Ok(Ok(dispatched)) => dispatched.elements,
            Ok(Err(err @ ParseError::OutOfMemory(_))) => {
                diagnostics.record(&err);
                diagnostics.degrade(Degradation::OutOfMemory);
                self.cache.clear();
                vec![MarkdownElement::paragraph(err.to_string())]
            }
            Ok(Err(err)) => {
                diagnostics.record(&err);
                self.simple_fallback(text, &mut diagnostics)
            }
            Err(payload) => {
                diagnostics.record(&ParseError::Panicked(panic_message(payload.as_ref())));
                self.simple_fallback(text, &mut diagnostics)
            }
        };

        let elements: Arc<[MarkdownElement]> = elements.into();
        if diagnostics.is_cacheable() {
            self.cache.store(
                key,
                CacheEntry {
                    elements: Arc::clone(&elements),
                    diagnostics: diagnostics.clone(),
                },
            );
        }
        Parsed {
            elements,
            diagnostics,
            from_cache: false,
        }
    }

    /// Task items of `content`, in task-index order.
    pub fn tasks(&self, content: &str) -> Vec<TaskItem> {
        TaskPatcher::new(self).tasks(content)
    }

    /// Flips the checkbox of task `task_index` in `content`, returning the
    /// patched text, or `content` unchanged if the task does not match the
    /// expected state.
    pub fn toggle_task_state(
        &self,
        content: &str,
        task_index: usize,
        task_text: &str,
        current_checked: bool,
    ) -> String {
        TaskPatcher::new(self).toggle(content, task_index, task_text, current_checked)
    }

    /// Like [`Self::toggle_task_state`] but reports why nothing changed.
    pub fn try_toggle_task_state(
        &self,
        content: &str,
        task_index: usize,
        task_text: &str,
        current_checked: bool,
    ) -> Result<String, ToggleError> {
        TaskPatcher::new(self).try_toggle(content, task_index, task_text, current_checked)
    }

    /// Parses `text` bypassing the cache, keeping the source line of every
    /// task item. `None` whenever [`Self::parse`] would have produced no
    /// tasks because it degraded past the chunk level.
    pub(crate) fn parse_with_task_lines(&self, text: &str) -> Option<Dispatched> {
        if char_len(text) > self.limits.max_text_length {
            return None;
        }
        let mut diagnostics = Diagnostics::default();
        panic::catch_unwind(AssertUnwindSafe(|| self.parse_uncached(text, &mut diagnostics)))
            .ok()?
            .ok()
    }

    fn parse_uncached(
        &self,
        text: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<Dispatched, ParseError> {
        let dispatcher = Dispatcher::new(&self.limits);
        let threshold = self.limits.chunk_threshold;
        if text.len() <= threshold || char_len(text) <= threshold {
            let lines = collect_lines(text)?;
            return dispatcher.parse_lines(&lines, self.limits.max_elements, diagnostics);
        }

        let chunks = chunk::split_chunks(text, self.limits.chunk_size);
        log::debug!(
            "parsing {} characters in {} chunks",
            char_len(text),
            chunks.len()
        );

        let mut out = Dispatched::default();
        out.elements.try_reserve(chunks.len().min(self.limits.max_elements))?;
        let mut first_line = 0;
        for (n, chunk) in chunks.iter().enumerate() {
            if n >= self.limits.max_chunks {
                log::warn!(
                    "document split into {} chunks (limit {}), skipping the rest",
                    chunks.len(),
                    self.limits.max_chunks
                );
                out.elements.push(MarkdownElement::paragraph(PARTIALLY_PARSED_NOTICE));
                diagnostics.degrade(Degradation::PartiallyParsed);
                break;
            }

            let budget = self.limits.max_elements.saturating_sub(out.elements.len());
            let parsed = panic::catch_unwind(AssertUnwindSafe(|| {
                let lines = collect_lines(chunk)?;
                dispatcher.parse_lines(&lines, budget, diagnostics)
            }));
            match parsed {
                Ok(dispatched) => {
                    let dispatched = dispatched?;
                    let truncated = dispatched.elements.len() > budget;
                    out.elements.extend(dispatched.elements);
                    out.task_lines
                        .extend(dispatched.task_lines.iter().map(|line| first_line + line));
                    if truncated {
                        break;
                    }
                }
                Err(payload) => {
                    diagnostics.record(&ParseError::ChunkPanicked {
                        chunk: n + 1,
                        message: panic_message(payload.as_ref()),
                    });
                    out.elements
                        .push(MarkdownElement::paragraph(cap(chunk.trim(), caps::PARAGRAPH_TEXT)));
                }
            }
            // Every chunk but the last ends in a newline.
            first_line += chunk.lines().count();
        }
        Ok(out)
    }

    fn simple_fallback(&self, text: &str, diagnostics: &mut Diagnostics) -> Vec<MarkdownElement> {
        diagnostics.degrade(Degradation::SimpleFallback);
        panic::catch_unwind(AssertUnwindSafe(|| {
            fallback::simple_paragraphs(text, &self.limits)
        }))
        .unwrap_or_else(|payload| {
            diagnostics.record(&ParseError::Panicked(panic_message(payload.as_ref())));
            vec![MarkdownElement::paragraph(cap(text.trim(), caps::PARAGRAPH_TEXT))]
        })
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses `text` with default limits and a private cache.
pub fn parse_document(text: &str) -> Vec<MarkdownElement> {
    MarkdownParser::default().parse(text).elements.to_vec()
}

fn collect_lines(text: &str) -> Result<Vec<&str>, ParseError> {
    let mut lines = Vec::new();
    lines.try_reserve(text.lines().count())?;
    lines.extend(text.lines());
    Ok(lines)
}
