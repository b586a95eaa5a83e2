//! Error taxonomy and the diagnostics value returned alongside every parse.
//!
//! Errors never escape [`crate::parsing::MarkdownParser::parse`]. They are
//! recorded here (and logged) while the parser degrades to placeholder
//! elements.

use std::{any::Any, collections::TryReserveError};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Document too large to display: {len} characters (limit {max})")]
    InputTooLarge { len: usize, max: usize },
    #[error("Out of memory while parsing document: {0}")]
    OutOfMemory(#[from] TryReserveError),
    #[error("Line {line} could not be parsed: {message}")]
    LinePanicked { line: usize, message: String },
    #[error("Chunk {chunk} could not be parsed: {message}")]
    ChunkPanicked { chunk: usize, message: String },
    #[error("Parser failed: {0}")]
    Panicked(String),
}

/// How far a result fell back from a regular parse. Ordered from mildest to
/// most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Degradation {
    /// Element cap reached; a truncation notice ends the sequence.
    Truncated,
    /// Chunk cap reached; a partial-parse notice ends the sequence.
    PartiallyParsed,
    /// The dispatch loop failed; blocks were split on blank lines instead.
    SimpleFallback,
    /// An allocation failed; the cache was cleared.
    OutOfMemory,
    /// Input exceeded the length limit and was not scanned.
    InputTooLarge,
}

pub const TRUNCATED_NOTICE: &str = "Document too complex, remaining content truncated.";
pub const PARTIALLY_PARSED_NOTICE: &str =
    "Document partially parsed, remaining content skipped.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Recovered errors during this parse.
    pub error_count: usize,
    /// Message of the most recent recovered error.
    pub last_error: Option<String>,
    /// Most severe fallback taken, if any.
    pub degraded: Option<Degradation>,
}

impl Diagnostics {
    pub fn record(&mut self, err: &ParseError) {
        log::warn!("{err}");
        self.error_count += 1;
        self.last_error = Some(err.to_string());
    }

    pub fn degrade(&mut self, degradation: Degradation) {
        self.degraded = self.degraded.max(Some(degradation));
    }

    /// No errors and no fallback.
    pub fn is_clean(&self) -> bool {
        self.error_count == 0 && self.degraded.is_none()
    }

    /// Results from the catastrophic tiers are not worth memoizing.
    pub fn is_cacheable(&self) -> bool {
        !matches!(
            self.degraded,
            Some(Degradation::SimpleFallback | Degradation::OutOfMemory)
        )
    }
}

/// Best-effort text of a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
