//! # Resource Guard
//!
//! Every bound the parser enforces, as named constants. Structural bounds are
//! grouped into [`ParseLimits`] so callers (and the config file) can tighten
//! or relax them; per-field text caps live in [`caps`] and are fixed.
//!
//! Lengths are measured in `char`s, not bytes.

use serde::{Deserialize, Serialize};

/// Documents longer than this are rejected before any line is scanned.
pub const MAX_TEXT_LENGTH: usize = 1_000_000;
/// Deepest quote level and list level the parser will produce.
pub const MAX_NESTING_LEVEL: usize = 10;
/// Tables whose header row has more columns are not emitted as tables.
pub const MAX_TABLE_COLUMNS: usize = 50;
/// Most `|` lines one table consumes, header and alignment rows included.
pub const MAX_TABLE_ROWS: usize = 1_000;
/// Most items kept in a single list group.
pub const MAX_LIST_ITEMS: usize = 1_000;
/// Most elements returned for one document (plus one truncation notice).
pub const MAX_ELEMENTS: usize = 10_000;
/// Most chunks parsed for a large document.
pub const MAX_CHUNKS: usize = 100;
/// Documents longer than this are parsed chunk by chunk.
pub const CHUNK_THRESHOLD: usize = 50_000;
/// Target size of one chunk.
pub const CHUNK_SIZE: usize = 10_000;
/// Most body lines a fenced code block may span before it is abandoned.
pub const MAX_CODE_BLOCK_LINES: usize = 1_000;
/// Most blocks the simple paragraph-splitting fallback produces.
pub const MAX_FALLBACK_BLOCKS: usize = 1_000;
/// Entries held by the result cache.
pub const CACHE_CAPACITY: usize = 50;

/// Per-field text caps, applied when an element is built.
pub mod caps {
    pub const HEADING_TEXT: usize = 500;
    pub const PARAGRAPH_TEXT: usize = 10_000;
    pub const INLINE_TEXT: usize = 1_000;
    pub const QUOTE_TEXT: usize = 2_000;
    pub const LIST_ITEM_TEXT: usize = 1_000;
    pub const CODE_LANGUAGE: usize = 20;
    pub const CODE_LINE: usize = 1_000;
    pub const CODE_BLOCK_TEXT: usize = 50_000;
    pub const INLINE_CODE: usize = 1_000;
    pub const CELL_TEXT: usize = 500;
    pub const FOOTNOTE_ID: usize = 50;
    pub const FOOTNOTE_TEXT: usize = 1_000;
    pub const MATH_EXPRESSION: usize = 2_000;
    pub const URL: usize = 2_000;
    pub const LINK_TEXT: usize = 500;
}

/// Structural bounds for one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseLimits {
    pub max_text_length: usize,
    pub max_nesting_level: usize,
    pub max_table_columns: usize,
    pub max_table_rows: usize,
    pub max_list_items: usize,
    pub max_elements: usize,
    pub max_chunks: usize,
    pub chunk_threshold: usize,
    pub chunk_size: usize,
    pub max_code_block_lines: usize,
    pub max_fallback_blocks: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_text_length: MAX_TEXT_LENGTH,
            max_nesting_level: MAX_NESTING_LEVEL,
            max_table_columns: MAX_TABLE_COLUMNS,
            max_table_rows: MAX_TABLE_ROWS,
            max_list_items: MAX_LIST_ITEMS,
            max_elements: MAX_ELEMENTS,
            max_chunks: MAX_CHUNKS,
            chunk_threshold: CHUNK_THRESHOLD,
            chunk_size: CHUNK_SIZE,
            max_code_block_lines: MAX_CODE_BLOCK_LINES,
            max_fallback_blocks: MAX_FALLBACK_BLOCKS,
        }
    }
}

impl ParseLimits {
    /// Clamps values that would make the parser misbehave (zero nesting,
    /// zero-sized chunks) to their smallest usable setting.
    pub fn sanitized(self) -> Self {
        Self {
            max_nesting_level: self.max_nesting_level.max(1),
            max_table_rows: self.max_table_rows.max(1),
            chunk_size: self.chunk_size.max(1),
            max_code_block_lines: self.max_code_block_lines.max(1),
            ..self
        }
    }
}
