pub mod editing;
pub mod parsing;

// Re-export key types for easier usage
pub use editing::{TaskItem, TaskPatcher, ToggleError};
pub use parsing::{
    Alignment, Degradation, Diagnostics, MarkdownElement, MarkdownParser, ParseCache, ParseLimits,
    Parsed, parse_document,
};
