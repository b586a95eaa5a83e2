use serde::Serialize;

/// Column alignment declared by a table's delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Alignment {
    /// `---` or `:---`
    #[default]
    Left,
    /// `:---:`
    Center,
    /// `---:`
    Right,
}

/// One parsed unit of document structure.
///
/// The parser classifies each source line (or multi-line construct) into
/// exactly one variant. Inline styles are not composed: a line containing
/// `**bold**` becomes a single [`MarkdownElement::Bold`] holding the first
/// matched span.
///
/// Text fields are capped when the element is built and are never touched
/// again afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MarkdownElement {
    /// `#` through `######` followed by a single space.
    Heading { level: u8, text: String },
    Bold { text: String },
    Italic { text: String },
    Strikethrough { text: String },
    Highlight { text: String },
    /// Fallback for anything no other family claims. Also used for
    /// diagnostic placeholders and raw-text degradation.
    Paragraph { text: String },
    Link { text: String, url: String },
    Image { url: String },
    /// Inline code span.
    Code { text: String },
    /// Fenced code block. `language` is empty when the fence has no tag.
    CodeBlock { text: String, language: String },
    /// One physical quote line. `level` counts the leading `>` markers.
    BlockQuote { text: String, level: usize },
    /// `headers` and `alignments` always have the same length.
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        alignments: Vec<Alignment>,
    },
    /// A contiguous run of same-level `- ` items.
    UnorderedList { items: Vec<String>, level: usize },
    /// A contiguous run of same-level `1. ` items.
    OrderedList { items: Vec<String>, level: usize },
    /// A single `- [ ]` / `- [x]` item. Never grouped.
    TaskList {
        text: String,
        checked: bool,
        level: usize,
    },
    /// `[^id]: text` definitions, or `[^id]` references (empty `text`).
    Footnote {
        id: String,
        text: String,
        is_reference: bool,
    },
    Superscript { text: String },
    Subscript { text: String },
    Math { expression: String, is_inline: bool },
    /// Horizontal rule.
    Divider,
}

impl MarkdownElement {
    pub fn paragraph(text: impl Into<String>) -> Self {
        MarkdownElement::Paragraph { text: text.into() }
    }

    /// Returns true for [`MarkdownElement::TaskList`].
    pub fn is_task(&self) -> bool {
        matches!(self, MarkdownElement::TaskList { .. })
    }

    /// Nesting level for list and quote variants, `None` for the rest.
    pub fn level(&self) -> Option<usize> {
        match self {
            MarkdownElement::BlockQuote { level, .. }
            | MarkdownElement::UnorderedList { level, .. }
            | MarkdownElement::OrderedList { level, .. }
            | MarkdownElement::TaskList { level, .. } => Some(*level),
            _ => None,
        }
    }
}
