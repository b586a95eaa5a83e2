//! # Pattern Library
//!
//! Precompiled matchers shared by the classifiers, consumers and the task
//! patcher. Each pattern compiles once per process on first use.
//!
//! Line-level patterns (`heading`, `quote`, list markers, `divider`) are
//! anchored and expect a trimmed line, except the list markers which see the
//! raw line so they can capture indentation.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::text::is_escaped;

/// Characters a backslash may escape.
pub const ESCAPABLE: &[char] = &[
    '\\', '`', '*', '_', '{', '}', '[', ']', '(', ')', '#', '+', '-', '.', '!', '|', '~', '=',
    '^', '$', '>',
];

macro_rules! pattern {
    ($(#[$meta:meta])* $name:ident, $re:expr) => {
        $(#[$meta])*
        pub fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| {
                Regex::new($re).expect(concat!("Invalid ", stringify!($name), " regex"))
            })
        }
    };
}

pattern!(
    /// `# text` through `###### text`, exactly one space after the hashes.
    heading,
    r"^(#{1,6}) (\S.*)$"
);
pattern!(
    /// `[^id]: text`
    footnote_definition,
    r"^\[\^([^\]\s]+)\]:\s*(.*)$"
);
pattern!(
    /// `[^id]` anywhere in the line.
    footnote_reference,
    r"\[\^([^\]\s]+)\]"
);
pattern!(
    /// `$$expr$$` on one line.
    block_math,
    r"^\$\$(.+?)\$\$$"
);
pattern!(inline_math, r"\$([^$]+)\$");
pattern!(superscript, r"\^([^\^\s][^\^]*)\^");
pattern!(
    /// `~text~` but not `~~text~~`.
    subscript,
    r"(?:^|[^~])~([^~\s][^~]*)~(?:[^~]|$)"
);
pattern!(highlight, r"==([^=\s](?:[^=]*[^=\s])?)==");
pattern!(strikethrough, r"~~([^~\s](?:[^~]*[^~\s])?)~~");
pattern!(bold, r"\*\*([^*\s](?:.*?[^*\s])?)\*\*|__([^_\s](?:.*?[^_\s])?)__");
pattern!(
    /// `*text*`, or `_text_` bounded by non-word characters.
    italic,
    r"\*([^*\s](?:[^*]*[^*\s])?)\*|(?:^|\W)_([^_\s](?:[^_]*[^_\s])?)_(?:\W|$)"
);
pattern!(inline_code, r"`([^`]+)`");
pattern!(
    /// Raw task line: indentation, checkbox state, optional text.
    task,
    r"^([ \t]*)[-*+] \[([ xX])\](?:[ \t]+(.*))?$"
);
pattern!(unordered, r"^([ \t]*)[-*+] (.*)$");
pattern!(ordered, r"^([ \t]*)(\d{1,9})\. (.*)$");
pattern!(
    /// One or more contiguous `>` markers, optionally followed by a space.
    quote,
    r"^(>+) ?(.*)$"
);
pattern!(divider, r"^(?:-{3,}|\*{3,}|_{3,})$");
pattern!(alignment_cell, r"^:?-+:?$");
pattern!(
    /// A blank line between two blocks.
    blank_line_separator,
    r"\r?\n[ \t]*\r?\n"
);

/// Returns the first capture group that participated in the match.
pub fn first_group<'h>(caps: &Captures<'h>) -> Option<regex::Match<'h>> {
    caps.iter().skip(1).flatten().next()
}

/// Finds the first delimited span of `re` in `line` whose opening delimiter
/// (of `delim_len` bytes, directly before the first participating group) is
/// not backslash-escaped, and returns the captured content.
pub fn first_span<'h>(re: &Regex, line: &'h str, delim_len: usize) -> Option<&'h str> {
    re.captures_iter(line).find_map(|caps| {
        let inner = first_group(&caps)?;
        let open = inner.start().checked_sub(delim_len)?;
        (!is_escaped(line, open)).then(|| inner.as_str())
    })
}
