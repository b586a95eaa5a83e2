//! Small string helpers shared by classifiers, consumers and the task patcher.

use super::patterns::ESCAPABLE;

/// Spaces one indentation level spans. Tabs count as a full level.
pub const INDENT_WIDTH: usize = 4;

/// Returns `s` cut to at most `max` chars, always on a char boundary.
pub fn cap(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Length in chars.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Leading indentation width in columns (space = 1, tab = [`INDENT_WIDTH`]).
pub fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { INDENT_WIDTH } else { 1 })
        .sum()
}

/// Canonical indentation-to-level mapping used by both the list consumer and
/// the task patcher: `indent / 4 + 1`, clamped to `max_level`.
pub fn indent_level(line: &str, max_level: usize) -> usize {
    (indent_width(line) / INDENT_WIDTH + 1).min(max_level.max(1))
}

/// Removes backslashes in front of characters from the escape table.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if ESCAPABLE.contains(&next) {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Whether the byte at `idx` is preceded by an odd run of backslashes.
pub fn is_escaped(s: &str, idx: usize) -> bool {
    s.as_bytes()[..idx]
        .iter()
        .rev()
        .take_while(|b| **b == b'\\')
        .count()
        % 2
        == 1
}

/// Strips a trailing `\n` or `\r\n`.
pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn cap_respects_char_boundaries() {
        assert_eq!(cap("héllo", 2), "hé");
        assert_eq!(cap("abc", 10), "abc");
        assert_eq!(cap("abc", 0), "");
    }

    #[rstest]
    #[case("- a", 1)]
    #[case("  - a", 1)]
    #[case("    - a", 2)]
    #[case("      - a", 2)]
    #[case("        - a", 3)]
    #[case("\t- a", 2)]
    fn indent_levels(#[case] line: &str, #[case] level: usize) {
        assert_eq!(indent_level(line, 10), level);
    }

    #[test]
    fn indent_level_is_clamped() {
        let line = format!("{}- deep", " ".repeat(80));
        assert_eq!(indent_level(&line, 3), 3);
    }

    #[test]
    fn unescape_only_known_characters() {
        assert_eq!(unescape(r"\*not bold\*"), "*not bold*");
        assert_eq!(unescape(r"C:\path"), r"C:\path");
        assert_eq!(unescape(r"trailing\"), r"trailing\");
    }

    #[test]
    fn escaped_detection_counts_backslashes() {
        assert!(is_escaped(r"\*", 1));
        assert!(!is_escaped(r"\\*", 2));
        assert!(!is_escaped("*", 0));
    }

    #[test]
    fn line_endings_stripped() {
        assert_eq!(strip_line_ending("a\r\n"), "a");
        assert_eq!(strip_line_ending("a\n"), "a");
        assert_eq!(strip_line_ending("a"), "a");
    }
}
