use serde::Serialize;

use crate::parsing::{
    MarkdownElement, MarkdownParser,
    blocks::kinds::list::item_text,
    patterns,
    text::{indent_level, strip_line_ending},
};

/// Why a toggle left the content untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleError {
    #[error("Content is blank")]
    BlankContent,
    #[error("Task index {index} out of range, document has {count} tasks")]
    IndexOutOfRange { index: usize, count: usize },
    #[error(
        "Task {index} is {actual_text:?} (checked: {actual_checked}), expected {expected_text:?} (checked: {expected_checked})"
    )]
    StateMismatch {
        index: usize,
        expected_text: String,
        expected_checked: bool,
        actual_text: String,
        actual_checked: bool,
    },
    #[error("No source line found for task {index}")]
    LineNotFound { index: usize },
}

/// One task item as the parser sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskItem {
    pub index: usize,
    pub text: String,
    pub checked: bool,
    pub level: usize,
}

/// Flips task checkboxes in the source text without re-rendering it.
///
/// The target is identified by its task index plus the state the caller last
/// saw. The parse reports which source line each task came from, and the
/// patch only goes through when both that parse and the raw line still agree
/// with the expected state. Everything except the one checkbox character is
/// copied through byte for byte.
pub struct TaskPatcher<'p> {
    parser: &'p MarkdownParser,
}

impl<'p> TaskPatcher<'p> {
    pub fn new(parser: &'p MarkdownParser) -> Self {
        Self { parser }
    }

    pub fn tasks(&self, content: &str) -> Vec<TaskItem> {
        self.parser
            .parse(content)
            .tasks()
            .enumerate()
            .filter_map(|(index, element)| match element {
                MarkdownElement::TaskList {
                    text,
                    checked,
                    level,
                } => Some(TaskItem {
                    index,
                    text: text.clone(),
                    checked: *checked,
                    level: *level,
                }),
                _ => None,
            })
            .collect()
    }

    /// Returns `content` unchanged when the toggle cannot be applied.
    pub fn toggle(
        &self,
        content: &str,
        task_index: usize,
        expected_text: &str,
        expected_checked: bool,
    ) -> String {
        match self.try_toggle(content, task_index, expected_text, expected_checked) {
            Ok(patched) => patched,
            Err(err) => {
                match err {
                    ToggleError::BlankContent | ToggleError::IndexOutOfRange { .. } => {
                        log::debug!("task toggle skipped: {err}")
                    }
                    ToggleError::StateMismatch { .. } | ToggleError::LineNotFound { .. } => {
                        log::warn!("task toggle skipped: {err}")
                    }
                }
                content.to_string()
            }
        }
    }

    pub fn try_toggle(
        &self,
        content: &str,
        task_index: usize,
        expected_text: &str,
        expected_checked: bool,
    ) -> Result<String, ToggleError> {
        if content.trim().is_empty() {
            return Err(ToggleError::BlankContent);
        }

        let dispatched = self.parser.parse_with_task_lines(content).unwrap_or_default();
        let count = dispatched.task_lines.len();
        let (text, checked, level) = dispatched
            .elements
            .iter()
            .filter_map(|element| match element {
                MarkdownElement::TaskList {
                    text,
                    checked,
                    level,
                } => Some((text, *checked, *level)),
                _ => None,
            })
            .nth(task_index)
            .ok_or(ToggleError::IndexOutOfRange {
                index: task_index,
                count,
            })?;
        if text != expected_text || checked != expected_checked {
            return Err(ToggleError::StateMismatch {
                index: task_index,
                expected_text: expected_text.to_string(),
                expected_checked,
                actual_text: text.clone(),
                actual_checked: checked,
            });
        }

        let not_found = ToggleError::LineNotFound { index: task_index };
        let line_no = *dispatched.task_lines.get(task_index).ok_or(not_found.clone())?;
        let (offset, line) = content
            .split_inclusive('\n')
            .scan(0, |offset, line| {
                let start = *offset;
                *offset += line.len();
                Some((start, line))
            })
            .nth(line_no)
            .ok_or(not_found.clone())?;

        let body = strip_line_ending(line);
        let found = patterns::task().captures(body).ok_or(not_found.clone())?;
        let state = found.get(2).ok_or(not_found.clone())?;
        let max_level = self.parser.limits().max_nesting_level;
        if indent_level(body, max_level) != level || item_text(found.get(3)) != *text {
            return Err(not_found);
        }

        let flipped = if state.as_str().trim().is_empty() { "x" } else { " " };
        let at = offset + state.start();
        let mut out = String::with_capacity(content.len());
        out.push_str(&content[..at]);
        out.push_str(flipped);
        out.push_str(&content[offset + state.end()..]);
        Ok(out)
    }
}
