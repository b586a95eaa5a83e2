use crate::parsing::{
    blocks::Consumed,
    limits::{ParseLimits, caps},
    patterns,
    text::{cap, indent_level},
    types::MarkdownElement,
};

/// Which marker family a list line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFamily {
    /// `- [ ] ` / `- [x] `
    Task,
    /// `- `, `* `, `+ `
    Unordered,
    /// `1. `
    Ordered,
}

/// One raw list line, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLine {
    pub family: ListFamily,
    pub level: usize,
    pub text: String,
    /// Only meaningful for [`ListFamily::Task`].
    pub checked: bool,
}

impl ListLine {
    /// Classifies an untrimmed line. Task markers win over plain bullets.
    pub fn parse(raw: &str, max_level: usize) -> Option<Self> {
        let level = || indent_level(raw, max_level);

        if let Some(found) = patterns::task().captures(raw) {
            return Some(Self {
                family: ListFamily::Task,
                level: level(),
                text: item_text(found.get(3)),
                checked: !found[2].trim().is_empty(),
            });
        }
        if let Some(found) = patterns::unordered().captures(raw) {
            return Some(Self {
                family: ListFamily::Unordered,
                level: level(),
                text: item_text(found.get(2)),
                checked: false,
            });
        }
        patterns::ordered().captures(raw).map(|found| Self {
            family: ListFamily::Ordered,
            level: level(),
            text: item_text(found.get(3)),
            checked: false,
        })
    }
}

/// Trimmed, capped item text. Shared with the task patcher so both sides
/// compare the same string.
pub fn item_text(found: Option<regex::Match<'_>>) -> String {
    cap(found.map_or("", |m| m.as_str()).trim(), caps::LIST_ITEM_TEXT)
}

/// A list run being collected at one nesting level.
#[derive(Debug)]
struct Frame {
    level: usize,
    family: ListFamily,
    items: Vec<String>,
    taken: usize,
    dropped: usize,
}

impl Frame {
    fn new(level: usize, family: ListFamily) -> Self {
        Self {
            level,
            family,
            items: Vec::new(),
            taken: 0,
            dropped: 0,
        }
    }

    /// Takes the item read from source line `at`.
    fn push(&mut self, line: ListLine, at: usize, out: &mut Consumed, max_items: usize) {
        if self.taken >= max_items {
            self.dropped += 1;
            return;
        }
        self.taken += 1;
        match self.family {
            ListFamily::Task => {
                out.elements.push(MarkdownElement::TaskList {
                    text: line.text,
                    checked: line.checked,
                    level: self.level,
                });
                out.task_lines.push(at);
            }
            ListFamily::Unordered | ListFamily::Ordered => self.items.push(line.text),
        }
    }

    /// Emits the pending group. Called whenever the run is interrupted so
    /// that output order matches source order.
    fn flush(&mut self, out: &mut Vec<MarkdownElement>) {
        if self.dropped > 0 {
            log::warn!(
                "list at level {} exceeded the item limit, {} items dropped",
                self.level,
                self.dropped
            );
            self.dropped = 0;
        }
        if self.items.is_empty() {
            return;
        }
        let items = std::mem::take(&mut self.items);
        out.push(match self.family {
            ListFamily::Ordered => MarkdownElement::OrderedList {
                items,
                level: self.level,
            },
            _ => MarkdownElement::UnorderedList {
                items,
                level: self.level,
            },
        });
    }
}

/// Nested-list consumer driven by an explicit stack of frames.
///
/// A deeper line pushes a frame, a shallower one pops frames, a family change
/// replaces a nested frame but ends the outermost one. Levels are clamped to
/// the nesting limit, so the stack can never grow past it.
pub struct ListConsumer;

impl ListConsumer {
    pub fn consume(lines: &[&str], start: usize, limits: &ParseLimits) -> Consumed {
        let mut out = Consumed {
            elements: Vec::new(),
            next: start,
            task_lines: Vec::new(),
        };
        let mut stack: Vec<Frame> = Vec::new();
        let mut i = start;

        while i < lines.len() {
            let Some(line) = ListLine::parse(lines[i], limits.max_nesting_level) else {
                break;
            };
            let Some(top) = stack.last_mut() else {
                stack.push(Frame::new(line.level, line.family));
                continue;
            };

            if line.level > top.level {
                top.flush(&mut out.elements);
                stack.push(Frame::new(line.level, line.family));
                continue;
            }
            if line.level < top.level {
                if let Some(mut frame) = stack.pop() {
                    frame.flush(&mut out.elements);
                }
                if stack.is_empty() {
                    break;
                }
                continue;
            }
            if line.family != top.family {
                if stack.len() == 1 {
                    break;
                }
                if let Some(mut frame) = stack.pop() {
                    frame.flush(&mut out.elements);
                }
                stack.push(Frame::new(line.level, line.family));
                continue;
            }

            top.push(line, i, &mut out, limits.max_list_items);
            i += 1;
        }

        while let Some(mut frame) = stack.pop() {
            frame.flush(&mut out.elements);
        }

        out.next = i.max(start + 1);
        out
    }
}
