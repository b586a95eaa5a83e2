use crate::parsing::{
    blocks::{Consumed, raw_paragraph},
    limits::{ParseLimits, caps},
    patterns,
    text::{cap, is_escaped},
    types::{Alignment, MarkdownElement},
};

/// Pipe table: header row, optional alignment row, data rows.
pub struct Table;

impl Table {
    pub const PIPE: char = '|';

    pub fn opens(line: &str) -> bool {
        line.trim_start().starts_with(Self::PIPE)
    }

    /// Consumes contiguous pipe lines starting at `start`.
    ///
    /// Row 2 is an alignment row only if every cell is one; otherwise every
    /// column is left aligned and row 2 is data. A header wider than the
    /// column limit degrades the scanned lines to a raw paragraph.
    pub fn consume(lines: &[&str], start: usize, limits: &ParseLimits) -> Consumed {
        let mut end = start;
        while end < lines.len() && end - start < limits.max_table_rows && Self::opens(lines[end])
        {
            end += 1;
        }
        let end = end.max(start + 1);
        let scanned = &lines[start..end];

        let headers = Self::split_row(scanned[0]);
        if headers.len() > limits.max_table_columns {
            log::debug!(
                "table at line {} has {} columns (limit {})",
                start + 1,
                headers.len(),
                limits.max_table_columns
            );
            return Consumed::one(raw_paragraph(scanned), end);
        }

        let declared = scanned.get(1).and_then(|row| Self::alignments(row));
        let data_start = if declared.is_some() { 2 } else { 1 };
        let declared = declared.unwrap_or_default();
        let alignments = (0..headers.len())
            .map(|col| declared.get(col).copied().unwrap_or_default())
            .collect();

        let rows = scanned
            .iter()
            .skip(data_start)
            .map(|row| {
                let mut cells = Self::split_row(row);
                cells.truncate(limits.max_table_columns);
                cells
            })
            .collect();

        Consumed::one(
            MarkdownElement::Table {
                headers,
                rows,
                alignments,
            },
            end,
        )
    }

    /// Splits a row on unescaped pipes, dropping the outer pipes. Cells are
    /// trimmed, unescaped (`\|` → `|`) and capped.
    pub fn split_row(row: &str) -> Vec<String> {
        let mut t = row.trim();
        t = t.strip_prefix(Self::PIPE).unwrap_or(t);
        if t.ends_with(Self::PIPE) && !is_escaped(t, t.len() - 1) {
            t = &t[..t.len() - 1];
        }

        let mut cells = Vec::new();
        let mut cell_start = 0;
        for (idx, c) in t.char_indices() {
            if c == Self::PIPE && !is_escaped(t, idx) {
                cells.push(Self::cell(&t[cell_start..idx]));
                cell_start = idx + 1;
            }
        }
        cells.push(Self::cell(&t[cell_start..]));
        cells
    }

    fn cell(raw: &str) -> String {
        cap(raw.trim().replace("\\|", "|").as_str(), caps::CELL_TEXT)
    }

    /// Parses a delimiter row, `None` if any cell is not `:?-+:?`.
    pub fn alignments(row: &str) -> Option<Vec<Alignment>> {
        Self::split_row(row)
            .iter()
            .map(|cell| {
                let marker: String = cell.chars().filter(|c| !c.is_whitespace()).collect();
                if !patterns::alignment_cell().is_match(&marker) {
                    return None;
                }
                Some(match (marker.starts_with(':'), marker.ends_with(':')) {
                    (true, true) => Alignment::Center,
                    (false, true) => Alignment::Right,
                    _ => Alignment::Left,
                })
            })
            .collect()
    }
}
