//! Table buffering and Markdown pipe-table emission.

use regex::Regex;

/// Accumulates lines provisionally identified as tabular.
///
/// Flushed as soon as a non-tabular line or end-of-input is seen. Flushing
/// clears the buffer; a flushed buffer is never empty.
#[derive(Debug)]
pub struct TableBuffer {
    lines: Vec<String>,
    tab_split: Regex,
    space_split: Regex,
}

impl Default for TableBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuffer {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            tab_split: Regex::new(r"\t+").unwrap(),
            space_split: Regex::new(r" {3,}").unwrap(),
        }
    }

    pub fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Convert the buffered rows to a Markdown pipe table and clear.
    ///
    /// Columns are split by tab runs first; if that yields a single column,
    /// runs of 3+ spaces are tried. Short rows are padded with empty cells.
    /// If no split produces at least 2 columns the buffered lines are
    /// returned verbatim — misdetected tables must not lose data.
    pub fn flush(&mut self) -> Vec<String> {
        let lines = std::mem::take(&mut self.lines);
        if lines.is_empty() {
            return Vec::new();
        }

        let rows: Vec<Vec<String>> = lines
            .iter()
            .map(|line| {
                let body = line.trim();
                let mut cells: Vec<String> = self
                    .tab_split
                    .split(body)
                    .map(|c| c.trim().to_string())
                    .collect();
                if cells.len() <= 1 {
                    cells = self
                        .space_split
                        .split(body)
                        .map(|c| c.trim().to_string())
                        .collect();
                }
                cells
            })
            .collect();

        let col_count = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        if col_count < 2 {
            // Not actually a table; emit the original lines unchanged.
            return lines;
        }

        let mut out = Vec::with_capacity(rows.len() + 1);
        for (i, row) in rows.iter().enumerate() {
            let mut cells = row.clone();
            cells.resize(col_count, String::new());
            out.push(format!("| {} |", cells.join(" | ")));
            if i == 0 {
                let sep: Vec<&str> = std::iter::repeat("---").take(col_count).collect();
                out.push(format!("| {} |", sep.join(" | ")));
            }
        }
        out
    }
}
