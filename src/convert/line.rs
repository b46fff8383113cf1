//! Per-line records for the structure inference pipeline.

/// One input line annotated with the facts the classifiers need.
///
/// Created in a single left-to-right scan of the input and consumed
/// immediately by the classifier chain; never retained afterward.
#[derive(Debug, Clone, Copy)]
pub struct LineRecord<'a> {
    /// The line as it appeared in the input (no trailing newline).
    pub raw: &'a str,
    /// The line with surrounding whitespace removed.
    pub trimmed: &'a str,
    /// Number of leading whitespace characters.
    pub indent: usize,
}

impl<'a> LineRecord<'a> {
    pub fn new(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        let indent = raw.len() - raw.trim_start().len();
        Self {
            raw,
            trimmed,
            indent,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed.is_empty()
    }

    /// Tabular heuristic: a tab separator, or an interior run of 3+ spaces.
    ///
    /// Leading indentation is excluded so that indented code is not mistaken
    /// for a column separator.
    pub fn is_table_row(&self) -> bool {
        if self.is_blank() {
            return false;
        }
        let body = self.raw.trim_start();
        if body.contains('\t') {
            return true;
        }
        let mut run = 0usize;
        for c in body.chars() {
            if c == ' ' {
                run += 1;
                if run >= 3 {
                    return true;
                }
            } else {
                run = 0;
            }
        }
        false
    }

    /// Code heuristic: 4+ leading spaces and at least one code punctuation
    /// character.
    pub fn is_code_line(&self) -> bool {
        if self.is_blank() || self.indent < 4 {
            return false;
        }
        self.trimmed
            .chars()
            .any(|c| matches!(c, '{' | '}' | '(' | ')' | ';' | '=' | '<' | '>' | '[' | ']' | '`'))
    }

    /// A line consisting solely of 3+ repeated `-`, `=`, or `_`.
    pub fn is_rule(&self) -> bool {
        let t = self.trimmed;
        t.len() >= 3
            && (t.chars().all(|c| c == '-')
                || t.chars().all(|c| c == '=')
                || t.chars().all(|c| c == '_'))
    }
}
