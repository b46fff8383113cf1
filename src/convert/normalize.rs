//! Text normalization and Markdown post-processing.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Normalizer for plain-text output and the shared blank-line policy.
pub struct TextNormalizer {
    page_separator_re: Regex,
    blank_run_re: Regex,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            // Page-separator artifact of the upstream extraction step,
            // e.g. "-- 3 of 12 --" on a line of its own.
            page_separator_re: Regex::new(r"(?m)^[ \t]*--\s*\d+\s+of\s+\d+\s*--[ \t]*$\n?")
                .unwrap(),
            // 3+ consecutive blank lines (4+ newlines) collapse to one blank.
            blank_run_re: Regex::new(r"\n{4,}").unwrap(),
        }
    }

    /// Plain-text normalization: NFC, page-separator removal, blank-line
    /// collapsing, whole-document trim. A fixed point: running it twice
    /// yields the same output as running it once.
    pub fn normalize(&self, text: &str) -> String {
        let text: String = text.nfc().collect();
        let text = self.page_separator_re.replace_all(&text, "");
        let text = self.blank_run_re.replace_all(&text, "\n\n");
        text.trim().to_string()
    }

    /// Collapse runs of 3+ blank lines in an assembled line list.
    pub fn collapse_blank_lines(&self, text: &str) -> String {
        self.blank_run_re.replace_all(text, "\n\n").to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Markdown post-processing: spacing invariants around block elements.
///
/// Headings and code fences must be separated from adjacent non-blank
/// content by exactly one blank line on each side.
pub fn enforce_block_spacing(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut in_fence = false;

    for line in lines {
        let is_fence = line.trim() == "```";
        let is_heading = !in_fence && line.starts_with('#');
        let opens = is_fence && !in_fence;
        let closes = is_fence && in_fence;

        // Blank line before a heading or an opening fence.
        if (is_heading || opens) && matches!(out.last(), Some(prev) if !prev.is_empty()) {
            out.push(String::new());
        }

        if is_fence {
            in_fence = !in_fence;
        }

        // Blank line after a heading or a closing fence is inserted lazily:
        // remember the need and satisfy it when the next line arrives.
        if is_heading || closes {
            out.push(line);
            out.push(String::new());
            continue;
        }

        // Drop the lazily inserted blank if the incoming line is blank too.
        if line.is_empty() && matches!(out.last(), Some(prev) if prev.is_empty()) {
            continue;
        }

        out.push(line);
    }

    // Trim trailing blanks.
    while matches!(out.last(), Some(l) if l.is_empty()) {
        out.pop();
    }
    out
}
