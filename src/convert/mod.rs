//! Structure inference: plain text to normalized text or Markdown.
//!
//! Extracted PDF text arrives as flat lines with no markup. This module
//! re-infers document structure from layout cues alone: indentation,
//! capitalization, blank-line context, tabular alignment. The result is
//! either normalized plain text or heuristic Markdown.
//!
//! # Example
//!
//! ```
//! use pdfdesk::convert::{StructureConverter, ConvertMode, ConvertOptions};
//!
//! let converter = StructureConverter::new();
//! let options = ConvertOptions::new(ConvertMode::Markdown);
//! let md = converter.convert("INTRODUCTION\n\nSome body text.", &options);
//! assert!(md.starts_with("## INTRODUCTION"));
//! ```

mod classify;
mod line;
mod normalize;
mod table;

pub use classify::{HeadingContext, LineClassifier, LineKind};
pub use line::LineRecord;
pub use normalize::{enforce_block_spacing, TextNormalizer};
pub use table::TableBuffer;

/// Target output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvertMode {
    /// Normalized plain text: NFC, page separators stripped, blank runs
    /// collapsed. No structural markup.
    Text,
    /// Heuristic Markdown with headings, lists, tables, code fences,
    /// quotes, and rules inferred from layout.
    #[default]
    Markdown,
}

/// Document fields rendered as a Markdown header block before the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub created: Option<String>,
}

impl HeaderFields {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.created.is_none()
    }
}

/// Options for a conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub mode: ConvertMode,
    /// Document metadata emitted as a header block (Markdown mode only).
    pub header: Option<HeaderFields>,
}

impl ConvertOptions {
    pub fn new(mode: ConvertMode) -> Self {
        Self { mode, header: None }
    }

    pub fn with_header(mut self, header: HeaderFields) -> Self {
        self.header = Some(header);
        self
    }
}

/// The structure inference pipeline.
///
/// Holds the precompiled classifier and normalizer so repeated conversions
/// do not recompile regexes. Stateless between calls.
pub struct StructureConverter {
    classifier: LineClassifier,
    normalizer: TextNormalizer,
}

impl Default for StructureConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureConverter {
    pub fn new() -> Self {
        Self {
            classifier: LineClassifier::new(),
            normalizer: TextNormalizer::new(),
        }
    }

    /// Convert extracted text according to `options`.
    pub fn convert(&self, text: &str, options: &ConvertOptions) -> String {
        match options.mode {
            ConvertMode::Text => self.normalizer.normalize(text),
            ConvertMode::Markdown => self.to_markdown(text, options.header.as_ref()),
        }
    }

    /// The Markdown pipeline: normalize, then a single forward pass with
    /// one-line lookahead, then spacing post-processing.
    fn to_markdown(&self, text: &str, header: Option<&HeaderFields>) -> String {
        let text = self.normalizer.normalize(text);
        let lines: Vec<&str> = text.lines().collect();

        let mut out: Vec<String> = Vec::with_capacity(lines.len() + 8);
        if let Some(h) = header.filter(|h| !h.is_empty()) {
            emit_header(h, &mut out);
        }

        let mut table = TableBuffer::new();
        let mut in_code = false;

        for (i, &raw) in lines.iter().enumerate() {
            let rec = LineRecord::new(raw);

            // An open fence closes on the first line that does not qualify
            // as code, including blank lines.
            if in_code && !rec.is_code_line() {
                out.push("```".to_string());
                in_code = false;
            }

            if rec.is_blank() {
                out.extend(table.flush());
                out.push(String::new());
                continue;
            }

            // Tabular lines are buffered until the table ends. Inside a
            // code fence nothing is tabular.
            if !in_code && rec.is_table_row() {
                table.push(raw);
                continue;
            }
            out.extend(table.flush());

            if rec.is_code_line() {
                if !in_code {
                    out.push("```".to_string());
                    in_code = true;
                }
                out.push(raw.to_string());
                continue;
            }

            let ctx = HeadingContext {
                line: &rec,
                prev_blank: i == 0 || lines[i - 1].trim().is_empty(),
                next_blank: i + 1 >= lines.len() || lines[i + 1].trim().is_empty(),
            };
            match self.classifier.classify(&ctx) {
                LineKind::Heading(level) => {
                    out.push(format!("{} {}", "#".repeat(level as usize), rec.trimmed));
                }
                LineKind::Bullet(rest) => out.push(format!("- {}", rest)),
                LineKind::Ordered(n, rest) => out.push(format!("{}. {}", n, rest)),
                LineKind::Quote(rest) => out.push(format!("> {}", rest)),
                LineKind::Rule => out.push("---".to_string()),
                LineKind::Paragraph => out.push(self.classifier.emphasize(rec.trimmed)),
            }
        }

        out.extend(table.flush());
        if in_code {
            out.push("```".to_string());
        }

        let body = enforce_block_spacing(out).join("\n");
        self.normalizer.collapse_blank_lines(&body).trim().to_string()
    }
}

fn emit_header(header: &HeaderFields, out: &mut Vec<String>) {
    if let Some(title) = &header.title {
        out.push(format!("# {}", title));
        out.push(String::new());
    }
    let mut wrote_field = false;
    for (label, value) in [
        ("Author", &header.author),
        ("Subject", &header.subject),
        ("Created", &header.created),
    ] {
        if let Some(v) = value {
            out.push(format!("**{}:** {}", label, v));
            wrote_field = true;
        }
    }
    if wrote_field {
        out.push(String::new());
    }
    out.push("---".to_string());
    out.push(String::new());
}

/// One-shot conversion with default options for the given mode.
pub fn convert(text: &str, mode: ConvertMode) -> String {
    StructureConverter::new().convert(text, &ConvertOptions::new(mode))
}
