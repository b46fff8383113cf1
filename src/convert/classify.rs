//! Line classification: heading rules, lists, quotes, and inline emphasis.
//!
//! The heading heuristics form a strict priority chain. Each rule is a named
//! predicate in [`LineClassifier::HEADING_RULES`]; the first match wins.
//! Keeping the chain as an explicit ordered table makes the priority visible
//! and lets each rule be exercised on its own.

use regex::Regex;

use super::line::LineRecord;

/// What the classifier decided a line is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// A heading with the given depth (1-6).
    Heading(u8),
    /// An unordered list item; payload is the text after the bullet glyph.
    Bullet(String),
    /// An ordered list item; payload is the normalized ordinal and the text
    /// after the marker.
    Ordered(u32, String),
    /// A blockquote line; payload is the text after the quote marker.
    Quote(String),
    /// A horizontal rule.
    Rule,
    /// Anything else: a plain paragraph line.
    Paragraph,
}

/// Context a heading rule can look at: the line plus one line of
/// lookbehind/lookahead (blankness only).
#[derive(Debug, Clone, Copy)]
pub struct HeadingContext<'a> {
    pub line: &'a LineRecord<'a>,
    /// Previous input line was blank (or this is the first line).
    pub prev_blank: bool,
    /// Next input line is blank (or this is the last line).
    pub next_blank: bool,
}

type HeadingRule = fn(&LineClassifier, &HeadingContext) -> Option<u8>;

/// Classifies lines that are neither blank, tabular, nor code.
pub struct LineClassifier {
    chapter_re: Regex,
    outline_re: Regex,
    question_re: Regex,
    bullet_re: Regex,
    ordered_re: Regex,
    caps_word_re: Regex,
}

/// Lowercase function words permitted mid-title in Title-Case detection.
const FUNCTION_WORDS: [&str; 15] = [
    "a", "an", "the", "and", "or", "but", "of", "in", "on", "at", "to", "for", "with", "by",
    "from",
];

/// Acronyms never wrapped in bold by the paragraph emphasis pass.
const ACRONYM_EXCLUSIONS: [&str; 13] = [
    "PDF", "HTML", "CSS", "API", "URL", "HTTP", "HTTPS", "JSON", "XML", "SQL", "USA", "UK", "EU",
];

impl LineClassifier {
    /// The heading rule chain, in priority order. First match wins.
    const HEADING_RULES: [(&'static str, HeadingRule); 5] = [
        ("chapter-prefix", Self::rule_chapter_prefix),
        ("numeric-outline", Self::rule_numeric_outline),
        ("all-caps", Self::rule_all_caps),
        ("title-case", Self::rule_title_case),
        ("question", Self::rule_question),
    ];

    pub fn new() -> Self {
        Self {
            chapter_re: Regex::new(r"^(Chapter|Section|Part|Module|Unit|Lesson)\s+\d+").unwrap(),
            outline_re: Regex::new(r"^(\d+(?:\.\d+)*)\s+[A-Z]").unwrap(),
            question_re: Regex::new(
                r"^(What|Why|How|When|Where|Who|Which|Can|Do|Does|Is|Are|Will|Should)\b",
            )
            .unwrap(),
            bullet_re: Regex::new(r"^[-*•◦▪►→]\s+(.*)$").unwrap(),
            ordered_re: Regex::new(r"^([0-9]+|[A-Za-z])[.)]\s+(.*)$").unwrap(),
            caps_word_re: Regex::new(r"\b[A-Z]{3,}\b").unwrap(),
        }
    }

    /// Classify a line already known not to be blank, tabular, or code.
    pub fn classify(&self, ctx: &HeadingContext) -> LineKind {
        if let Some(level) = self.heading_level(ctx) {
            return LineKind::Heading(level);
        }

        let trimmed = ctx.line.trimmed;

        if let Some(caps) = self.bullet_re.captures(trimmed) {
            return LineKind::Bullet(caps[1].trim().to_string());
        }

        if let Some(caps) = self.ordered_re.captures(trimmed) {
            // Numeric markers keep their numeral; alphabetic markers have no
            // Markdown equivalent and normalize to 1.
            let number = caps[1].parse::<u32>().unwrap_or(1);
            return LineKind::Ordered(number, caps[2].trim().to_string());
        }

        if let Some(rest) = trimmed.strip_prefix('>').or_else(|| trimmed.strip_prefix('"')) {
            return LineKind::Quote(rest.trim_start().to_string());
        }

        if ctx.line.is_rule() {
            return LineKind::Rule;
        }

        LineKind::Paragraph
    }

    /// Run the heading rule chain; `None` means the line is not a heading.
    pub fn heading_level(&self, ctx: &HeadingContext) -> Option<u8> {
        let trimmed = ctx.line.trimmed;

        // Rejection gate applies to every rule.
        if trimmed.len() > 100 || trimmed.ends_with(['.', ',', ':', ';']) {
            return None;
        }

        for (name, rule) in Self::HEADING_RULES {
            if let Some(level) = rule(self, ctx) {
                log::trace!("heading rule '{}' matched: {:?}", name, trimmed);
                return Some(level);
            }
        }
        None
    }

    fn rule_chapter_prefix(&self, ctx: &HeadingContext) -> Option<u8> {
        self.chapter_re.is_match(ctx.line.trimmed).then_some(2)
    }

    fn rule_numeric_outline(&self, ctx: &HeadingContext) -> Option<u8> {
        let trimmed = ctx.line.trimmed;
        if trimmed.len() >= 80 {
            return None;
        }
        let caps = self.outline_re.captures(trimmed)?;
        let dots = caps[1].matches('.').count() as u8;
        Some((dots + 2).min(6))
    }

    fn rule_all_caps(&self, ctx: &HeadingContext) -> Option<u8> {
        let trimmed = ctx.line.trimmed;
        let len = trimmed.len();
        if !ctx.prev_blank || len <= 3 || len >= 60 {
            return None;
        }
        let has_letter = trimmed.chars().any(|c| c.is_alphabetic());
        let all_upper = trimmed
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| c.is_uppercase());
        (has_letter && all_upper).then_some(2)
    }

    fn rule_title_case(&self, ctx: &HeadingContext) -> Option<u8> {
        let trimmed = ctx.line.trimmed;
        if trimmed.len() >= 60 || !ctx.prev_blank || !ctx.next_blank {
            return None;
        }
        let words: Vec<&str> = trimmed.split_whitespace().collect();
        if words.len() < 2 || words.len() > 10 {
            return None;
        }
        for (i, word) in words.iter().enumerate() {
            let first = word.chars().next()?;
            if first.is_uppercase() || first.is_ascii_digit() {
                continue;
            }
            // Lowercase function words are fine anywhere but first position.
            if i > 0 && FUNCTION_WORDS.contains(&word.to_lowercase().as_str()) {
                continue;
            }
            return None;
        }
        Some(3)
    }

    fn rule_question(&self, ctx: &HeadingContext) -> Option<u8> {
        let trimmed = ctx.line.trimmed;
        (self.question_re.is_match(trimmed) && trimmed.ends_with('?')).then_some(3)
    }

    /// Paragraph emphasis: bold bare all-caps words of 3+ letters, except
    /// for a fixed set of common acronyms.
    pub fn emphasize(&self, text: &str) -> String {
        self.caps_word_re
            .replace_all(text, |caps: &regex::Captures| {
                let word = &caps[0];
                if ACRONYM_EXCLUSIONS.contains(&word) {
                    word.to_string()
                } else {
                    format!("**{}**", word)
                }
            })
            .to_string()
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}
