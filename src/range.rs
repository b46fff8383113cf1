//! Page range parsing, validation, and formatting.
//!
//! A page range string is what a user types into a "pages" field:
//! comma-separated tokens, each a single page number or a `start-end` pair,
//! e.g. `"1-5,8,10-12"`. Page numbers are 1-based.
//!
//! Parsing is deliberately two-tier:
//!
//! - [`PageRange::parse`] is lenient and never fails. Malformed tokens are
//!   dropped, descending pairs are normalized, duplicates collapse. This is
//!   what interactive callers use while input is still being typed.
//! - [`PageRange::validate`] is strict and rejects input with a specific,
//!   user-facing [`RangeError`]. Callers validate before committing to an
//!   operation.
//!
//! Keeping these as two distinct operations (rather than one fallible parse)
//! is part of the contract; do not merge them.

use thiserror::Error;

/// Errors reported by strict page range validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Input was empty or whitespace-only.
    #[error("Page range cannot be empty")]
    Empty,

    /// Input contained characters outside digits, commas, hyphens, and spaces.
    #[error("Invalid format. Use numbers, commas, and hyphens only (e.g., \"1-5,7,9-12\")")]
    InvalidCharacters,

    /// Input was syntactically plausible but produced no pages (e.g. "-" or ",,").
    #[error("No valid pages found in range")]
    NoValidPages,
}

/// A validated, deduplicated, ascending set of 1-based page numbers.
///
/// The engine is document-agnostic: it enforces positivity and ordering but
/// never checks against a real page count. Callers intersect the result with
/// the document before use, which keeps this type independently testable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRange {
    pages: Vec<u32>,
}

impl PageRange {
    /// Construct from a list of page numbers (deduplicated and sorted).
    pub fn from_pages(mut pages: Vec<u32>) -> Self {
        pages.retain(|&p| p >= 1);
        pages.sort_unstable();
        pages.dedup();
        Self { pages }
    }

    /// Leniently parse a page range string.
    ///
    /// Never fails: malformed tokens are skipped, `"5-3"` is read as `3-5`,
    /// duplicates collapse, and empty input yields an empty range. Emptiness
    /// is judged by the caller (or by [`PageRange::validate`]).
    pub fn parse(input: &str) -> Self {
        let mut pages = Vec::new();

        for part in input.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            if let Some((start, end)) = part.split_once('-') {
                let start = start.trim().parse::<u32>();
                let end = end.trim().parse::<u32>();
                let (Ok(start), Ok(end)) = (start, end) else {
                    continue; // skip invalid range tokens
                };
                if start == 0 || end == 0 {
                    continue;
                }
                let (lo, hi) = (start.min(end), start.max(end));
                pages.extend(lo..=hi);
            } else if let Ok(page) = part.parse::<u32>() {
                if page > 0 {
                    pages.push(page);
                }
            }
        }

        Self::from_pages(pages)
    }

    /// Strictly validate a page range string.
    ///
    /// Returns the parsed range on success so callers do not parse twice.
    pub fn validate(input: &str) -> Result<Self, RangeError> {
        if input.trim().is_empty() {
            return Err(RangeError::Empty);
        }

        if !input
            .chars()
            .all(|c| c.is_ascii_digit() || c == ',' || c == '-' || c == ' ')
        {
            return Err(RangeError::InvalidCharacters);
        }

        let range = Self::parse(input);
        if range.is_empty() {
            return Err(RangeError::NoValidPages);
        }

        Ok(range)
    }

    /// The page numbers, ascending and duplicate-free (1-based).
    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    /// Convert 1-based page numbers to 0-based indices.
    ///
    /// Pure element-wise decrement; no bounds checking against any document.
    pub fn to_indices(&self) -> Vec<usize> {
        self.pages.iter().map(|&p| (p - 1) as usize).collect()
    }

    /// Number of pages in the range.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the range contains no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Whether the range contains the given 1-based page number.
    pub fn contains(&self, page: u32) -> bool {
        self.pages.binary_search(&page).is_ok()
    }

    /// Format a page list back into compact range notation.
    ///
    /// Runs of consecutive pages collapse to `start-end`. A two-page run is
    /// rendered `a,b` rather than `a-b`: a plain pair reads clearer than a
    /// 2-page "span". Inverse of [`PageRange::parse`] for display purposes.
    pub fn format(pages: &[u32]) -> String {
        let sorted = Self::from_pages(pages.to_vec());
        let pages = &sorted.pages;
        if pages.is_empty() {
            return String::new();
        }

        let mut parts: Vec<String> = Vec::new();
        let mut run_start = pages[0];
        let mut run_end = pages[0];

        let mut push_run = |start: u32, end: u32, parts: &mut Vec<String>| {
            if start == end {
                parts.push(start.to_string());
            } else if end == start + 1 {
                parts.push(format!("{},{}", start, end));
            } else {
                parts.push(format!("{}-{}", start, end));
            }
        };

        for &page in &pages[1..] {
            if page == run_end + 1 {
                run_end = page;
            } else {
                push_run(run_start, run_end, &mut parts);
                run_start = page;
                run_end = page;
            }
        }
        push_run(run_start, run_end, &mut parts);

        parts.join(",")
    }

    /// Format this range into compact notation.
    pub fn to_notation(&self) -> String {
        Self::format(&self.pages)
    }
}

impl std::fmt::Display for PageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_notation())
    }
}
