//! # pdfdesk
//!
//! PDF page manipulation toolkit for Rust.
//!
//! Operations work on raw PDF bytes: merge, extract, reorder, delete,
//! rotate, split, watermark, page numbering, compression, and metadata
//! inspection. A separate structure-inference pipeline turns extracted
//! plain text into Markdown.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfdesk::{merge, MergeInput, PageRange};
//!
//! fn main() -> pdfdesk::Result<()> {
//!     let a = std::fs::read("a.pdf")?;
//!     let b = std::fs::read("b.pdf")?;
//!
//!     // All of a, then pages 1-3 of b
//!     let range = PageRange::validate("1-3")?;
//!     let merged = merge(&[MergeInput::all(&a), MergeInput::pages(&b, range)])?;
//!     std::fs::write("merged.pdf", merged)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Page ranges**: lenient parsing and strict validation of `1-5,8,10-12`
//! - **Document surgery**: merge, extract, reorder, delete, rotate, split
//! - **Stamping**: transparent watermarks and page number footers
//! - **Inspection**: metadata and page geometry, JSON-serializable
//! - **Markdown inference**: headings, lists, tables, and code recovered
//!   from flat text

pub mod convert;
pub mod error;
pub mod ops;
pub mod range;

// Re-export commonly used types
pub use convert::{ConvertMode, ConvertOptions, HeaderFields, StructureConverter};
pub use error::{Error, Result};
pub use ops::{
    add_page_numbers, add_watermark, compress, delete_pages, extract_pages, merge, page_count,
    read_info, reorder_pages, rotate_pages, split, DocumentInfo, MergeInput, NumberPosition,
    PageInfo, PageNumberOptions, WatermarkOptions,
};
pub use range::{PageRange, RangeError};

use std::path::{Path, PathBuf};

/// Merge PDF files from disk, taking every page of every input.
///
/// # Example
///
/// ```no_run
/// let merged = pdfdesk::merge_files(&["a.pdf", "b.pdf"]).unwrap();
/// std::fs::write("merged.pdf", merged).unwrap();
/// ```
pub fn merge_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<u8>> {
    let buffers: Vec<Vec<u8>> = paths
        .iter()
        .map(|p| std::fs::read(p).map_err(Error::from))
        .collect::<Result<_>>()?;
    let inputs: Vec<MergeInput> = buffers.iter().map(|b| MergeInput::all(b)).collect();
    merge(&inputs)
}

/// Split a PDF file into one single-page file per page, written to
/// `out_dir` as `page_1.pdf`, `page_2.pdf`, … Returns the paths written.
pub fn split_file<P: AsRef<Path>, Q: AsRef<Path>>(path: P, out_dir: Q) -> Result<Vec<PathBuf>> {
    let bytes = std::fs::read(path)?;
    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    for (name, data) in split(&bytes)? {
        let target = out_dir.join(name);
        std::fs::write(&target, data)?;
        written.push(target);
    }
    Ok(written)
}

/// Convert extracted text to Markdown with default options.
///
/// # Example
///
/// ```
/// let md = pdfdesk::text_to_markdown("SUMMARY\n\nAll good.");
/// assert!(md.starts_with("## SUMMARY"));
/// ```
pub fn text_to_markdown(text: &str) -> String {
    convert::convert(text, ConvertMode::Markdown)
}

/// Normalize extracted text (NFC, artifact removal, blank-line collapse).
pub fn normalize_text(text: &str) -> String {
    convert::convert(text, ConvertMode::Text)
}
