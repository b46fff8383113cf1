//! PDF document operations: merge, page selection, rotation, stamping,
//! splitting, compression, and metadata inspection.
//!
//! Every operation takes and returns raw PDF bytes, so callers can sit on
//! top of any transport (files, uploads, pipes) without this module caring.
//! Page numbers in public APIs are 1-based; see [`crate::range::PageRange`].

mod info;
mod merge;
mod pages;
mod stamp;

pub use info::{read_info, DocumentInfo, PageInfo};
pub use merge::{merge, MergeInput};
pub use pages::{delete_pages, extract_pages, reorder_pages, rotate_pages, split};
pub use stamp::{
    add_page_numbers, add_watermark, NumberPosition, PageNumberOptions, WatermarkOptions,
};

use lopdf::Document;

use crate::error::{Error, Result};

/// Load a PDF from memory, refusing encrypted documents.
pub(crate) fn load_document(bytes: &[u8]) -> Result<Document> {
    let doc = Document::load_mem(bytes)?;
    if doc.is_encrypted() {
        return Err(Error::Encrypted);
    }
    Ok(doc)
}

/// Compress object streams and serialize back to bytes.
pub(crate) fn save_document(mut doc: Document) -> Result<Vec<u8>> {
    doc.compress();
    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| Error::PdfWrite(e.to_string()))?;
    Ok(out)
}

/// Number of pages in a PDF.
pub fn page_count(bytes: &[u8]) -> Result<u32> {
    Ok(load_document(bytes)?.get_pages().len() as u32)
}

/// Re-save a PDF with streams compressed. Already-compressed input comes
/// back at roughly the same size; uncompressed or bloated files shrink.
pub fn compress(bytes: &[u8]) -> Result<Vec<u8>> {
    save_document(load_document(bytes)?)
}
