//! Error types for the pdfdesk library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during PDF processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and requires a password.
    #[error("Document is encrypted")]
    Encrypted,

    /// The document has no pages.
    #[error("Document has no pages")]
    EmptyDocument,

    /// Merge was called without enough input documents.
    #[error("At least {0} input documents are required")]
    NotEnoughInputs(usize),

    /// A page selection resolved to zero pages of the document.
    #[error("No pages selected (document has {0} pages)")]
    NoPagesSelected(u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Rotation angle is not a multiple of 90 degrees.
    #[error("Invalid rotation angle: {0} (must be a multiple of 90)")]
    InvalidRotation(i64),

    /// Error writing the output document.
    #[error("Failed to write PDF: {0}")]
    PdfWrite(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<crate::range::RangeError> for Error {
    fn from(err: crate::range::RangeError) -> Self {
        Error::InvalidPageRange(err.to_string())
    }
}
