//! Document metadata inspection.

use chrono::{NaiveDate, NaiveDateTime};
use lopdf::{Dictionary, Document, Object};
use serde::Serialize;

use crate::error::Result;

/// Metadata and per-page geometry of a PDF document.
///
/// Serializes cleanly to JSON for machine consumers; `None` fields are
/// omitted.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentInfo {
    pub page_count: u32,
    pub version: String,
    pub encrypted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    /// Creation timestamp, ISO 8601, when the document records one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    pub pages: Vec<PageInfo>,
}

/// Geometry of a single page.
#[derive(Debug, Clone, Serialize)]
pub struct PageInfo {
    pub number: u32,
    /// Width in PDF points (1/72 inch).
    pub width: f32,
    pub height: f32,
    /// Effective `/Rotate` value, 0 when unset.
    pub rotation: i64,
}

/// Read document metadata without modifying the file.
///
/// Unlike the mutating operations, encrypted documents are not refused:
/// the structural facts (page count, version) are still reported, with
/// the string metadata left empty.
pub fn read_info(bytes: &[u8]) -> Result<DocumentInfo> {
    let doc = Document::load_mem(bytes)?;
    let encrypted = doc.is_encrypted();

    let mut page_map: Vec<(u32, lopdf::ObjectId)> = doc.get_pages().into_iter().collect();
    page_map.sort_by_key(|(num, _)| *num);

    let pages: Vec<PageInfo> = page_map
        .iter()
        .map(|&(number, page_id)| {
            let (width, height) = super::stamp::page_size(&doc, page_id);
            let rotation = doc
                .get_object(page_id)
                .and_then(Object::as_dict)
                .ok()
                .and_then(|d| d.get(b"Rotate").ok())
                .and_then(|o| o.as_i64().ok())
                .unwrap_or(0);
            PageInfo {
                number,
                width,
                height,
                rotation,
            }
        })
        .collect();

    let info = if encrypted { None } else { info_dict(&doc) };
    let field = |name: &[u8]| info.and_then(|d| string_entry(d, name));

    Ok(DocumentInfo {
        page_count: pages.len() as u32,
        version: doc.version.clone(),
        encrypted,
        title: field(b"Title"),
        author: field(b"Author"),
        subject: field(b"Subject"),
        keywords: field(b"Keywords"),
        creator: field(b"Creator"),
        producer: field(b"Producer"),
        created: field(b"CreationDate").as_deref().and_then(parse_pdf_date),
        modified: field(b"ModDate").as_deref().and_then(parse_pdf_date),
        pages,
    })
}

impl From<&DocumentInfo> for crate::convert::HeaderFields {
    fn from(info: &DocumentInfo) -> Self {
        Self {
            title: info.title.clone(),
            author: info.author.clone(),
            subject: info.subject.clone(),
            created: info.created.clone(),
        }
    }
}

/// The trailer's Info dictionary, if present.
fn info_dict(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn string_entry(dict: &Dictionary, name: &[u8]) -> Option<String> {
    match dict.get(name).ok()? {
        Object::String(bytes, _) => {
            let text = decode_pdf_string(bytes);
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE when BOM-prefixed, otherwise
/// PDFDocEncoding (treated as Latin-1).
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.starts_with(&[0xFE, 0xFF]) {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

/// Parse a PDF date string (`D:YYYYMMDDHHmmSS` with optional timezone
/// suffix) into ISO 8601. Fields after the year default to the start of
/// their range.
fn parse_pdf_date(raw: &str) -> Option<String> {
    let digits: String = raw
        .trim()
        .trim_start_matches("D:")
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .take(14)
        .collect();
    if digits.len() < 4 {
        return None;
    }

    let component = |range: std::ops::Range<usize>, default: u32| -> u32 {
        digits
            .get(range)
            .and_then(|s| s.parse().ok())
            .unwrap_or(default)
    };

    let year: i32 = digits.get(0..4)?.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, component(4..6, 1), component(6..8, 1))?;
    let datetime: NaiveDateTime =
        date.and_hms_opt(component(8..10, 0), component(10..12, 0), component(12..14, 0))?;
    Some(datetime.format("%Y-%m-%dT%H:%M:%S").to_string())
}
