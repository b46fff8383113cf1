//! Content stamping: diagonal text watermarks and page number footers.
//!
//! Stamps are appended as extra content streams so the original page
//! content is left untouched. A shared Helvetica font object and (for
//! watermarks) an ExtGState carrying the transparency are registered in
//! each stamped page's resources.

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::Result;

const WATERMARK_FONT: &str = "Fpdw";
const WATERMARK_GSTATE: &str = "GSpdw";
const NUMBER_FONT: &str = "Fpdn";

/// Options for [`add_watermark`].
#[derive(Debug, Clone)]
pub struct WatermarkOptions {
    pub text: String,
    /// Font size in points.
    pub font_size: f32,
    /// Fill opacity, 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
    /// Rotation in degrees, counter-clockwise.
    pub angle: f32,
}

impl WatermarkOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: 60.0,
            opacity: 0.3,
            angle: -45.0,
        }
    }
}

/// Where the page number footer sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberPosition {
    BottomLeft,
    #[default]
    BottomCenter,
    BottomRight,
}

/// Options for [`add_page_numbers`].
#[derive(Debug, Clone)]
pub struct PageNumberOptions {
    pub font_size: f32,
    /// Render `3 of 12` instead of a bare `3`.
    pub include_total: bool,
    /// Number printed on the first page; later pages count on from it.
    pub start_at: u32,
    pub position: NumberPosition,
}

impl Default for PageNumberOptions {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            include_total: true,
            start_at: 1,
            position: NumberPosition::BottomCenter,
        }
    }
}

/// Escape a string for a PDF literal string `(...)`.
fn escape_pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            _ => out.push(c),
        }
    }
    out
}

/// Rough width of `text` at `font_size` in Helvetica. Good enough for
/// centering; exact metrics would need the AFM tables.
fn approx_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.5
}

/// Page dimensions from the page's MediaBox, following the Parent chain
/// for inherited boxes. Falls back to US Letter.
pub(crate) fn page_size(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let mut current = Some(page_id);
    // Parent chains are short; the bound only guards against cycles.
    for _ in 0..32 {
        let Some(id) = current else { break };
        let Ok(dict) = doc.get_object(id).and_then(Object::as_dict) else {
            break;
        };
        if let Ok(bx) = dict.get(b"MediaBox").and_then(Object::as_array) {
            let nums: Vec<f32> = bx.iter().filter_map(object_as_f32).collect();
            if nums.len() == 4 {
                return ((nums[2] - nums[0]).abs(), (nums[3] - nums[1]).abs());
            }
        }
        current = dict
            .get(b"Parent")
            .ok()
            .and_then(|o| o.as_reference().ok());
    }
    (612.0, 792.0)
}

fn object_as_f32(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(f) => Some(*f),
        _ => None,
    }
}

/// Register `entries` under the `category` sub-dictionary (`Font`,
/// `ExtGState`) of the page's Resources, creating dictionaries as needed.
fn add_resource(
    doc: &mut Document,
    page_id: ObjectId,
    category: &str,
    name: &str,
    target: ObjectId,
) -> Result<()> {
    // Resources may live behind a reference; resolve it first.
    let resources_ref = doc
        .get_object(page_id)?
        .as_dict()?
        .get(b"Resources")
        .ok()
        .and_then(|o| o.as_reference().ok());

    let resources = match resources_ref {
        Some(res_id) => doc.get_object_mut(res_id)?.as_dict_mut()?,
        None => {
            let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
            if !matches!(page_dict.get(b"Resources"), Ok(Object::Dictionary(_))) {
                page_dict.set("Resources", Dictionary::new());
            }
            match page_dict.get_mut(b"Resources")? {
                Object::Dictionary(d) => d,
                _ => return Ok(()),
            }
        }
    };

    if !matches!(resources.get(category.as_bytes()), Ok(Object::Dictionary(_))) {
        resources.set(category, Dictionary::new());
    }
    if let Object::Dictionary(sub) = resources.get_mut(category.as_bytes())? {
        sub.set(name, Object::Reference(target));
    }
    Ok(())
}

/// Append `stream_id` to the page's content stream list.
fn append_content(doc: &mut Document, page_id: ObjectId, stream_id: ObjectId) -> Result<()> {
    let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
    let new_ref = Object::Reference(stream_id);
    match page_dict.get_mut(b"Contents") {
        Ok(Object::Array(contents)) => contents.push(new_ref),
        Ok(existing @ Object::Reference(_)) => {
            let prev = existing.clone();
            page_dict.set("Contents", vec![prev, new_ref]);
        }
        _ => page_dict.set("Contents", new_ref),
    }
    Ok(())
}

fn helvetica(doc: &mut Document) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    })
}

/// Stamp a semi-transparent rotated text watermark across the center of
/// every page.
pub fn add_watermark(bytes: &[u8], options: &WatermarkOptions) -> Result<Vec<u8>> {
    let mut doc = super::load_document(bytes)?;

    let font_id = helvetica(&mut doc);
    let gstate_id = doc.add_object(dictionary! {
        "Type" => "ExtGState",
        "ca" => options.opacity,
        "CA" => options.opacity,
    });

    let radians = options.angle.to_radians();
    let (cos, sin) = (radians.cos(), radians.sin());
    let half_width = approx_text_width(&options.text, options.font_size) / 2.0;
    let text = escape_pdf_string(&options.text);

    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    for page_id in page_ids {
        let (width, height) = page_size(&doc, page_id);
        let content = format!(
            "q\n/{gs} gs\nBT\n/{font} {size} Tf\n\
             {cos:.4} {sin:.4} {nsin:.4} {cos:.4} {cx:.2} {cy:.2} Tm\n\
             {offset:.2} 0 Td\n({text}) Tj\nET\nQ",
            gs = WATERMARK_GSTATE,
            font = WATERMARK_FONT,
            size = options.font_size,
            nsin = -sin,
            cx = width / 2.0,
            cy = height / 2.0,
            offset = -half_width,
        );
        let stream_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        add_resource(&mut doc, page_id, "Font", WATERMARK_FONT, font_id)?;
        add_resource(&mut doc, page_id, "ExtGState", WATERMARK_GSTATE, gstate_id)?;
        append_content(&mut doc, page_id, stream_id)?;
    }

    super::save_document(doc)
}

/// Stamp a page number footer on every page.
pub fn add_page_numbers(bytes: &[u8], options: &PageNumberOptions) -> Result<Vec<u8>> {
    let mut doc = super::load_document(bytes)?;

    let font_id = helvetica(&mut doc);

    let mut page_ids: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();
    page_ids.sort_by_key(|(num, _)| *num);
    let total = page_ids.len() as u32;

    let last = options.start_at + total.saturating_sub(1);
    for (num, page_id) in page_ids {
        let shown = options.start_at + num - 1;
        let label = if options.include_total {
            format!("{} of {}", shown, last)
        } else {
            shown.to_string()
        };
        let (width, _) = page_size(&doc, page_id);
        let text_width = approx_text_width(&label, options.font_size);
        let x = match options.position {
            NumberPosition::BottomLeft => 36.0,
            NumberPosition::BottomCenter => (width - text_width) / 2.0,
            NumberPosition::BottomRight => width - 36.0 - text_width,
        };
        let content = format!(
            "BT\n/{font} {size} Tf\n{x:.2} 30 Td\n({label}) Tj\nET",
            font = NUMBER_FONT,
            size = options.font_size,
            label = escape_pdf_string(&label),
        );
        let stream_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        add_resource(&mut doc, page_id, "Font", NUMBER_FONT, font_id)?;
        append_content(&mut doc, page_id, stream_id)?;
    }

    super::save_document(doc)
}
