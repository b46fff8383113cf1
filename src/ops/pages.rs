//! Page-level operations on a single document: extract, reorder, delete,
//! rotate, and split.

use std::collections::HashSet;

use lopdf::{dictionary, Document, Object, ObjectId};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::range::PageRange;

/// Rebuild `doc` so that its pages are exactly `selection`, in that order.
///
/// Page numbers are 1-based and must already be bounds-checked by the
/// caller. Duplicate numbers are allowed and produce repeated pages.
fn select(mut doc: Document, selection: &[u32]) -> Result<Vec<u8>> {
    let page_map = doc.get_pages();

    let selected: Vec<ObjectId> = selection
        .iter()
        .filter_map(|n| page_map.get(n).copied())
        .collect();

    // Drop the old Catalog and page-tree nodes; a fresh flat tree replaces
    // them.
    let keep: HashSet<ObjectId> = selected.iter().copied().collect();
    let obsolete: Vec<ObjectId> = doc
        .objects
        .iter()
        .filter(|(id, object)| {
            if keep.contains(id) {
                return false;
            }
            object
                .as_dict()
                .ok()
                .and_then(|d| d.get(b"Type").ok())
                .and_then(|t| t.as_name().ok())
                .is_some_and(|t| t == b"Catalog" || t == b"Pages")
        })
        .map(|(id, _)| *id)
        .collect();
    for id in obsolete {
        doc.objects.remove(&id);
    }

    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = selected.iter().map(|id| Object::Reference(*id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => selected.len() as i64,
            "Kids" => kids,
        }),
    );

    for page_id in &keep {
        if let Some(object) = doc.objects.get_mut(page_id) {
            if let Ok(page_dict) = object.as_dict_mut() {
                page_dict.set("Parent", Object::Reference(pages_id));
            }
        }
    }

    let catalog_id = doc.new_object_id();
    doc.objects.insert(
        catalog_id,
        Object::Dictionary(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }),
    );
    doc.trailer.set("Root", Object::Reference(catalog_id));

    // Unselected pages and their streams are now unreachable.
    doc.prune_objects();

    super::save_document(doc)
}

/// Extract the pages in `range` into a new document, in ascending page
/// order. Pages beyond the document are silently ignored; if nothing
/// remains the operation fails rather than produce an empty PDF.
pub fn extract_pages(bytes: &[u8], range: &PageRange) -> Result<Vec<u8>> {
    let doc = super::load_document(bytes)?;
    let total = doc.get_pages().len() as u32;

    let selection: Vec<u32> = range
        .pages()
        .iter()
        .copied()
        .filter(|&p| p <= total)
        .collect();
    if selection.is_empty() {
        return Err(Error::NoPagesSelected(total));
    }

    log::debug!("extracting {} of {} pages", selection.len(), total);
    select(doc, &selection)
}

/// Rearrange pages into the explicit `order` (1-based page numbers).
///
/// Numbers beyond the document are silently ignored; duplicates repeat the
/// page. Pages absent from `order` are dropped.
pub fn reorder_pages(bytes: &[u8], order: &[u32]) -> Result<Vec<u8>> {
    let doc = super::load_document(bytes)?;
    let total = doc.get_pages().len() as u32;

    let selection: Vec<u32> = order
        .iter()
        .copied()
        .filter(|&p| p >= 1 && p <= total)
        .collect();
    if selection.is_empty() {
        return Err(Error::NoPagesSelected(total));
    }

    select(doc, &selection)
}

/// Delete the pages in `range`. Pages beyond the document are silently
/// ignored; deleting every page is refused.
pub fn delete_pages(bytes: &[u8], range: &PageRange) -> Result<Vec<u8>> {
    let mut doc = super::load_document(bytes)?;
    let total = doc.get_pages().len() as u32;

    let mut targets: Vec<u32> = range
        .pages()
        .iter()
        .copied()
        .filter(|&p| p <= total)
        .collect();
    if targets.is_empty() {
        return Err(Error::NoPagesSelected(total));
    }
    if targets.len() as u32 == total {
        return Err(Error::EmptyDocument);
    }

    // Delete from the back so earlier numbers stay valid as pages go.
    targets.sort_unstable_by(|a, b| b.cmp(a));
    doc.delete_pages(&targets);

    super::save_document(doc)
}

/// Rotate pages by `degrees` (any multiple of 90, positive or negative).
///
/// Rotation adds to each page's existing `/Rotate` value, normalized into
/// `0..360`. With no range, every page rotates; with one, only the listed
/// pages, out-of-range numbers silently ignored.
pub fn rotate_pages(bytes: &[u8], range: Option<&PageRange>, degrees: i64) -> Result<Vec<u8>> {
    if degrees % 90 != 0 {
        return Err(Error::InvalidRotation(degrees));
    }

    let mut doc = super::load_document(bytes)?;
    let page_map = doc.get_pages();

    let targets: Vec<ObjectId> = page_map
        .iter()
        .filter(|(num, _)| range.map_or(true, |r| r.contains(**num)))
        .map(|(_, id)| *id)
        .collect();

    for page_id in targets {
        let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
        let current = page_dict
            .get(b"Rotate")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(0);
        let rotation = (current + degrees).rem_euclid(360);
        page_dict.set("Rotate", rotation);
    }

    super::save_document(doc)
}

/// Split a document into one single-page PDF per page.
///
/// Returns `(file_name, bytes)` pairs named `page_1.pdf`, `page_2.pdf`, …
/// in page order. Pages are rendered in parallel.
pub fn split(bytes: &[u8]) -> Result<Vec<(String, Vec<u8>)>> {
    let doc = super::load_document(bytes)?;
    let total = doc.get_pages().len() as u32;
    if total == 0 {
        return Err(Error::EmptyDocument);
    }

    (1..=total)
        .into_par_iter()
        .map(|page| {
            let mut single = doc.clone();
            let others: Vec<u32> = (1..=total).rev().filter(|&p| p != page).collect();
            if !others.is_empty() {
                single.delete_pages(&others);
            }
            let out = super::save_document(single)?;
            Ok((format!("page_{}.pdf", page), out))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::{page_count, testutil::make_test_pdf};
    use super::*;

    #[test]
    fn test_extract_subset() {
        let pdf = make_test_pdf(5);
        let out = extract_pages(&pdf, &PageRange::parse("2,4")).unwrap();
        assert_eq!(page_count(&out).unwrap(), 2);
    }

    #[test]
    fn test_extract_skips_out_of_range() {
        let pdf = make_test_pdf(3);
        let out = extract_pages(&pdf, &PageRange::parse("2,7-9")).unwrap();
        assert_eq!(page_count(&out).unwrap(), 1);
    }

    #[test]
    fn test_extract_nothing_selected() {
        let pdf = make_test_pdf(3);
        let result = extract_pages(&pdf, &PageRange::parse("10-12"));
        assert!(matches!(result, Err(Error::NoPagesSelected(3))));
    }

    #[test]
    fn test_reorder_reverses() {
        let pdf = make_test_pdf(3);
        let out = reorder_pages(&pdf, &[3, 2, 1]).unwrap();
        assert_eq!(page_count(&out).unwrap(), 3);
    }

    #[test]
    fn test_reorder_drops_unlisted_pages() {
        let pdf = make_test_pdf(4);
        let out = reorder_pages(&pdf, &[4, 1]).unwrap();
        assert_eq!(page_count(&out).unwrap(), 2);
    }

    #[test]
    fn test_reorder_ignores_invalid_numbers() {
        let pdf = make_test_pdf(2);
        let out = reorder_pages(&pdf, &[2, 0, 9, 1]).unwrap();
        assert_eq!(page_count(&out).unwrap(), 2);
    }

    #[test]
    fn test_delete_middle_page() {
        let pdf = make_test_pdf(3);
        let out = delete_pages(&pdf, &PageRange::parse("2")).unwrap();
        assert_eq!(page_count(&out).unwrap(), 2);
    }

    #[test]
    fn test_delete_all_pages_refused() {
        let pdf = make_test_pdf(2);
        let result = delete_pages(&pdf, &PageRange::parse("1,2"));
        assert!(matches!(result, Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_delete_out_of_range_only() {
        let pdf = make_test_pdf(2);
        let result = delete_pages(&pdf, &PageRange::parse("5-8"));
        assert!(matches!(result, Err(Error::NoPagesSelected(2))));
    }

    #[test]
    fn test_rotate_all_pages() {
        let pdf = make_test_pdf(2);
        let out = rotate_pages(&pdf, None, 90).unwrap();
        let doc = Document::load_mem(&out).unwrap();
        for (_, page_id) in doc.get_pages() {
            let dict = doc.get_object(page_id).unwrap().as_dict().unwrap();
            assert_eq!(dict.get(b"Rotate").unwrap().as_i64().unwrap(), 90);
        }
    }

    #[test]
    fn test_rotate_accumulates_and_normalizes() {
        let pdf = make_test_pdf(1);
        let once = rotate_pages(&pdf, None, 270).unwrap();
        let twice = rotate_pages(&once, None, 180).unwrap();
        let doc = Document::load_mem(&twice).unwrap();
        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let dict = doc.get_object(page_id).unwrap().as_dict().unwrap();
        assert_eq!(dict.get(b"Rotate").unwrap().as_i64().unwrap(), 90);
    }

    #[test]
    fn test_rotate_negative() {
        let pdf = make_test_pdf(1);
        let out = rotate_pages(&pdf, None, -90).unwrap();
        let doc = Document::load_mem(&out).unwrap();
        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let dict = doc.get_object(page_id).unwrap().as_dict().unwrap();
        assert_eq!(dict.get(b"Rotate").unwrap().as_i64().unwrap(), 270);
    }

    #[test]
    fn test_rotate_rejects_non_right_angle() {
        let pdf = make_test_pdf(1);
        assert!(matches!(
            rotate_pages(&pdf, None, 45),
            Err(Error::InvalidRotation(45))
        ));
    }

    #[test]
    fn test_rotate_selected_pages_only() {
        let pdf = make_test_pdf(3);
        let out = rotate_pages(&pdf, Some(&PageRange::parse("2")), 180).unwrap();
        let doc = Document::load_mem(&out).unwrap();
        for (num, page_id) in doc.get_pages() {
            let dict = doc.get_object(page_id).unwrap().as_dict().unwrap();
            let rotation = dict
                .get(b"Rotate")
                .ok()
                .and_then(|o| o.as_i64().ok())
                .unwrap_or(0);
            assert_eq!(rotation, if num == 2 { 180 } else { 0 });
        }
    }

    #[test]
    fn test_split_names_and_counts() {
        let pdf = make_test_pdf(3);
        let parts = split(&pdf).unwrap();
        assert_eq!(parts.len(), 3);
        for (i, (name, bytes)) in parts.iter().enumerate() {
            assert_eq!(name, &format!("page_{}.pdf", i + 1));
            assert_eq!(page_count(bytes).unwrap(), 1);
        }
    }

    #[test]
    fn test_split_single_page() {
        let pdf = make_test_pdf(1);
        let parts = split(&pdf).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(page_count(&parts[0].1).unwrap(), 1);
    }

    #[test]
    fn test_split_then_merge_round_trip() {
        let pdf = make_test_pdf(4);
        let parts = split(&pdf).unwrap();
        let inputs: Vec<crate::ops::MergeInput> = parts
            .iter()
            .map(|(_, bytes)| crate::ops::MergeInput::all(bytes))
            .collect();
        let merged = crate::ops::merge(&inputs).unwrap();
        assert_eq!(page_count(&merged).unwrap(), 4);
    }
}
