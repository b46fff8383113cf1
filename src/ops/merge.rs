//! Merging multiple PDFs into one document.

use std::collections::{BTreeMap, HashSet};

use lopdf::{dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};
use crate::range::PageRange;

/// One source document for a merge, with an optional page selection.
///
/// Without a range, all pages are taken. With one, only the listed pages
/// are taken (in document order); page numbers beyond the document's page
/// count are silently ignored.
#[derive(Debug, Clone)]
pub struct MergeInput<'a> {
    pub bytes: &'a [u8],
    pub range: Option<PageRange>,
}

impl<'a> MergeInput<'a> {
    pub fn all(bytes: &'a [u8]) -> Self {
        Self { bytes, range: None }
    }

    pub fn pages(bytes: &'a [u8], range: PageRange) -> Self {
        Self {
            bytes,
            range: Some(range),
        }
    }
}

fn dict_type_is(object: &Object, name: &[u8]) -> bool {
    object
        .as_dict()
        .ok()
        .and_then(|d| d.get(b"Type").ok())
        .and_then(|t| t.as_name().ok())
        .is_some_and(|t| t == name)
}

/// Merge the pages of two or more PDFs into a single document, in input
/// order.
///
/// Object IDs from each source are renumbered into one ID space, a fresh
/// top-level Pages/Catalog pair is built, and the sources' own page-tree
/// nodes are discarded.
pub fn merge(inputs: &[MergeInput]) -> Result<Vec<u8>> {
    if inputs.len() < 2 {
        return Err(Error::NotEnoughInputs(inputs.len()));
    }

    let mut max_id = 1;
    let mut all_pages: Vec<ObjectId> = Vec::new();
    let mut all_objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for input in inputs {
        let mut doc = super::load_document(input.bytes)?;
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        let mut page_ids: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();
        page_ids.sort_by_key(|(num, _)| *num);
        for (num, page_id) in &page_ids {
            let selected = match &input.range {
                Some(range) => range.contains(*num),
                None => true,
            };
            if selected {
                all_pages.push(*page_id);
            }
        }

        for (id, object) in doc.objects {
            if dict_type_is(&object, b"Catalog") {
                continue;
            }
            all_objects.insert(id, object);
        }
    }

    if all_pages.is_empty() {
        return Err(Error::EmptyDocument);
    }

    let mut merged = Document::with_version("1.7");
    merged.objects = all_objects;
    merged.max_id = max_id;

    let pages_id = merged.new_object_id();
    let kids: Vec<Object> = all_pages.iter().map(|id| Object::Reference(*id)).collect();
    merged.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => all_pages.len() as i64,
            "Kids" => kids,
        }),
    );

    for page_id in &all_pages {
        if let Some(object) = merged.objects.get_mut(page_id) {
            if let Ok(page_dict) = object.as_dict_mut() {
                page_dict.set("Parent", Object::Reference(pages_id));
            }
        }
    }

    let catalog_id = merged.new_object_id();
    merged.objects.insert(
        catalog_id,
        Object::Dictionary(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }),
    );
    merged.trailer.set("Root", Object::Reference(catalog_id));

    // Drop the sources' intermediate Pages nodes; the new flat tree
    // replaces them.
    let keep: HashSet<ObjectId> = all_pages.iter().copied().collect();
    let orphans: Vec<ObjectId> = merged
        .objects
        .iter()
        .filter(|(id, object)| {
            !keep.contains(id)
                && **id != pages_id
                && **id != catalog_id
                && dict_type_is(object, b"Pages")
        })
        .map(|(id, _)| *id)
        .collect();
    for id in orphans {
        merged.objects.remove(&id);
    }

    log::debug!(
        "merged {} documents into {} pages",
        inputs.len(),
        all_pages.len()
    );

    super::save_document(merged)
}
