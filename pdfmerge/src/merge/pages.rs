//! Page selection on loaded documents.
//!
//! Restricting a document to a [`PageSelector`] rewrites the root of its
//! page tree so that only the selected pages remain reachable. Every kept
//! page is attached directly to the root, with the attributes it inherited
//! from intermediate nodes copied onto the page itself.

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashSet;
use std::path::Path;

use crate::config::PageSelector;
use crate::error::{PdfMergeError, Result};

/// Applies page selectors to documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageExtractor;

impl PageExtractor {
    /// Create a new page extractor.
    pub fn new() -> Self {
        Self
    }

    /// Restrict `doc` to the pages picked by `pages`.
    ///
    /// Returns the number of pages left in the document.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::InvalidPageRange`] if the selector points
    /// past the last page, and [`PdfMergeError::MergeFailed`] if the page
    /// tree cannot be rewritten.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfmerge::merge::pages::PageExtractor;
    /// # use pdfmerge::config::PageSelector;
    /// # use lopdf::Document;
    /// # use std::path::Path;
    /// # fn example(mut doc: Document) -> Result<(), Box<dyn std::error::Error>> {
    /// let extractor = PageExtractor::new();
    /// let kept = extractor.select(&mut doc, Path::new("a.pdf"), PageSelector::Range(1, 5))?;
    /// assert_eq!(kept, 5);
    /// # Ok(())
    /// # }
    /// ```
    pub fn select(&self, doc: &mut Document, path: &Path, pages: PageSelector) -> Result<usize> {
        let all_pages = doc.get_pages();
        let total = all_pages.len() as u32;

        if pages.is_all() {
            return Ok(all_pages.len());
        }

        let range = pages
            .resolve(total)
            .ok_or_else(|| PdfMergeError::InvalidPageRange {
                path: path.to_path_buf(),
                pages,
                total_pages: all_pages.len(),
            })?;

        let page_ids: Vec<ObjectId> = range
            .filter_map(|page_num| all_pages.get(&page_num).copied())
            .collect();

        update_page_tree(doc, &page_ids)
            .map_err(|reason| PdfMergeError::merge_failed(path.to_path_buf(), pages, reason))?;

        Ok(page_ids.len())
    }
}

/// Page attributes a page may inherit from its ancestors.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Make `new_parent` the parent of every page in `page_ids`.
///
/// Inheritable attributes the page does not set itself are first copied
/// from its nearest ancestor in `doc` that does.
pub(crate) fn reparent_pages(
    doc: &mut Document,
    page_ids: &[ObjectId],
    new_parent: ObjectId,
) -> std::result::Result<(), String> {
    for &page_id in page_ids {
        let page = doc
            .get_dictionary(page_id)
            .map_err(|e| format!("Failed to get page {page_id:?}: {e}"))?;
        let inherited = inherited_attributes(doc, page);

        let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) else {
            return Err(format!("Page {page_id:?} is not a dictionary"));
        };
        for (key, value) in inherited {
            page.set(key, value);
        }
        page.set("Parent", Object::Reference(new_parent));
    }

    Ok(())
}

/// Inheritable attributes missing from `page`, resolved through its parents.
fn inherited_attributes(doc: &Document, page: &Dictionary) -> Vec<(Vec<u8>, Object)> {
    let mut missing: Vec<&[u8]> = INHERITABLE
        .into_iter()
        .filter(|key| !page.has(key))
        .collect();
    let mut found = Vec::new();
    let mut visited = HashSet::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    while let Some(node_id) = parent {
        if missing.is_empty() || !visited.insert(node_id) {
            break;
        }
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    found
}

/// Replace the root page node's kids with `page_ids`.
fn update_page_tree(doc: &mut Document, page_ids: &[ObjectId]) -> std::result::Result<(), String> {
    let pages_id = pages_root(doc)?;
    reparent_pages(doc, page_ids, pages_id)?;

    let pages_obj = doc
        .get_object_mut(pages_id)
        .map_err(|e| format!("Failed to get pages object: {e}"))?;

    if let Object::Dictionary(dict) = pages_obj {
        let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();

        dict.set("Kids", Object::Array(kids));
        dict.set("Count", Object::Integer(page_ids.len() as i64));
        Ok(())
    } else {
        Err("Pages object is not a dictionary".to_string())
    }
}

/// Object id of the document's root page node.
pub(crate) fn pages_root(doc: &Document) -> std::result::Result<ObjectId, String> {
    doc.catalog()
        .map_err(|e| format!("Failed to get catalog: {e}"))?
        .get(b"Pages")
        .and_then(|p| p.as_reference())
        .map_err(|e| format!("Failed to get pages reference: {e}"))
}
