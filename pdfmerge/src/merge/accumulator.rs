//! The merge accumulator.
//!
//! An accumulator collects documents in append order and serializes them
//! into one output buffer. It is a single mutable resource: calls must be
//! made one at a time, and each merge owns a fresh instance.

use lopdf::{Document, Object, ObjectId};

use crate::error::{PdfMergeError, Result};
use crate::io::LoadedDocument;
use crate::merge::pages::{PageExtractor, pages_root, reparent_pages};

/// Collects documents and produces the merged output.
pub trait MergeAccumulator {
    /// Append the pages of `document` selected by its page selector.
    fn add(&mut self, document: &LoadedDocument) -> Result<()>;

    /// Number of pages appended so far.
    fn page_count(&self) -> usize;

    /// Serialize everything appended so far into one buffer.
    fn finalize(self) -> Result<Vec<u8>>;
}

/// Accumulator backed by `lopdf`.
///
/// The first document becomes the base. Every later document has its
/// objects renumbered past the highest id in use, is copied into the base,
/// and has its selected pages appended to the base's root page node.
/// Objects no longer reachable from the base's catalog are dropped at
/// finalize.
#[derive(Debug, Default)]
pub struct LopdfAccumulator {
    merged: Option<Document>,
    max_id: u32,
    pages: usize,
    extractor: PageExtractor,
}

impl LopdfAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MergeAccumulator for LopdfAccumulator {
    fn add(&mut self, document: &LoadedDocument) -> Result<()> {
        let mut doc = Document::load_mem(&document.bytes).map_err(|e| {
            PdfMergeError::merge_failed(document.path.clone(), document.pages, e.to_string())
        })?;

        let selected = self
            .extractor
            .select(&mut doc, &document.path, document.pages)?;

        match self.merged.as_mut() {
            None => {
                self.max_id = doc.max_id;
                self.merged = Some(doc);
            }
            Some(merged) => {
                // Renumber objects to avoid ID conflicts
                doc.renumber_objects_with(self.max_id + 1);
                self.max_id = doc.max_id;

                let doc_pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
                pages_root(merged)
                    .and_then(|root| reparent_pages(&mut doc, &doc_pages, root))
                    .map_err(|reason| {
                        PdfMergeError::merge_failed(document.path.clone(), document.pages, reason)
                    })?;
                merged.objects.extend(doc.objects);

                add_pages_to_tree(merged, &doc_pages).map_err(|reason| {
                    PdfMergeError::merge_failed(document.path.clone(), document.pages, reason)
                })?;
            }
        }

        self.pages += selected;
        log::debug!(
            "appended {} page(s) from {} (pages: {})",
            selected,
            document.path.display(),
            document.pages
        );

        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn finalize(self) -> Result<Vec<u8>> {
        let mut merged = self.merged.ok_or(PdfMergeError::NoFilesToMerge)?;

        merged.compress();
        merged.prune_objects();
        merged.renumber_objects();

        let mut buffer = Vec::new();
        merged
            .save_to(&mut buffer)
            .map_err(|e| PdfMergeError::finalize_failed(e.to_string()))?;

        Ok(buffer)
    }
}

/// Append page references to the merged document's root page node.
fn add_pages_to_tree(merged: &mut Document, page_ids: &[ObjectId]) -> std::result::Result<(), String> {
    let pages_id = pages_root(merged)?;

    let pages_dict = merged
        .get_object_mut(pages_id)
        .map_err(|e| format!("Failed to get pages object: {e}"))?;

    let Object::Dictionary(dict) = pages_dict else {
        return Err("Pages object is not a dictionary".to_string());
    };

    match dict.get_mut(b"Kids") {
        Ok(Object::Array(kids)) => {
            kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));
        }
        Ok(_) => return Err("Kids is not an array".to_string()),
        Err(_) => return Err("Pages dictionary missing Kids array".to_string()),
    }

    let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
    dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));

    Ok(())
}
