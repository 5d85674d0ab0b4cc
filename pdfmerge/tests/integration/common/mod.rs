//! Shared fixtures for the integration tests.
//!
//! Fixtures are generated on the fly: page `n` of a generated document has
//! a MediaBox width of `width_base + n`, so the origin of every page in a
//! merged output can be read back from its width.

#![allow(dead_code)]

use lopdf::{Document, Object, dictionary};
use std::path::{Path, PathBuf};

/// Build a document with `pages` pages.
pub fn build_pdf(pages: usize, width_base: i64) -> Document {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let kids: Vec<Object> = (1..=pages)
        .map(|n| {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), (width_base + n as i64).into(), 792.into()],
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            });
            page_id.into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }
        .into(),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Write a generated document to `dir/name`.
pub fn write_pdf(dir: &Path, name: &str, pages: usize, width_base: i64) -> PathBuf {
    let path = dir.join(name);
    build_pdf(pages, width_base)
        .save(&path)
        .expect("Failed to write fixture");
    path
}

/// MediaBox widths of the pages of the PDF at `path`, in page order.
pub fn page_widths(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).expect("Failed to load merged output");
    doc.get_pages()
        .into_values()
        .map(|id| {
            let page = doc.get_dictionary(id).expect("page is not a dictionary");
            let mediabox = page
                .get(b"MediaBox")
                .and_then(Object::as_array)
                .expect("page has no MediaBox");
            mediabox[2].as_i64().expect("MediaBox width is not an integer")
        })
        .collect()
}

/// Number of `/Type /Page` objects stored in the PDF at `path`, reachable or not.
pub fn page_object_count(path: &Path) -> usize {
    let doc = Document::load(path).expect("Failed to load merged output");
    doc.objects
        .values()
        .filter_map(|object| object.as_dict().ok())
        .filter(|dict| {
            dict.get(b"Type")
                .and_then(Object::as_name)
                .is_ok_and(|name| name == b"Page")
        })
        .count()
}

/// Files in `dir` with a `.tmp` extension.
pub fn temp_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|entry| entry.expect("Failed to read dir entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "tmp"))
        .collect()
}

/// Create a temporary directory for fixtures and outputs.
pub fn temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().expect("Failed to create temp dir")
}
