//! Shared helpers for integration tests.
//!
//! Source documents are generated on the fly. Page `n` of source `i` is
//! `100 * (i + 1) + n` points wide, so an assembled document can be read back
//! and compared page by page.

#![allow(dead_code)]

use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Width of page `page` of source `index`.
pub fn width(index: usize, page: i64) -> i64 {
    100 * (index as i64 + 1) + page
}

/// Width of an A4 blank page.
pub const BLANK: i64 = 595;

/// Build a document with one page per entry of `widths`.
pub fn build_pdf(widths: &[i64]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = widths
        .iter()
        .map(|&w| {
            let content_id = doc.add_object(Stream::new(dictionary! {}, b"q Q".to_vec()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(w),
                    Object::Integer(842),
                ]),
                "Contents" => content_id,
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => widths.len() as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// A temporary directory holding generated source documents.
pub struct Sources {
    pub dir: TempDir,
    pub paths: Vec<PathBuf>,
}

impl Sources {
    /// Write one source per page count, named `source0.pdf`, `source1.pdf`, ...
    pub fn new(page_counts: &[usize]) -> Self {
        let dir = TempDir::new().unwrap();
        let paths = page_counts
            .iter()
            .enumerate()
            .map(|(index, &pages)| {
                let widths: Vec<i64> = (1..=pages as i64).map(|n| width(index, n)).collect();
                let path = dir.path().join(format!("source{index}.pdf"));
                build_pdf(&widths).save(&path).unwrap();
                path
            })
            .collect();

        Self { dir, paths }
    }

    /// Path for an output file inside the same directory.
    pub fn output(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write arbitrary bytes next to the sources.
    pub fn write_raw(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }
}

/// MediaBox widths of every page, in page order.
pub fn page_widths(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let page = doc.get_dictionary(page_id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            media_box[2].as_float().unwrap().round() as i64
        })
        .collect()
}

/// Page widths of a saved document.
pub fn page_widths_of(path: &Path) -> Vec<i64> {
    page_widths(&Document::load(path).unwrap())
}
