//! Output page tree construction.
//!
//! [`OutputDocument`] owns the document being assembled. Source documents are
//! imported into it lazily (once each, renumbered past the current object ids),
//! and every appended page is a fresh page object whose inherited attributes
//! are copied onto it so it no longer depends on the source's page tree.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::{BTreeMap, HashMap};

use crate::assemble::AssembleOptions;
use crate::config::CompressionLevel;
use crate::error::{PdfJoinError, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guards against cyclic `Parent` chains in damaged files.
const MAX_TREE_DEPTH: usize = 64;

/// A document under construction.
pub struct OutputDocument {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    imported: HashMap<usize, BTreeMap<u32, ObjectId>>,
    last_media_box: Option<Object>,
    options: AssembleOptions,
}

impl OutputDocument {
    /// Start an empty document.
    pub fn new(options: AssembleOptions) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();

        Self {
            document,
            pages_id,
            kids: Vec::new(),
            imported: HashMap::new(),
            last_media_box: None,
            options,
        }
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Append one blank page.
    pub fn append_blank(&mut self) {
        let media_box = match self.options.blank_page_size.dimensions() {
            Some(dimensions) => media_box(dimensions),
            None => self
                .last_media_box
                .clone()
                .unwrap_or_else(|| media_box((595, 842))),
        };

        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => media_box.clone(),
            "Resources" => dictionary! {},
        });

        self.kids.push(page_id.into());
        self.last_media_box = Some(media_box);
    }

    /// Append a copy of page `page_number` (1-based) of `source`.
    ///
    /// `source_index` identifies the source across calls; the source's objects
    /// are imported on its first use only.
    pub fn append_page(
        &mut self,
        source_index: usize,
        source: &Document,
        page_number: u32,
    ) -> Result<()> {
        let page_id = self
            .import(source_index, source)
            .get(&page_number)
            .copied()
            .ok_or_else(|| {
                PdfJoinError::assembly_failed(format!(
                    "pdf[{source_index}] page {page_number} is missing from its page tree"
                ))
            })?;

        let mut page = self.document.get_dictionary(page_id)?.clone();
        for key in INHERITABLE_KEYS {
            if !page.has(key) {
                if let Some(value) = self.inherited(page_id, key) {
                    page.set(key, value);
                }
            }
        }
        page.set("Parent", self.pages_id);

        if let Ok(media_box) = page.get(b"MediaBox") {
            self.last_media_box = Some(media_box.clone());
        }

        let copy_id = self.document.add_object(page);
        self.kids.push(copy_id.into());
        Ok(())
    }

    /// Close the page tree and serialize.
    ///
    /// A document without pages is still written, with an empty page tree.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let count = self.kids.len() as i64;
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        self.document.prune_objects();

        match self.options.compression {
            CompressionLevel::None => {}
            CompressionLevel::Standard => {
                self.document.compress();
            }
            CompressionLevel::Maximum => {
                self.document.delete_zero_length_streams();
                self.document.prune_objects();
                self.document.compress();
            }
        }

        self.document.renumber_objects();

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Page ids of an imported source, importing it first if needed.
    fn import(&mut self, source_index: usize, source: &Document) -> &BTreeMap<u32, ObjectId> {
        let document = &mut self.document;
        self.imported.entry(source_index).or_insert_with(|| {
            let mut copy = source.clone();
            copy.renumber_objects_with(document.max_id + 1);
            document.max_id = document.max_id.max(copy.max_id);

            let pages = copy.get_pages();
            document.objects.extend(copy.objects);
            pages
        })
    }

    /// Nearest ancestor's value for `key`.
    fn inherited(&self, page_id: ObjectId, key: &[u8]) -> Option<Object> {
        let mut node: &Dictionary = self.document.get_dictionary(page_id).ok()?;

        for _ in 0..MAX_TREE_DEPTH {
            let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
            node = self.document.get_dictionary(parent_id).ok()?;
            if let Ok(value) = node.get(key) {
                return Some(value.clone());
            }
        }

        None
    }
}

fn media_box((width, height): (i64, i64)) -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(width),
        Object::Integer(height),
    ])
}
