//! Source document loading.
//!
//! `lopdf` parsing is blocking, so each load runs on tokio's blocking pool.
//! Several sources can load at once; results always come back in input order.
//!
//! # Examples
//!
//! ```no_run
//! use pdfjoin::io::reader::PdfReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let sources = reader.load_all(&paths, 4).await?;
//! # Ok(())
//! # }
//! ```

use futures::stream::{self, StreamExt, TryStreamExt};
use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::debug;

use crate::error::{PdfJoinError, Result};
use crate::io::DocumentInfo;

/// A loaded source document.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    /// Wrap an already parsed document.
    ///
    /// `path` only identifies the source in reports; nothing is read from it,
    /// so `file_size` starts at zero.
    pub fn from_document(document: Document, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let page_count = document.get_pages().len();

        Self {
            document,
            path,
            page_count,
            load_time: Duration::ZERO,
            file_size: 0,
        }
    }

    /// Inventory record for this source.
    pub fn info(&self) -> DocumentInfo {
        DocumentInfo {
            file: self.path.clone(),
            total_pages: self.page_count,
        }
    }
}

/// Loads source documents from disk.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Check that `path` names an existing regular file.
    ///
    /// # Errors
    ///
    /// Returns [`PdfJoinError::FileNotFound`] or [`PdfJoinError::NotAFile`].
    pub fn check_path_exists(path: &Path) -> Result<()> {
        if !path.try_exists()? {
            return Err(PdfJoinError::file_not_found(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(PdfJoinError::not_a_file(path.to_path_buf()));
        }

        Ok(())
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or is a directory
    /// - The file is not a valid PDF
    /// - The PDF is encrypted
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        Self::check_path_exists(path)?;

        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let document = task::spawn_blocking({
            let path = path_buf.clone();
            move || Document::load(&path)
        })
        .await
        .map_err(|e| PdfJoinError::other(format!("Load task failed: {e}")))?
        .map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                PdfJoinError::encrypted_pdf(path_buf.clone())
            } else {
                PdfJoinError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        if document.trailer.get(b"Encrypt").is_ok() {
            return Err(PdfJoinError::encrypted_pdf(path_buf));
        }

        let file_size = tokio::fs::metadata(&path_buf).await?.len();

        let mut loaded = LoadedPdf::from_document(document, path_buf);
        loaded.file_size = file_size;
        loaded.load_time = start.elapsed();

        debug!(
            path = %loaded.path.display(),
            pages = loaded.page_count,
            elapsed = ?loaded.load_time,
            "Loaded source document"
        );

        Ok(loaded)
    }

    /// Load several documents, at most `jobs` at a time.
    ///
    /// The returned documents are in the order of `paths`. If any load fails,
    /// the error of the first failing path (in input order) is returned and no
    /// documents are.
    pub async fn load_all(&self, paths: &[PathBuf], jobs: usize) -> Result<Vec<LoadedPdf>> {
        stream::iter(paths.iter().map(|path| self.load(path)))
            .buffered(jobs.max(1))
            .try_collect()
            .await
    }

    /// Page counts of all `paths`, in input order.
    ///
    /// Fails as a whole on the first load error.
    pub async fn inventory(&self, paths: &[PathBuf], jobs: usize) -> Result<Vec<DocumentInfo>> {
        let loaded = self.load_all(paths, jobs).await?;
        Ok(loaded.iter().map(LoadedPdf::info).collect())
    }
}
