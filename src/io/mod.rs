//! I/O operations for pdfjoin.
//!
//! This module handles all file I/O:
//! - Loading source documents and taking their inventory
//! - Writing the joined document to disk or stdout

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Page count of one source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    /// Source path as given.
    pub file: PathBuf,
    /// Number of pages in the document.
    pub total_pages: usize,
}
