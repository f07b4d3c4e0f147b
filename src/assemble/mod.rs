//! Output document assembly.
//!
//! The assembler copies pages out of source documents in join-list order and
//! inserts blank pages where asked. Each copied page keeps its source content
//! exactly; the same page may be copied any number of times.
//!
//! # Examples
//!
//! ```no_run
//! use pdfjoin::assemble::{AssembleOptions, Assembler};
//! use pdfjoin::join::decode_inline;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let assembler = Assembler::with_options(AssembleOptions::default()).jobs(4);
//! let items = decode_inline("0:1,blank,1:2-4")?;
//! let result = assembler
//!     .assemble(&[PathBuf::from("a.pdf"), PathBuf::from("b.pdf")], &items)
//!     .await?;
//! std::fs::write("joined.pdf", &result.bytes)?;
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod pages;

pub use assembler::{AssembleResult, AssembleStatistics, Assembler};
pub use pages::OutputDocument;

use crate::config::{BlankPageSize, CompressionLevel};

/// Options controlling the output document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssembleOptions {
    /// Stream compression applied before serializing.
    pub compression: CompressionLevel,

    /// Size of inserted blank pages.
    pub blank_page_size: BlankPageSize,
}
