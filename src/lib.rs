//! pdfjoin - Assemble a PDF from selected pages of several source documents.
//!
//! Source documents are addressed by their 0-based position in the input
//! list. A join list names, in output order, which pages to copy and where
//! to insert blank pages. This library provides:
//!
//! - Page-range parsing (`"3"`, `"2-5"`)
//! - Join-list decoding from inline notation or structured JSON
//! - Document inventory (page counts per source)
//! - Validation with per-entry error messages and page-usage histograms
//! - Assembly of the output document
//!
//! # Examples
//!
//! ## Join
//!
//! ```no_run
//! use pdfjoin::assemble::Assembler;
//! use pdfjoin::io::PdfWriter;
//! use pdfjoin::join::decode_inline;
//! use std::path::{Path, PathBuf};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sources = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let items = decode_inline("0:1,blank,1:2-4,0:5")?;
//!
//! let result = Assembler::new().assemble(&sources, &items).await?;
//! PdfWriter::new().write(&result.bytes, Path::new("joined.pdf")).await?;
//! println!("Created {} page document", result.statistics.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Validation
//!
//! ```no_run
//! use pdfjoin::join::decode_structured;
//! use pdfjoin::validation::JoinValidator;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sources = vec![PathBuf::from("a.pdf")];
//! let items = decode_structured(r#"[{"pdf":0,"page":"1-3"},{"blank":true}]"#)?;
//!
//! let report = JoinValidator::new().validate(&sources, &items).await?;
//! for message in &report.errors {
//!     eprintln!("{message}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assemble;
pub mod config;
pub mod error;
pub mod io;
pub mod join;
pub mod output;
pub mod utils;
pub mod validation;


// Re-export commonly used types
pub use config::Config;
pub use error::{PdfJoinError, Result};
pub use join::{JoinItem, PageRef, PageSpec};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
