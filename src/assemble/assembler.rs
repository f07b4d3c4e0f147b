//! Join-list execution.
//!
//! The assembler is strict: the first faulty entry aborts the whole build and
//! nothing is returned but the error, which names the entry and the numbers
//! involved.

use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::assemble::AssembleOptions;
use crate::assemble::pages::OutputDocument;
use crate::error::{PdfJoinError, Result};
use crate::io::{LoadedPdf, PdfReader};
use crate::join::{JoinItem, parse_pages};
use crate::utils::format_file_size;

/// Statistics about an assembly.
#[derive(Debug, Clone, Default)]
pub struct AssembleStatistics {
    /// Number of source documents.
    pub sources: usize,

    /// Pages copied from sources.
    pub copied_pages: usize,

    /// Blank pages inserted.
    pub blank_pages: usize,

    /// Total pages in the output.
    pub total_pages: usize,

    /// Time taken to load the sources.
    pub load_time: Duration,

    /// Time taken to build and serialize the output.
    pub assemble_time: Duration,

    /// Size of the serialized output in bytes.
    pub output_size: u64,
}

impl AssembleStatistics {
    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// Result of an assembly.
#[derive(Debug)]
pub struct AssembleResult {
    /// The serialized output document.
    pub bytes: Vec<u8>,

    /// Statistics about the assembly.
    pub statistics: AssembleStatistics,
}

/// Builds an output document from a join list.
#[derive(Debug, Clone)]
pub struct Assembler {
    reader: PdfReader,
    options: AssembleOptions,
    jobs: usize,
}

impl Assembler {
    /// Create an assembler with default options.
    pub fn new() -> Self {
        Self::with_options(AssembleOptions::default())
    }

    /// Create an assembler with custom options.
    pub fn with_options(options: AssembleOptions) -> Self {
        Self {
            reader: PdfReader::new(),
            options,
            jobs: 1,
        }
    }

    /// Load up to `jobs` sources concurrently.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Load `sources` and assemble `items` from them.
    ///
    /// # Errors
    ///
    /// Returns the first load error, or the first faulty entry as described
    /// in [`Assembler::assemble_loaded`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfjoin::assemble::Assembler;
    /// # use pdfjoin::join::decode_inline;
    /// # use std::path::PathBuf;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let sources = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
    /// let items = decode_inline("0:1,blank,1:2-4,0:5")?;
    /// let result = Assembler::new().assemble(&sources, &items).await?;
    /// println!("{} pages", result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn assemble(&self, sources: &[PathBuf], items: &[JoinItem]) -> Result<AssembleResult> {
        let load_start = Instant::now();
        let loaded = self.reader.load_all(sources, self.jobs).await?;
        let load_time = load_start.elapsed();

        let mut result = self.assemble_loaded(&loaded, items)?;
        result.statistics.load_time = load_time;
        Ok(result)
    }

    /// Assemble `items` from already loaded sources.
    ///
    /// Entries are processed in order. A blank item appends a blank page; a
    /// page reference appends one copy per page number of its spec.
    ///
    /// # Errors
    ///
    /// Stops at the first faulty entry with:
    /// - [`PdfJoinError::InvalidEntry`] for a missing or invalid source index
    /// - [`PdfJoinError::MissingPage`] for a missing page value
    /// - [`PdfJoinError::UnknownSource`] for a source index past the end
    /// - [`PdfJoinError::InvalidPageSpec`] for a malformed page spec
    /// - [`PdfJoinError::PageOutOfRange`] for a page the source lacks
    pub fn assemble_loaded(
        &self,
        sources: &[LoadedPdf],
        items: &[JoinItem],
    ) -> Result<AssembleResult> {
        let start = Instant::now();
        let mut output = OutputDocument::new(self.options);
        let mut statistics = AssembleStatistics {
            sources: sources.len(),
            ..Default::default()
        };

        for (entry, item) in items.iter().enumerate() {
            let page_ref = match item {
                JoinItem::Blank => {
                    output.append_blank();
                    statistics.blank_pages += 1;
                    debug!(entry, "Appended blank page");
                    continue;
                }
                JoinItem::Page(page_ref) => page_ref,
            };

            let (pdf, spec) = page_ref.target(entry)?;
            let source = sources.get(pdf).ok_or(PdfJoinError::UnknownSource {
                entry,
                pdf,
                available: sources.len(),
            })?;
            let pages = parse_pages(spec).map_err(|e| e.at_entry(entry))?;
            let total = source.page_count;

            for page in pages {
                let page_number = u32::try_from(page)
                    .ok()
                    .filter(|&n| n >= 1 && n as usize <= total)
                    .ok_or(PdfJoinError::PageOutOfRange {
                        entry,
                        pdf,
                        page,
                        total,
                    })?;

                output.append_page(pdf, &source.document, page_number)?;
                statistics.copied_pages += 1;
            }

            debug!(entry, pdf, spec = %spec, "Copied pages");
        }

        statistics.total_pages = output.page_count();
        let bytes = output.finish()?;
        statistics.output_size = bytes.len() as u64;
        statistics.assemble_time = start.elapsed();

        info!(
            pages = statistics.total_pages,
            blanks = statistics.blank_pages,
            size = %statistics.format_output_size(),
            "Assembled output document"
        );

        Ok(AssembleResult { bytes, statistics })
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}
