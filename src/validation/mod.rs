//! Join-list validation.
//!
//! The validator checks a join list against the page counts of the sources
//! without building anything. Unlike the assembler it never stops at a faulty
//! entry: every fault becomes one message in the report and processing goes on
//! with the next entry or page. Only a source that fails to load is fatal.
//!
//! Alongside the messages, the report counts how often each source page is
//! used, so a dry run shows exactly what a join would consume.
//!
//! # Examples
//!
//! ```
//! use pdfjoin::io::DocumentInfo;
//! use pdfjoin::join::decode_inline;
//! use pdfjoin::validation::validate_against;
//!
//! let inventory = vec![
//!     DocumentInfo { file: "a.pdf".into(), total_pages: 12 },
//!     DocumentInfo { file: "b.pdf".into(), total_pages: 7 },
//! ];
//! let items = decode_inline("0:1,blank,1:2-4,0:99").unwrap();
//! let report = validate_against(&inventory, &items);
//!
//! assert_eq!(report.errors, vec!["Entry #3: pdf[0] has no page 99 (max 12)"]);
//! assert_eq!(report.usage[1].used_pages.len(), 3);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

use crate::error::{PdfJoinError, Result};
use crate::io::{DocumentInfo, PdfReader};
use crate::join::{JoinItem, PageNumber, parse_pages};

/// Page usage of one source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// Source path as given.
    pub file: PathBuf,

    /// Number of pages in the source.
    pub total_pages: usize,

    /// How many times each page is referenced, by 1-based page number.
    pub used_pages: BTreeMap<PageNumber, usize>,
}

impl UsageRecord {
    fn new(info: &DocumentInfo) -> Self {
        Self {
            file: info.file.clone(),
            total_pages: info.total_pages,
            used_pages: BTreeMap::new(),
        }
    }

    /// Pages referenced more than once.
    pub fn reused_pages(&self) -> impl Iterator<Item = (PageNumber, usize)> + '_ {
        self.used_pages
            .iter()
            .filter(|&(_, &count)| count > 1)
            .map(|(&page, &count)| (page, count))
    }

    /// Number of distinct pages referenced.
    pub fn distinct_pages(&self) -> usize {
        self.used_pages.len()
    }
}

/// Outcome of validating a join list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// One message per fault, in entry order.
    pub errors: Vec<String>,

    /// One record per source, in input order.
    pub usage: Vec<UsageRecord>,

    /// Blank pages the join list inserts.
    pub blank_pages: usize,

    /// Output pages the valid part of the join list produces.
    pub planned_pages: usize,
}

impl ValidationReport {
    /// Whether no faults were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Turn a report with faults into [`PdfJoinError::ValidationFailed`].
    pub fn into_result(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(PdfJoinError::ValidationFailed {
                errors: self.errors,
            })
        }
    }
}

/// Validate `items` against an existing inventory.
///
/// A source index past the end of the inventory counts as a source with no
/// pages, so each of its page numbers is reported as out of range. Calling
/// this twice with the same inputs gives equal reports.
pub fn validate_against(inventory: &[DocumentInfo], items: &[JoinItem]) -> ValidationReport {
    let mut report = ValidationReport {
        usage: inventory.iter().map(UsageRecord::new).collect(),
        ..Default::default()
    };

    for (entry, item) in items.iter().enumerate() {
        let page_ref = match item {
            JoinItem::Blank => {
                report.blank_pages += 1;
                continue;
            }
            JoinItem::Page(page_ref) => page_ref,
        };

        let (pdf, spec) = match page_ref.target(entry) {
            Ok(target) => target,
            Err(err) => {
                report.errors.push(err.to_string());
                continue;
            }
        };

        let total = inventory.get(pdf).map_or(0, |info| info.total_pages);

        let pages = match parse_pages(spec) {
            Ok(pages) => pages,
            Err(err) => {
                report.errors.push(err.at_entry(entry).to_string());
                continue;
            }
        };

        for page in pages {
            if page < 1 || page > total as PageNumber {
                report.errors.push(
                    PdfJoinError::PageOutOfRange {
                        entry,
                        pdf,
                        page,
                        total,
                    }
                    .to_string(),
                );
                continue;
            }

            // In range implies the source exists.
            if let Some(record) = report.usage.get_mut(pdf) {
                *record.used_pages.entry(page).or_insert(0) += 1;
                report.planned_pages += 1;
            }
        }
    }

    report.planned_pages += report.blank_pages;

    debug!(
        entries = items.len(),
        errors = report.errors.len(),
        planned = report.planned_pages,
        "Validated join list"
    );

    report
}

/// Validates join lists against source documents on disk.
#[derive(Debug, Clone)]
pub struct JoinValidator {
    reader: PdfReader,
    jobs: usize,
}

impl JoinValidator {
    /// Create a validator that loads one source at a time.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
            jobs: 1,
        }
    }

    /// Load up to `jobs` sources concurrently.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Inventory `sources` and validate `items` against them.
    ///
    /// # Errors
    ///
    /// Fails only when a source cannot be loaded; faulty entries are reported
    /// in the returned [`ValidationReport`].
    pub async fn validate(
        &self,
        sources: &[PathBuf],
        items: &[JoinItem],
    ) -> Result<ValidationReport> {
        let inventory = self.reader.inventory(sources, self.jobs).await?;
        Ok(validate_against(&inventory, items))
    }
}

impl Default for JoinValidator {
    fn default() -> Self {
        Self::new()
    }
}
