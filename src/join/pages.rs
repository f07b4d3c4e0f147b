//! Page specifier parsing.
//!
//! A page specifier is either a single page number or a `start-end` range
//! (inclusive, 1-based). Only syntax and `start <= end` are checked here;
//! whether the pages exist is decided against a document's page count by the
//! validator and the assembler.

use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use crate::error::{PdfJoinError, Result};
use crate::join::PageSpec;

/// A 1-based page number as written in a join list.
///
/// Signed so that `0` and negative numbers survive decoding and are rejected
/// by the bounds check rather than by the parser.
pub type PageNumber = i64;

static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s*-\s*(\d+)$").expect("page range pattern is valid")
});

/// Resolve a page specifier to its ascending sequence of page numbers.
///
/// A single page `n` yields `n..=n`. A range string yields `start..=end`;
/// surrounding whitespace and whitespace around the hyphen are allowed.
///
/// # Errors
///
/// Returns [`PdfJoinError::InvalidPageSpec`] when the range string is not of
/// the form `start-end`, a number does not fit, or `start > end`.
///
/// # Examples
///
/// ```
/// use pdfjoin::join::{PageSpec, parse_pages};
///
/// let pages: Vec<i64> = parse_pages(&PageSpec::Range(" 2 - 5 ".into())).unwrap().collect();
/// assert_eq!(pages, vec![2, 3, 4, 5]);
///
/// assert!(parse_pages(&PageSpec::Range("5-2".into())).is_err());
/// ```
pub fn parse_pages(spec: &PageSpec) -> Result<RangeInclusive<PageNumber>> {
    match spec {
        PageSpec::Page(page) => Ok(*page..=*page),
        PageSpec::Range(range) => parse_range(range),
    }
}

fn parse_range(range: &str) -> Result<RangeInclusive<PageNumber>> {
    let captures = RANGE_PATTERN.captures(range.trim()).ok_or_else(|| {
        PdfJoinError::invalid_page_spec(range, "expected a page number or \"start-end\"")
    })?;

    let bound = |index: usize| -> Result<PageNumber> {
        captures[index]
            .parse()
            .map_err(|_| PdfJoinError::invalid_page_spec(range, "page number is too large"))
    };

    let start = bound(1)?;
    let end = bound(2)?;

    if start > end {
        return Err(PdfJoinError::invalid_page_spec(
            range,
            format!("start page {start} is after end page {end}"),
        ));
    }

    Ok(start..=end)
}
