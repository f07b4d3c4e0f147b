//! Join-list model.
//!
//! A join list is an ordered sequence of instructions describing the output
//! document: each [`JoinItem`] is either a blank page or a reference to one or
//! more pages of a source document. The order of items is the order of pages
//! in the output.
//!
//! Join lists arrive in two encodings that decode to the same items:
//!
//! - a JSON array such as `[{"pdf":0,"page":1},{"blank":true},{"pdf":1,"page":"2-4"}]`
//! - inline notation such as `0:1,blank,1:2-4`
//!
//! # Examples
//!
//! ```
//! use pdfjoin::join::{JoinItem, PageSpec, decode_inline};
//!
//! let items = decode_inline("0:1,blank,1:2-4").unwrap();
//! assert_eq!(items[1], JoinItem::Blank);
//! assert_eq!(items[2], JoinItem::page(1, PageSpec::Range("2-4".into())));
//! ```

pub mod decode;
pub mod pages;
pub mod source;

pub use decode::{decode_inline, decode_structured};
pub use pages::{PageNumber, parse_pages};
pub use source::JoinListSource;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{PdfJoinError, Result};

/// A page specifier: one page number or an inclusive `start-end` range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSpec {
    /// A single 1-based page number, kept as given.
    Page(PageNumber),
    /// A range in `start-end` notation, parsed on use.
    Range(String),
}

impl PageSpec {
    /// Resolve the specifier to its ascending page numbers.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PdfJoinError::InvalidPageSpec`] for malformed ranges.
    pub fn pages(&self) -> Result<RangeInclusive<PageNumber>> {
        parse_pages(self)
    }
}

impl fmt::Display for PageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => write!(f, "{page}"),
            Self::Range(range) => f.write_str(range),
        }
    }
}

impl From<PageSpec> for Value {
    fn from(spec: PageSpec) -> Self {
        match spec {
            PageSpec::Page(page) => Value::from(page),
            PageSpec::Range(range) => Value::String(range),
        }
    }
}

/// A reference to pages of one source document.
///
/// `pdf` is `None` when the item had no usable source index (missing,
/// negative or not an integer); `page` is `None` when it had no page value.
/// Both faults are reported by the validator and rejected by the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    /// 0-based index into the source list.
    pub pdf: Option<usize>,
    /// Pages to take from that source.
    pub page: Option<PageSpec>,
}

impl PageRef {
    /// Source index and page spec of the reference at join-list position `entry`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfJoinError::InvalidEntry`] without a usable source index,
    /// then [`PdfJoinError::MissingPage`] without a page value.
    pub fn target(&self, entry: usize) -> Result<(usize, &PageSpec)> {
        let pdf = self.pdf.ok_or(PdfJoinError::InvalidEntry { entry })?;
        let page = self
            .page
            .as_ref()
            .ok_or(PdfJoinError::MissingPage { entry })?;
        Ok((pdf, page))
    }
}

/// One instruction of a join list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum JoinItem {
    /// Insert one blank page.
    Blank,
    /// Copy pages from a source document.
    Page(PageRef),
}

impl JoinItem {
    /// Build a well-formed page reference.
    pub fn page(pdf: usize, page: PageSpec) -> Self {
        Self::Page(PageRef {
            pdf: Some(pdf),
            page: Some(page),
        })
    }

    /// Whether this item is a blank marker.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }
}

impl From<Value> for JoinItem {
    fn from(value: Value) -> Self {
        if value.get("blank") == Some(&Value::Bool(true)) {
            return Self::Blank;
        }

        let pdf = value
            .get("pdf")
            .and_then(integral)
            .and_then(|index| usize::try_from(index).ok());

        let page = match value.get("page") {
            None | Some(Value::Null) => None,
            Some(Value::String(range)) => Some(PageSpec::Range(range.clone())),
            Some(number @ Value::Number(_)) => Some(match integral(number) {
                Some(page) => PageSpec::Page(page),
                None => PageSpec::Range(number.to_string()),
            }),
            Some(other) => Some(PageSpec::Range(other.to_string())),
        };

        Self::Page(PageRef { pdf, page })
    }
}

/// A JSON number with an integral value, including floats such as `1.0`.
fn integral(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

impl From<JoinItem> for Value {
    fn from(item: JoinItem) -> Self {
        let mut object = Map::new();
        match item {
            JoinItem::Blank => {
                object.insert("blank".to_string(), Value::Bool(true));
            }
            JoinItem::Page(PageRef { pdf, page }) => {
                if let Some(pdf) = pdf {
                    object.insert("pdf".to_string(), Value::from(pdf));
                }
                if let Some(page) = page {
                    object.insert("page".to_string(), page.into());
                }
            }
        }
        Value::Object(object)
    }
}
