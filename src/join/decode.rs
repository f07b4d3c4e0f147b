//! Join-list decoding.
//!
//! Both surface forms decode to the same `Vec<JoinItem>`. The inline form is
//! checked token by token; the structured form is accepted as-is and its shape
//! faults are left to the validator and assembler.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::{PdfJoinError, Result};
use crate::join::{JoinItem, PageSpec};

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+):(\d+(?:-\d+)?)$").expect("join token pattern is valid")
});

/// Decode inline notation such as `0:1,blank,1:2-4,0:5`.
///
/// Tokens are separated by commas and trimmed. An empty token or `blank`
/// (any case) is a blank page; `pdf:page` and `pdf:start-end` are page
/// references.
///
/// # Errors
///
/// Returns [`PdfJoinError::InvalidTokenFormat`] for the first token that has
/// neither shape.
pub fn decode_inline(notation: &str) -> Result<Vec<JoinItem>> {
    let items = notation
        .split(',')
        .map(decode_token)
        .collect::<Result<Vec<_>>>()?;

    debug!(items = items.len(), "Decoded inline join list");
    Ok(items)
}

fn decode_token(raw: &str) -> Result<JoinItem> {
    let token = raw.trim();
    if token.is_empty() || token.eq_ignore_ascii_case("blank") {
        return Ok(JoinItem::Blank);
    }

    let invalid = || PdfJoinError::InvalidTokenFormat {
        token: raw.to_string(),
    };

    let captures = TOKEN_PATTERN.captures(token).ok_or_else(invalid)?;
    let pdf: usize = captures[1].parse().map_err(|_| invalid())?;
    let page = &captures[2];

    let spec = if page.contains('-') {
        PageSpec::Range(page.to_string())
    } else {
        PageSpec::Page(page.parse().map_err(|_| invalid())?)
    };

    Ok(JoinItem::page(pdf, spec))
}

/// Decode a structured join list from JSON text.
///
/// The document must be a JSON array; each element becomes one item (see
/// [`JoinItem`]'s conversion from JSON values).
///
/// # Errors
///
/// Returns [`PdfJoinError::InvalidJoinList`] when the text is not JSON or not
/// an array.
pub fn decode_structured(json: &str) -> Result<Vec<JoinItem>> {
    let value: Value = serde_json::from_str(json).map_err(|e| PdfJoinError::InvalidJoinList {
        reason: e.to_string(),
    })?;

    let Value::Array(elements) = value else {
        return Err(PdfJoinError::InvalidJoinList {
            reason: "expected a JSON array of join items".to_string(),
        });
    };

    let items: Vec<JoinItem> = elements.into_iter().map(JoinItem::from).collect();
    debug!(items = items.len(), "Decoded structured join list");
    Ok(items)
}
