//! Where a join list comes from.

use std::fmt;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use crate::error::{PdfJoinError, Result};
use crate::join::{JoinItem, decode_inline, decode_structured};

/// Origin of a join list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinListSource {
    /// Inline notation given directly, e.g. `0:1,blank,1:2-4`.
    Inline(String),
    /// A file holding a structured (JSON) join list. `-` reads stdin.
    File(PathBuf),
}

impl JoinListSource {
    /// Whether the list is read from standard input.
    pub fn is_stdin(&self) -> bool {
        matches!(self, Self::File(path) if path.as_os_str() == "-")
    }

    /// Read and decode the join list.
    ///
    /// # Errors
    ///
    /// Returns [`PdfJoinError::FailedToReadJoinList`] when the file cannot be
    /// read, or a decode error for malformed content.
    pub async fn load(&self) -> Result<Vec<JoinItem>> {
        match self {
            Self::Inline(notation) => decode_inline(notation),
            Self::File(path) => {
                let text = if self.is_stdin() {
                    let mut text = String::new();
                    tokio::io::stdin()
                        .read_to_string(&mut text)
                        .await
                        .map_err(|source| PdfJoinError::FailedToReadJoinList {
                            path: path.clone(),
                            source,
                        })?;
                    text
                } else {
                    tokio::fs::read_to_string(path).await.map_err(|source| {
                        PdfJoinError::FailedToReadJoinList {
                            path: path.clone(),
                            source,
                        }
                    })?
                };
                decode_structured(&text)
            }
        }
    }
}

impl fmt::Display for JoinListSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline(notation) => write!(f, "inline \"{notation}\""),
            Self::File(_) if self.is_stdin() => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
