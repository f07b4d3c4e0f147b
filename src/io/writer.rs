//! Output writing.
//!
//! The assembler hands back finished bytes; this module puts them on disk or
//! stdout. File writes are atomic by default (write to a temporary sibling,
//! then rename) and create missing parent directories.
//!
//! # Examples
//!
//! ```no_run
//! use pdfjoin::io::writer::PdfWriter;
//! use std::path::Path;
//!
//! # async fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.write(&bytes, Path::new("joined.pdf")).await?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{PdfJoinError, Result};
use crate::utils::format_file_size;

/// Options for writing output files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Create missing parent directories.
    pub create_dirs: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            create_dirs: true,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writes finished documents.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer without atomic writes.
    pub fn non_atomic() -> Self {
        Self {
            options: WriteOptions {
                atomic: false,
                ..Default::default()
            },
        }
    }

    /// Write `bytes` to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfJoinError::FailedToCreateOutput`] when the file or its
    /// directory cannot be created, and [`PdfJoinError::FailedToWrite`] when
    /// writing or the final rename fails.
    pub async fn write(&self, bytes: &[u8], path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        if self.options.create_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.map_err(|source| {
                    PdfJoinError::FailedToCreateOutput {
                        path: parent.to_path_buf(),
                        source,
                    }
                })?;
            }
        }

        let write_path = if self.options.atomic {
            temp_path_for(path)
        } else {
            path.to_path_buf()
        };

        let mut file = tokio::fs::File::create(&write_path).await.map_err(|source| {
            PdfJoinError::FailedToCreateOutput {
                path: write_path.clone(),
                source,
            }
        })?;

        let written = async {
            file.write_all(bytes).await?;
            file.flush().await?;
            file.sync_all().await
        }
        .await;

        if let Err(source) = written {
            if self.options.atomic {
                let _ = tokio::fs::remove_file(&write_path).await;
            }
            return Err(PdfJoinError::FailedToWrite {
                path: write_path,
                source,
            });
        }
        drop(file);

        if self.options.atomic {
            tokio::fs::rename(&write_path, path)
                .await
                .map_err(|source| PdfJoinError::FailedToWrite {
                    path: path.to_path_buf(),
                    source,
                })?;
        }

        let stats = WriteStatistics {
            write_time: start.elapsed(),
            file_size: bytes.len() as u64,
            output_path: path.to_path_buf(),
        };

        debug!(
            path = %path.display(),
            size = stats.file_size,
            elapsed = ?stats.write_time,
            "Wrote output"
        );

        Ok(stats)
    }

    /// Write `bytes` to standard output.
    pub async fn write_stdout(&self, bytes: &[u8]) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(bytes).await?;
        stdout.flush().await?;
        Ok(())
    }

    /// Check if output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

/// Hidden sibling used for atomic writes, e.g. `out/.joined.pdf.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
