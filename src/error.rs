//! Error types for pdfjoin.
//!
//! Every fallible operation in the crate returns [`PdfJoinError`]. Errors that
//! concern a single join-list entry carry the entry's 0-based position and the
//! numbers involved, so callers can report exactly which instruction failed.
//!
//! # Error Categories
//!
//! - **Load Errors**: a source document is missing, unreadable or not a PDF
//! - **Join-List Errors**: malformed page specs, inline tokens or JSON
//! - **Assembly Errors**: an entry references a source or page that does not exist
//! - **Output Errors**: the joined document cannot be written

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfjoin operations.
pub type Result<T> = std::result::Result<T, PdfJoinError>;

/// Main error type for pdfjoin operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfJoinError {
    /// Source file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Source path exists but is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// Source file could not be parsed as a PDF.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", .path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason reported by the PDF parser.
        reason: String,
    },

    /// Source file is encrypted.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        .path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// A page specifier is not a page number or a `start-end` range.
    #[error("{}Invalid page spec {spec:?}: {reason}", entry_prefix(.entry))]
    InvalidPageSpec {
        /// Join-list entry the spec belongs to, when known.
        entry: Option<usize>,
        /// The specifier as given.
        spec: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An inline join-list token matches none of the accepted shapes.
    #[error(
        "Invalid join token {token:?}: expected \"pdfIndex:page\", \"pdfIndex:start-end\" or \"blank\""
    )]
    InvalidTokenFormat {
        /// The token, verbatim.
        token: String,
    },

    /// A structured join list could not be decoded.
    #[error("Invalid join list: {reason}")]
    InvalidJoinList {
        /// Decoder message.
        reason: String,
    },

    /// Failed to read a join-list file.
    #[error("Failed to read join list: {}\n  Reason: {source}", .path.display())]
    FailedToReadJoinList {
        /// Path to the join-list file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A page reference has a missing or invalid source index.
    #[error("Entry #{entry}: invalid or missing 'pdf' index")]
    InvalidEntry {
        /// Position of the entry in the join list.
        entry: usize,
    },

    /// A page reference has no page value.
    #[error("Entry #{entry}: missing 'page' value")]
    MissingPage {
        /// Position of the entry in the join list.
        entry: usize,
    },

    /// A page reference points past the end of the source list.
    #[error("Entry #{entry}: pdf[{pdf}] does not exist ({available} source document(s) given)")]
    UnknownSource {
        /// Position of the entry in the join list.
        entry: usize,
        /// Requested source index.
        pdf: usize,
        /// Number of source documents.
        available: usize,
    },

    /// A page reference names a page the source does not have.
    #[error("Entry #{entry}: pdf[{pdf}] has no page {page} (max {total})")]
    PageOutOfRange {
        /// Position of the entry in the join list.
        entry: usize,
        /// Source index.
        pdf: usize,
        /// Requested page number.
        page: i64,
        /// Page count of the source.
        total: usize,
    },

    /// The output document could not be built.
    #[error("Assembly failed: {reason}")]
    AssemblyFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Validation found faulty entries.
    #[error("Join list has {} error(s)", .errors.len())]
    ValidationFailed {
        /// Collected diagnostics.
        errors: Vec<String>,
    },

    /// No source documents were given.
    #[error("No source documents specified")]
    NoInputs,

    /// A glob pattern matched nothing.
    #[error("No files match pattern: {pattern}")]
    NoGlobMatches {
        /// The pattern as given.
        pattern: String,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

fn entry_prefix(entry: &Option<usize>) -> String {
    entry.map(|i| format!("Entry #{i}: ")).unwrap_or_default()
}

impl From<lopdf::Error> for PdfJoinError {
    fn from(err: lopdf::Error) -> Self {
        Self::AssemblyFailed {
            reason: err.to_string(),
        }
    }
}

impl PdfJoinError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an InvalidPageSpec error not yet tied to a join-list entry.
    pub fn invalid_page_spec(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPageSpec {
            entry: None,
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an AssemblyFailed error.
    pub fn assembly_failed(reason: impl Into<String>) -> Self {
        Self::AssemblyFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Attach a join-list position to a page-spec error.
    ///
    /// Other variants are returned unchanged.
    pub fn at_entry(self, index: usize) -> Self {
        match self {
            Self::InvalidPageSpec { spec, reason, .. } => Self::InvalidPageSpec {
                entry: Some(index),
                spec,
                reason,
            },
            other => other,
        }
    }

    /// Whether the error concerns the source documents rather than the join list.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::NotAFile { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::EncryptedPdf { .. }
        )
    }

    /// Whether the error was caused by a single faulty join-list entry.
    pub fn is_entry_fault(&self) -> bool {
        matches!(
            self,
            Self::InvalidPageSpec { entry: Some(_), .. }
                | Self::InvalidEntry { .. }
                | Self::MissingPage { .. }
                | Self::UnknownSource { .. }
                | Self::PageOutOfRange { .. }
        )
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::NoGlobMatches { .. } => 2,
            Self::FailedToReadJoinList { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::Io { .. } => 5,
            Self::InvalidPageSpec { .. } => 6,
            Self::InvalidTokenFormat { .. } => 6,
            Self::InvalidJoinList { .. } => 6,
            Self::InvalidEntry { .. } => 6,
            Self::MissingPage { .. } => 6,
            Self::UnknownSource { .. } => 6,
            Self::PageOutOfRange { .. } => 6,
            Self::AssemblyFailed { .. } => 6,
            Self::ValidationFailed { .. } => 7,
            Self::NoInputs => 1,
            Self::InvalidConfig { .. } => 1,
            Self::Other { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
        }
    }
}
