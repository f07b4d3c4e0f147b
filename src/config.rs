//! Configuration module for pdfjoin.
//!
//! This module turns CLI arguments into a validated configuration that drives
//! the inventory, validation and join operations. It handles:
//! - Validation of argument combinations
//! - Parsing of option values
//! - Application of defaults

use std::path::PathBuf;
use std::str::FromStr;

use crate::assemble::AssembleOptions;
use crate::error::{PdfJoinError, Result};
use crate::join::JoinListSource;

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// Leave streams as they are.
    None,
    /// Compress uncompressed streams.
    #[default]
    Standard,
    /// Compress streams and drop zero-length ones.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfJoinError;

    /// Parse compression level from `none`, `standard` or `maximum`.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfJoinError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Size of inserted blank pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlankPageSize {
    /// ISO A4, 595 x 842 pt.
    #[default]
    A4,
    /// US Letter, 612 x 792 pt.
    Letter,
    /// Same MediaBox as the preceding output page (A4 when there is none).
    Match,
}

impl BlankPageSize {
    /// Fixed page size in points, or `None` for [`BlankPageSize::Match`].
    pub fn dimensions(&self) -> Option<(i64, i64)> {
        match self {
            Self::A4 => Some((595, 842)),
            Self::Letter => Some((612, 792)),
            Self::Match => None,
        }
    }
}

impl FromStr for BlankPageSize {
    type Err = PdfJoinError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "letter" => Ok(Self::Letter),
            "match" => Ok(Self::Match),
            _ => Err(PdfJoinError::invalid_config(format!(
                "Invalid blank page size: {s}. Must be one of: a4, letter, match"
            ))),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Where the joined document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to a file.
    File(PathBuf),
    /// Write to standard output.
    Stdout,
}

impl FromStr for OutputTarget {
    type Err = PdfJoinError;

    /// `-` selects stdout; anything else is a file path.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Err(PdfJoinError::invalid_config("Output path cannot be empty")),
            "-" => Ok(Self::Stdout),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }
}

/// The operation a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// List each source with its page count.
    Info,
    /// Check a join list against the sources.
    Validate,
    /// Print a join list in its structured form.
    Decode,
    /// Assemble and write the output document.
    Join,
}

impl Operation {
    fn needs_inputs(&self) -> bool {
        !matches!(self, Self::Decode)
    }

    fn needs_join_list(&self) -> bool {
        !matches!(self, Self::Info)
    }
}

/// Complete configuration for one pdfjoin run.
///
/// Derived from CLI arguments and checked by [`Config::validate`].
#[derive(Debug, Clone)]
pub struct Config {
    /// What to do.
    pub operation: Operation,

    /// Source document paths, in index order.
    pub inputs: Vec<PathBuf>,

    /// Join list to validate, decode or assemble.
    pub join_list: Option<JoinListSource>,

    /// Output destination for [`Operation::Join`].
    pub output: Option<OutputTarget>,

    /// Dry run mode - validate without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print machine-readable JSON instead of text.
    pub json: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Size of inserted blank pages.
    pub blank_page_size: BlankPageSize,

    /// Number of sources loaded concurrently (None = auto-detect).
    pub jobs: Option<usize>,
}

impl Config {
    /// Configuration for `operation` with everything else at its default.
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            inputs: Vec::new(),
            join_list: None,
            output: None,
            dry_run: false,
            verbose: false,
            quiet: false,
            json: false,
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
            blank_page_size: BlankPageSize::default(),
            jobs: None,
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are given where the operation needs them
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - A join list or output is missing where the operation needs one
    /// - The output file is also an input
    pub fn validate(&self) -> Result<()> {
        if self.operation.needs_inputs() && self.inputs.is_empty() {
            return Err(PdfJoinError::NoInputs);
        }

        if self.verbose && self.quiet {
            return Err(PdfJoinError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if self.jobs == Some(0) {
            return Err(PdfJoinError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        if self.operation.needs_join_list() && self.join_list.is_none() {
            return Err(PdfJoinError::invalid_config(
                "A join list is required (--join or --join-file)",
            ));
        }

        if self.operation == Operation::Join && !self.dry_run && self.output.is_none() {
            return Err(PdfJoinError::invalid_config(
                "An output path is required (--output)",
            ));
        }

        if let Some(OutputTarget::File(output)) = &self.output {
            if self.inputs.iter().any(|input| input == output) {
                return Err(PdfJoinError::invalid_config(format!(
                    "Output file cannot be the same as an input file: {}",
                    output.display()
                )));
            }
        }

        Ok(())
    }

    /// Get the effective number of concurrent loads.
    ///
    /// Returns the configured job count, or the available parallelism.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Options for the assembler.
    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            compression: self.compression,
            blank_page_size: self.blank_page_size,
        }
    }

    /// Whether the joined document goes to stdout.
    pub fn writes_to_stdout(&self) -> bool {
        matches!(self.output, Some(OutputTarget::Stdout))
    }
}
