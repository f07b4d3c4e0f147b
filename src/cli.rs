//! CLI argument parsing for pdfjoin.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing and conversion into a [`Config`].

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use pdfjoin::config::{
    BlankPageSize, CompressionLevel, Config, Operation, OutputTarget, OverwriteMode,
};
use pdfjoin::error::Result;
use pdfjoin::join::JoinListSource;
use pdfjoin::utils::collect_paths_for_patterns;

/// Assemble a PDF from selected pages of several source documents.
///
/// Sources are numbered from 0 in the order given. A join list picks pages
/// from them, in output order:
///
///   0:1,blank,1:2-4,0:5
///
/// takes page 1 of the first source, a blank page, pages 2 to 4 of the second
/// source and page 5 of the first source.
#[derive(Parser, Debug)]
#[command(name = "pdfjoin")]
#[command(version)]
#[command(about = "Assemble a PDF from selected pages of several source documents")]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output - show details and debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// pdfjoin subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List each source document with its page count
    Info(InfoArgs),

    /// Check a join list against the source documents
    ///
    /// Reports every faulty entry and how often each source page is used.
    /// Exits with status 7 when the join list has errors.
    Validate(ValidateArgs),

    /// Print a join list in its structured JSON form
    Decode(DecodeArgs),

    /// Assemble the output document from a join list
    Join(JoinArgs),
}

/// Where the join list comes from.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct JoinListArgs {
    /// Join list in inline notation, e.g. "0:1,blank,1:2-4"
    ///
    /// Comma-separated tokens: "pdfIndex:page", "pdfIndex:start-end" or
    /// "blank". An empty token is also a blank page.
    #[arg(long, value_name = "NOTATION")]
    pub join: Option<String>,

    /// Read a JSON join list from a file ('-' for stdin)
    ///
    /// The file holds an array such as
    /// [{"pdf":0,"page":1},{"blank":true},{"pdf":1,"page":"2-4"}]
    #[arg(long, value_name = "FILE")]
    pub join_file: Option<PathBuf>,
}

impl JoinListArgs {
    fn source(&self) -> Option<JoinListSource> {
        match (&self.join, &self.join_file) {
            (Some(notation), _) => Some(JoinListSource::Inline(notation.clone())),
            (None, Some(path)) => Some(JoinListSource::File(path.clone())),
            (None, None) => None,
        }
    }
}

/// Arguments of `pdfjoin info`.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Source PDF files or glob patterns
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Number of sources loaded concurrently
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

/// Arguments of `pdfjoin validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Source PDF files or glob patterns (index order)
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    #[command(flatten)]
    pub join_list: JoinListArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Number of sources loaded concurrently
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

/// Arguments of `pdfjoin decode`.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub join_list: JoinListArgs,
}

/// Arguments of `pdfjoin join`.
#[derive(Args, Debug)]
pub struct JoinArgs {
    /// Source PDF files or glob patterns (index order)
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    #[command(flatten)]
    pub join_list: JoinListArgs,

    /// Output PDF file path ('-' for stdout)
    #[arg(short, long, value_name = "FILE", required_unless_present = "dry_run")]
    pub output: Option<String>,

    /// Dry run - validate the join list without creating output
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Compression level for output PDF
    ///
    /// - none: leave streams as they are
    /// - standard: compress streams (default)
    /// - maximum: compress streams and drop empty ones
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Size of blank pages
    ///
    /// - a4: 595 x 842 pt (default)
    /// - letter: 612 x 792 pt
    /// - match: same as the preceding output page
    #[arg(long, value_name = "SIZE", default_value = "a4")]
    #[arg(value_parser = ["a4", "letter", "match"])]
    pub blank_size: String,

    /// Number of sources loaded concurrently
    ///
    /// Default is the number of CPU cores. Use 1 for sequential loading.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// Expands glob patterns in the inputs, parses option values and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a glob matches nothing, an option value is
    /// invalid, or configuration validation fails.
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match &self.command {
            Command::Info(args) => Config {
                inputs: collect_paths_for_patterns(&args.inputs)?,
                json: args.json,
                jobs: args.jobs,
                ..Config::new(Operation::Info)
            },
            Command::Validate(args) => Config {
                inputs: collect_paths_for_patterns(&args.inputs)?,
                join_list: args.join_list.source(),
                json: args.json,
                jobs: args.jobs,
                ..Config::new(Operation::Validate)
            },
            Command::Decode(args) => Config {
                join_list: args.join_list.source(),
                ..Config::new(Operation::Decode)
            },
            Command::Join(args) => Config {
                inputs: collect_paths_for_patterns(&args.inputs)?,
                join_list: args.join_list.source(),
                output: args
                    .output
                    .as_deref()
                    .map(OutputTarget::from_str)
                    .transpose()?,
                dry_run: args.dry_run,
                overwrite_mode: overwrite_mode(args.force, args.no_clobber),
                compression: CompressionLevel::from_str(&args.compression)?,
                blank_page_size: BlankPageSize::from_str(&args.blank_size)?,
                jobs: args.jobs,
                ..Config::new(Operation::Join)
            },
        };

        config.verbose = self.verbose;
        config.quiet = self.quiet;

        config.validate()?;
        Ok(config)
    }
}

fn overwrite_mode(force: bool, no_clobber: bool) -> OverwriteMode {
    if force {
        OverwriteMode::Force
    } else if no_clobber {
        OverwriteMode::NoClobber
    } else {
        OverwriteMode::Prompt
    }
}
