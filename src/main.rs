//! pdfjoin - Assemble a PDF from selected pages of several source documents.

mod cli;

use clap::Parser;
use std::process;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use pdfjoin::assemble::Assembler;
use pdfjoin::config::{Config, Operation, OutputTarget, OverwriteMode};
use pdfjoin::error::{PdfJoinError, Result};
use pdfjoin::io::{PdfReader, PdfWriter};
use pdfjoin::join::JoinItem;
use pdfjoin::output::{
    OutputFormatter, display_assemble_statistics, display_inventory, display_validation_report,
};
use pdfjoin::validation::{JoinValidator, ValidationReport, validate_against};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "pdfjoin=debug" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    tracing::debug!(
        "{} v{} starting {:?}",
        pdfjoin::NAME,
        pdfjoin::VERSION,
        config.operation
    );

    match config.operation {
        Operation::Info => run_info(&config, &formatter).await,
        Operation::Validate => run_validate(&config, &formatter).await,
        Operation::Decode => run_decode(&config, &formatter).await,
        Operation::Join => run_join(&config, &formatter).await,
    }
}

async fn run_info(config: &Config, formatter: &OutputFormatter) -> Result<()> {
    let inventory = PdfReader::new()
        .inventory(&config.inputs, config.effective_jobs())
        .await?;

    if config.json {
        formatter.raw(&to_json(&inventory)?);
    } else {
        display_inventory(formatter, &inventory);
    }

    Ok(())
}

async fn run_validate(config: &Config, formatter: &OutputFormatter) -> Result<()> {
    let items = load_join_list(config).await?;
    let report = JoinValidator::new()
        .jobs(config.effective_jobs())
        .validate(&config.inputs, &items)
        .await?;

    if config.json {
        formatter.raw(&to_json(&report)?);
    } else {
        display_validation_report(formatter, &report);
    }

    report.into_result().map(|_| ())
}

async fn run_decode(config: &Config, formatter: &OutputFormatter) -> Result<()> {
    let items = load_join_list(config).await?;
    formatter.raw(&to_json(&items)?);
    Ok(())
}

async fn run_join(config: &Config, formatter: &OutputFormatter) -> Result<()> {
    let items = load_join_list(config).await?;

    formatter.info(&format!(
        "Loading {} source document(s)...",
        config.inputs.len()
    ));
    let load_start = Instant::now();
    let sources = PdfReader::new()
        .load_all(&config.inputs, config.effective_jobs())
        .await?;
    let load_time = load_start.elapsed();

    if config.dry_run {
        let inventory: Vec<_> = sources.iter().map(|source| source.info()).collect();
        let report = validate_against(&inventory, &items);
        report_dry_run(config, formatter, &report);
        return report.into_result().map(|_| ());
    }

    if let Some(OutputTarget::File(path)) = &config.output {
        handle_output_overwrite(config, path, formatter).await?;
    }

    formatter.info(&format!("Assembling {} join-list entries...", items.len()));
    let mut result =
        Assembler::with_options(config.assemble_options()).assemble_loaded(&sources, &items)?;
    result.statistics.load_time = load_time;

    let writer = PdfWriter::new();
    match &config.output {
        Some(OutputTarget::File(path)) => {
            let write_stats = writer.write(&result.bytes, path).await?;
            formatter.success(&format!(
                "Created {} ({} pages, {})",
                path.display(),
                result.statistics.total_pages,
                write_stats.format_file_size()
            ));
            display_assemble_statistics(formatter, &result.statistics);
        }
        Some(OutputTarget::Stdout) => writer.write_stdout(&result.bytes).await?,
        None => {
            return Err(PdfJoinError::invalid_config(
                "An output path is required (--output)",
            ));
        }
    }

    Ok(())
}

fn report_dry_run(config: &Config, formatter: &OutputFormatter, report: &ValidationReport) {
    display_validation_report(formatter, report);

    if report.is_valid() {
        formatter.success("Dry run completed successfully");
        match &config.output {
            Some(OutputTarget::File(path)) => {
                formatter.info(&format!("  Output would be: {}", path.display()));
            }
            Some(OutputTarget::Stdout) => formatter.info("  Output would go to stdout"),
            None => {}
        }
        formatter.info("  Run without --dry-run to create the joined PDF");
    }
}

async fn load_join_list(config: &Config) -> Result<Vec<JoinItem>> {
    match &config.join_list {
        Some(source) => {
            let items = source.load().await?;
            tracing::debug!(entries = items.len(), source = %source, "Loaded join list");
            Ok(items)
        }
        None => Err(PdfJoinError::invalid_config(
            "A join list is required (--join or --join-file)",
        )),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| PdfJoinError::other(e.to_string()))
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    config: &Config,
    output: &std::path::Path,
    formatter: &OutputFormatter,
) -> Result<()> {
    if !PdfWriter::new().exists(output).await {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfJoinError::output_exists(output.to_path_buf())),
        OverwriteMode::Prompt => {
            if formatter.is_quiet() {
                // In quiet mode, treat as no-clobber
                return Err(PdfJoinError::output_exists(output.to_path_buf()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                output.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfJoinError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(PdfJoinError::Cancelled)
            }
        }
    }
}
