//! Output formatting and display for pdfjoin.
//!
//! This module handles all user-facing output:
//! - Formatted status messages
//! - Inventory listings
//! - Validation reports and usage histograms
//! - Join summaries
//!
//! # Examples
//!
//! ```no_run
//! use pdfjoin::output::OutputFormatter;
//! use pdfjoin::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Validating join list");
//! formatter.success("Join list is valid");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use std::collections::BTreeMap;

use crate::assemble::AssembleStatistics;
use crate::io::DocumentInfo;
use crate::join::PageNumber;
use crate::validation::ValidationReport;

/// Display each source with its page count.
pub fn display_inventory(formatter: &OutputFormatter, inventory: &[DocumentInfo]) {
    for (index, info) in inventory.iter().enumerate() {
        formatter.item(&format!(
            "[{index}] {} ({} page{})",
            info.file.display(),
            info.total_pages,
            plural(info.total_pages)
        ));
    }
}

/// Display a validation report: faults first, then page usage per source.
pub fn display_validation_report(formatter: &OutputFormatter, report: &ValidationReport) {
    if report.is_valid() {
        formatter.success(&format!(
            "Join list is valid: {} output page{} ({} blank)",
            report.planned_pages,
            plural(report.planned_pages),
            report.blank_pages
        ));
    } else {
        formatter.error(&format!("Join list has {} error(s):", report.errors.len()));
        for message in &report.errors {
            formatter.error(&format!("  {message}"));
        }
    }

    formatter.section("Page usage:");
    for (index, record) in report.usage.iter().enumerate() {
        formatter.item(&format!(
            "[{index}] {} ({}/{} pages used): {}",
            record.file.display(),
            record.distinct_pages(),
            record.total_pages,
            format_used_pages(&record.used_pages)
        ));
    }
}

/// Display the summary of a finished join.
pub fn display_assemble_statistics(formatter: &OutputFormatter, stats: &AssembleStatistics) {
    formatter.detail("Sources", &stats.sources.to_string());
    formatter.detail("Copied pages", &stats.copied_pages.to_string());
    formatter.detail("Blank pages", &stats.blank_pages.to_string());
    formatter.detail(
        "Load time",
        &format!("{:.2}s", stats.load_time.as_secs_f64()),
    );
    formatter.detail(
        "Assemble time",
        &format!("{:.2}s", stats.assemble_time.as_secs_f64()),
    );
}

/// Render a usage histogram as `1, 2 (x3), 5`; `-` when nothing is used.
pub fn format_used_pages(used_pages: &BTreeMap<PageNumber, usize>) -> String {
    if used_pages.is_empty() {
        return "-".to_string();
    }

    used_pages
        .iter()
        .map(|(page, &count)| match count {
            1 => page.to_string(),
            _ => format!("{page} (x{count})"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
