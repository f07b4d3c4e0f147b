//! Small helpers shared by the library and the binary.

use std::path::PathBuf;

use crate::error::{PdfJoinError, Result};

/// Expand input arguments into source paths.
///
/// An argument containing glob metacharacters (`*`, `?`, `[`) is expanded in
/// sorted order and must match at least one path. Any other argument is kept
/// as given, so a missing file is reported by the loader with its own name.
/// Argument order is preserved; it decides the source indices.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        if is_glob_pattern(pattern) {
            resolved_paths.extend(collect_paths_for_pattern(pattern)?);
        } else {
            resolved_paths.push(PathBuf::from(pattern));
        }
    }

    Ok(resolved_paths)
}

fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|err| {
        PdfJoinError::invalid_config(format!("Invalid glob pattern {pattern:?}: {err}"))
    })?;

    let mut resolved_paths = paths
        .map(|entry| entry.map_err(|err| PdfJoinError::other(err.to_string())))
        .collect::<Result<Vec<_>>>()?;

    if resolved_paths.is_empty() {
        return Err(PdfJoinError::NoGlobMatches {
            pattern: pattern.to_string(),
        });
    }

    resolved_paths.sort();
    Ok(resolved_paths)
}

fn is_glob_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
