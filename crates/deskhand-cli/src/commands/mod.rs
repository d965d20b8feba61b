//! CLI subcommands.

pub mod config;
pub mod inspect;
pub mod jobs;
pub mod statements;
pub mod update;

use std::path::PathBuf;

use glob::glob;

/// Expand a glob pattern (or plain path) into sorted PDF paths.
pub(crate) fn expand_pattern(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    files.sort();
    Ok(files)
}
