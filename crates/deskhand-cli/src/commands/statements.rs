//! Statements command - turn card statement PDFs into transaction report CSVs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use deskhand_core::models::config::DeskhandConfig;
use deskhand_core::models::transaction::Transaction;
use deskhand_core::statement::transactions_from_pdf;

use crate::workspace::Workspace;

/// Arguments for the statements command.
#[derive(Args)]
pub struct StatementsArgs {
    /// Input files or glob pattern (default: the unprocessed statements folder)
    input: Option<String>,

    /// Workspace root containing the working folders
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Write report CSVs here instead of the reports folder
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Parse only; do not write reports or move the inputs
    #[arg(long)]
    dry_run: bool,
}

/// Result of processing a single statement.
struct ProcessResult {
    path: PathBuf,
    transactions: Vec<Transaction>,
    error: Option<String>,
}

pub async fn run(args: StatementsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        DeskhandConfig::from_file(std::path::Path::new(path))?
    } else {
        DeskhandConfig::default()
    };

    let workspace = Workspace::new(&args.root);
    workspace.ensure_folders(&config.folders)?;

    let from_workspace = args.input.is_none();
    let files = match &args.input {
        Some(pattern) => super::expand_pattern(pattern)?,
        None => workspace.pdf_files(&config.folders.unprocessed_statements)?,
    };

    if files.is_empty() {
        println!("{} No statements found to process", style("ℹ").blue());
        return Ok(());
    }

    println!(
        "{} Found {} statements to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| workspace.folder(&config.folders.reports));

    let mut results = Vec::with_capacity(files.len());
    let mut reports_written = 0;

    for path in files {
        let outcome = fs::read(&path)
            .map_err(anyhow::Error::from)
            .and_then(|data| transactions_from_pdf(&data).map_err(anyhow::Error::from));

        match outcome {
            Ok(transactions) => {
                if transactions.is_empty() {
                    // Nothing to report; leave the file where it is.
                    warn!("No transactions found inside {}", path.display());
                    results.push(ProcessResult {
                        path,
                        transactions,
                        error: None,
                    });
                    pb.inc(1);
                    continue;
                }

                if !args.dry_run {
                    fs::create_dir_all(&output_dir)?;
                    let stem = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("statement");
                    let report_path = output_dir.join(format!("{stem}.csv"));
                    write_report(&report_path, &transactions)?;
                    reports_written += 1;

                    if from_workspace {
                        workspace.move_into(&path, &config.folders.processed_statements)?;
                    }
                }

                results.push(ProcessResult {
                    path,
                    transactions,
                    error: None,
                });
            }
            Err(e) => {
                warn!("Failed to process {}: {}", path.display(), e);
                results.push(ProcessResult {
                    path,
                    transactions: Vec::new(),
                    error: Some(e.to_string()),
                });
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Complete");

    let failed: Vec<&ProcessResult> = results.iter().filter(|r| r.error.is_some()).collect();
    let transaction_count: usize = results.iter().map(|r| r.transactions.len()).sum();

    println!();
    println!(
        "{} Processed {} statements in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    if args.dry_run {
        println!(
            "   Dry run: {} transactions found, no reports written",
            transaction_count
        );
    } else {
        println!(
            "   {} reports written to {} ({} transactions), {} failed",
            style(reports_written).green(),
            output_dir.display(),
            transaction_count,
            style(failed.len()).red()
        );
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed statements:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Write transactions as a three-column CSV with centered values.
fn write_report(path: &Path, transactions: &[Transaction]) -> anyhow::Result<()> {
    let date_width = transactions.iter().map(|t| t.date.len()).max().unwrap_or(0);
    let description_width = transactions
        .iter()
        .map(|t| t.description.len())
        .max()
        .unwrap_or(0);
    let amount_width = transactions
        .iter()
        .map(|t| t.amount_display().len())
        .max()
        .unwrap_or(0);

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["Date", "Transaction", "Amount"])?;
    for transaction in transactions {
        wtr.write_record([
            center(&transaction.date, date_width),
            center(&transaction.description, description_width),
            center(&transaction.amount_display(), amount_width),
        ])?;
    }
    wtr.flush()?;

    Ok(())
}

/// Center `value` in a field of `width` characters, extra space on the
/// right.
fn center(value: &str, width: usize) -> String {
    if value.len() >= width {
        return value.to_string();
    }
    let pad = width - value.len();
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), value, " ".repeat(pad - left))
}
