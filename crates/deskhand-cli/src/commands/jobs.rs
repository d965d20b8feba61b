//! Jobs command - turn a batch of job order PDFs into one invoice record file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{Days, Local, NaiveDate};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use deskhand_core::catalog::Catalog;
use deskhand_core::joborder::records_from_pdf;
use deskhand_core::models::config::DeskhandConfig;
use deskhand_core::models::invoice::{InvoiceData, JobRecord};

use crate::workspace::Workspace;

/// Arguments for the jobs command.
#[derive(Args)]
pub struct JobsArgs {
    /// Input files or glob pattern (default: the unprocessed jobs folder)
    input: Option<String>,

    /// Workspace root containing the working folders
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Invoice name (default: "Invoice <date>")
    #[arg(short, long)]
    name: Option<String>,

    /// Invoice number (default: configured prefix + date)
    #[arg(long)]
    invoice_number: Option<String>,

    /// Invoice date as YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Write the invoice file here instead of the invoices folder
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Parse only; do not write the invoice or move the inputs
    #[arg(long)]
    dry_run: bool,
}

/// Result of processing a single job order.
struct ProcessResult {
    path: PathBuf,
    records: Vec<JobRecord>,
    error: Option<String>,
}

pub async fn run(args: JobsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        DeskhandConfig::from_file(std::path::Path::new(path))?
    } else {
        DeskhandConfig::default()
    };

    let workspace = Workspace::new(&args.root);
    workspace.ensure_folders(&config.folders)?;

    // Inputs given on the command line stay where they are; the
    // unprocessed folder is consumed and its files moved on success.
    let from_workspace = args.input.is_none();
    let files = match &args.input {
        Some(pattern) => super::expand_pattern(pattern)?,
        None => workspace.pdf_files(&config.folders.unprocessed_jobs)?,
    };

    if files.is_empty() {
        println!("{} No job orders found to process", style("ℹ").blue());
        return Ok(());
    }

    println!(
        "{} Found {} job orders to process",
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

    let catalog = Catalog::standard();
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let outcome = fs::read(&path)
            .map_err(anyhow::Error::from)
            .and_then(|data| records_from_pdf(&data, &catalog).map_err(anyhow::Error::from));

        match outcome {
            Ok(records) => results.push(ProcessResult {
                path,
                records,
                error: None,
            }),
            Err(e) => {
                warn!("Failed to process {}: {}", path.display(), e);
                results.push(ProcessResult {
                    path,
                    records: Vec::new(),
                    error: Some(e.to_string()),
                });
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Complete");

    let successful: Vec<&ProcessResult> = results.iter().filter(|r| r.error.is_none()).collect();
    let failed: Vec<&ProcessResult> = results.iter().filter(|r| r.error.is_some()).collect();

    if successful.is_empty() {
        print_failures(&failed);
        anyhow::bail!("No job orders could be processed");
    }

    // One invoice for the whole batch, records in file order.
    let records: Vec<JobRecord> = successful
        .iter()
        .flat_map(|r| r.records.iter().cloned())
        .collect();
    let invoice = build_invoice(&args, &config, records);

    for issue in invoice.validate() {
        println!("{} {}", style("⚠").yellow(), issue);
    }

    if args.dry_run {
        println!(
            "{} Dry run: {} records from {} job orders, nothing written",
            style("ℹ").blue(),
            invoice.records.len(),
            successful.len()
        );
    } else {
        let output_dir = args
            .output
            .clone()
            .unwrap_or_else(|| workspace.folder(&config.folders.invoices));
        fs::create_dir_all(&output_dir)?;

        let output_path = output_dir.join(format!("{}.json", invoice.name));
        fs::write(&output_path, serde_json::to_string_pretty(&invoice)?)?;
        println!(
            "{} Invoice written to {}",
            style("✓").green(),
            output_path.display()
        );

        if from_workspace {
            for result in &successful {
                workspace.move_into(&result.path, &config.folders.processed_jobs)?;
            }
        }
    }

    println!();
    println!(
        "{} Processed {} job orders in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, {} invoice records",
        style(successful.len()).green(),
        style(failed.len()).red(),
        invoice.records.len()
    );
    println!(
        "   Invoice {} dated {}, due {}",
        invoice.invoice_number,
        invoice.invoice_date.format("%m/%d/%Y"),
        invoice.due_date.format("%m/%d/%Y")
    );
    print_failures(&failed);

    Ok(())
}

fn build_invoice(args: &JobsArgs, config: &DeskhandConfig, records: Vec<JobRecord>) -> InvoiceData {
    let invoice_date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let due_date = invoice_date
        .checked_add_days(Days::new(config.invoice.due_days as u64))
        .unwrap_or(invoice_date);

    let invoice_number = args.invoice_number.clone().unwrap_or_else(|| {
        format!(
            "{}{}",
            config.invoice.number_prefix,
            invoice_date.format("%Y%m%d")
        )
    });
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| format!("Invoice {}", invoice_date));

    InvoiceData {
        name,
        invoice_number,
        invoice_date,
        due_date,
        customer: config.company.customer_info(),
        records,
    }
}

fn print_failures(failed: &[&ProcessResult]) {
    if failed.is_empty() {
        return;
    }
    println!();
    println!("{}", style("Failed job orders:").red());
    for result in failed {
        println!(
            "  - {}: {}",
            result.path.display(),
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
}
