//! Inspect command - print the text lines a PDF extracts to.
//!
//! The parsers match anchor lines in extracted text, so seeing that
//! text exactly is the first step when a new document template fails
//! to parse.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use deskhand_core::pdf::{PdfExtractor, PdfSource};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// PDF file to inspect
    input: PathBuf,

    /// Only print this page (1-indexed)
    #[arg(short, long)]
    page: Option<u32>,

    /// Prefix each line with its index
    #[arg(short, long)]
    line_numbers: bool,
}

pub async fn run(args: InspectArgs) -> anyhow::Result<()> {
    let data = fs::read(&args.input)?;
    let pdf = PdfExtractor::from_bytes(&data)?;

    println!(
        "{} {} ({} pages)",
        style("ℹ").blue(),
        args.input.display(),
        pdf.page_count()
    );

    let pages: Vec<(u32, Vec<String>)> = match args.page {
        Some(page) => vec![(page, pdf.page_lines(page)?)],
        None => pdf
            .all_page_lines()?
            .into_iter()
            .enumerate()
            .map(|(idx, lines)| (idx as u32 + 1, lines))
            .collect(),
    };

    for (number, lines) in pages {
        println!();
        println!("{}", style(format!("--- page {} ---", number)).bold());
        for (idx, line) in lines.iter().enumerate() {
            if args.line_numbers {
                println!("{:>4}  {}", idx, line);
            } else {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
