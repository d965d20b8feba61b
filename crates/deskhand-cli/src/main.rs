//! CLI application for deskhand document processing.

mod commands;
mod workspace;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, inspect, jobs, statements, update};

/// deskhand - invoice records and purchase reports from contractor paperwork
#[derive(Parser)]
#[command(name = "deskhand")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn job order PDFs into an invoice record file
    Jobs(jobs::JobsArgs),

    /// Turn card statement PDFs into transaction report CSVs
    Statements(statements::StatementsArgs),

    /// Print the text lines extracted from a PDF
    Inspect(inspect::InspectArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Check for and download a newer release
    Update(update::UpdateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Jobs(args) => jobs::run(args, cli.config.as_deref()).await,
        Commands::Statements(args) => statements::run(args, cli.config.as_deref()).await,
        Commands::Inspect(args) => inspect::run(args).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
        Commands::Update(args) => update::run(args).await,
    }
}
