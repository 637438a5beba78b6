//! Cafe CLI - Schema setup, seeding, and statistics.
//!
//! # Usage
//!
//! ```bash
//! # Create the cafe table if it is missing
//! cafe-cli init
//!
//! # Load cafes from a YAML file
//! cafe-cli seed crates/cli/data/cafes.yaml --skip-existing
//!
//! # Show how many cafes are listed, per location
//! cafe-cli stats
//! ```
//!
//! The database location comes from the same environment variables as the
//! server (`CAFE_DATABASE_URL`, falling back to `DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cafe-cli")]
#[command(author, version, about = "Cafe API CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the cafe table if it does not exist
    Init,
    /// Insert cafes from a YAML file
    Seed {
        /// Path to a YAML list of cafes
        file: String,

        /// Skip cafes whose name already exists instead of aborting
        #[arg(long)]
        skip_existing: bool,
    },
    /// Show cafe counts
    Stats,
}

#[tokio::main]
async fn main() {
    // Default to info so command output is visible
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::Seed {
            file,
            skip_existing,
        } => commands::seed::run(&file, skip_existing).await?,
        Commands::Stats => commands::stats::run().await?,
    }
    Ok(())
}
