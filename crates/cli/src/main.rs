//! Harborview CLI - data file management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the data file if it does not exist
//! harborview-cli store init
//!
//! # Print message and testimonial counters
//! harborview-cli store stats --data-file data/db.json
//!
//! # Load testimonials from a YAML file
//! harborview-cli seed testimonials seeds/testimonials.yaml
//! ```
//!
//! # Commands
//!
//! - `store init` - Create an empty data file
//! - `store stats` - Print inbox and rating counters as JSON
//! - `seed testimonials` - Validate and insert testimonials from YAML

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "harborview-cli")]
#[command(author, version, about = "Harborview CLI tools")]
struct Cli {
    /// Path to the JSON data file
    #[arg(long, global = true, env = "DATA_FILE", default_value = "data/db.json")]
    data_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or create the data file
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
    /// Insert records from a YAML file
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Create the data file (and parent directories) if missing
    Init,
    /// Print message and testimonial counters
    Stats,
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Seed testimonials
    Testimonials {
        /// Path to the YAML file (a list of `name`, `rating`, `message`)
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Store { action } => match action {
            StoreAction::Init => commands::store::init(&cli.data_file).await?,
            StoreAction::Stats => commands::store::stats(&cli.data_file).await?,
        },
        Commands::Seed { target } => match target {
            SeedTarget::Testimonials { file } => {
                commands::seed::testimonials(&file, &cli.data_file).await?;
            }
        },
    }
    Ok(())
}
