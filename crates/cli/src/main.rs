//! Foodgram CLI - Database migrations and catalog management.
//!
//! # Usage
//!
//! ```bash
//! # Apply schema and session store migrations
//! foodgram-cli migrate
//!
//! # Load the ingredient catalog (headerless CSV)
//! foodgram-cli import-ingredients data/ingredients.csv
//! ```
//!
//! # Environment Variables
//!
//! - `FOODGRAM_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::import::CatalogFormat;

#[derive(Parser)]
#[command(name = "foodgram-cli")]
#[command(author, version, about = "Foodgram CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Import the ingredient catalog
    ImportIngredients {
        /// Catalog file
        #[arg(default_value = "data/ingredients.csv")]
        file: PathBuf,

        /// File layout
        #[arg(short, long, value_enum, default_value_t = CatalogFormat::Csv)]
        format: CatalogFormat,
    },
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "foodgram_cli=info,foodgram_api=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::ImportIngredients { file, format } => {
            let summary = commands::import::ingredients(&file, format).await?;
            tracing::info!(
                inserted = summary.inserted,
                skipped = summary.skipped,
                "Ingredient import complete"
            );
        }
    }
    Ok(())
}
