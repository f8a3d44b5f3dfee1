//! CLI subcommands.

pub mod import;
pub mod migrate;

use sqlx::PgPool;
use thiserror::Error;

use foodgram_api::config::{ConfigError, database_url_from_env};
use foodgram_api::db::{self, RepositoryError};

/// Errors shared by all commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Database URL is not configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Input file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not a valid catalog.
    #[error("Invalid catalog file: {0}")]
    InvalidInput(String),
}

/// Connect to the database named by the environment.
async fn connect() -> Result<PgPool, CommandError> {
    let database_url = database_url_from_env()?;
    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&database_url).await?)
}
