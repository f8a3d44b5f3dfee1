//! Database migration command.
//!
//! Applies the embedded schema migrations from `crates/api/migrations/`,
//! then creates the session store table used by tower-sessions.

use foodgram_api::db::MIGRATOR;
use foodgram_api::middleware::migrate_session_store;

use super::{CommandError, connect};

/// Run all database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the connection or any migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running schema migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Running session store migrations...");
    migrate_session_store(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
