//! Database operations for the Foodgram `PostgreSQL` database.
//!
//! # Schema: `foodgram`
//!
//! Recipes, ingredients and users are owned by the recipe management
//! service; this crate reads them and owns only the shopping cart.
//!
//! ## Tables
//!
//! - `users` - Registered users (read-only here)
//! - `ingredient` - Ingredient catalog, unique per `(name, measurement_unit)`
//! - `recipe` - Recipes (read-only here)
//! - `recipe_ingredient` - Amount of each ingredient per recipe
//! - `shopping_cart` - Recipes a user plans to shop for, unique per `(user_id, recipe_id)`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p foodgram-cli -- migrate
//! ```

pub mod cart;
pub mod ingredients;
pub mod recipes;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use cart::CartRepository;
pub use ingredients::{IngredientRepository, NewIngredient};
pub use recipes::RecipeRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., recipe already in cart).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
