//! Ingredient catalog repository.
//!
//! Used by the CLI to seed the catalog. The `(name, measurement_unit)`
//! unique constraint makes repeated imports skip rows already present.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::instrument;

use super::RepositoryError;

/// Catalog row as found in the import file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewIngredient {
    /// Ingredient name.
    pub name: String,
    /// Measurement unit.
    pub measurement_unit: String,
}

/// Repository for ingredient catalog operations.
pub struct IngredientRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> IngredientRepository<'a> {
    /// Create a new ingredient repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a batch of ingredients, skipping existing `(name, unit)` pairs.
    ///
    /// Returns the number of rows actually inserted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, batch), fields(batch_size = batch.len()))]
    pub async fn insert_batch(&self, batch: &[NewIngredient]) -> Result<u64, RepositoryError> {
        if batch.is_empty() {
            return Ok(0);
        }

        let names: Vec<&str> = batch.iter().map(|i| i.name.as_str()).collect();
        let units: Vec<&str> = batch.iter().map(|i| i.measurement_unit.as_str()).collect();

        let result = sqlx::query(
            r"
            INSERT INTO foodgram.ingredient (name, measurement_unit)
            SELECT * FROM UNNEST($1::text[], $2::text[])
            ON CONFLICT (name, measurement_unit) DO NOTHING
            ",
        )
        .bind(&names)
        .bind(&units)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
