//! Recipe repository (read-only).
//!
//! Recipes and their ingredient lists are written by the recipe management
//! service. This repository only reads what the shopping cart needs.

use sqlx::PgPool;
use tracing::instrument;

use foodgram_core::{Amount, RecipeId};

use super::RepositoryError;
use crate::models::{IngredientLine, RecipeSummary};
use crate::services::RecipeStore;

#[derive(sqlx::FromRow)]
struct RecipeSummaryRow {
    id: RecipeId,
    name: String,
    cooking_time: i32,
}

#[derive(sqlx::FromRow)]
struct IngredientLineRow {
    name: String,
    measurement_unit: String,
    amount: Amount,
}

/// Repository for recipe database operations.
#[derive(Clone)]
pub struct RecipeRepository {
    pool: PgPool,
}

impl RecipeRepository {
    /// Create a new recipe repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the short representation of a recipe.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_summary(&self, id: RecipeId) -> Result<Option<RecipeSummary>, RepositoryError> {
        let row = sqlx::query_as::<_, RecipeSummaryRow>(
            r"
            SELECT id, name, cooking_time
            FROM foodgram.recipe
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| RecipeSummary {
            id: r.id,
            name: r.name,
            cooking_time: r.cooking_time,
        }))
    }

    /// Get the ingredient lines of a recipe, ordered by ingredient name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored amount is out of range.
    #[instrument(skip(self))]
    pub async fn ingredient_lines(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<IngredientLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, IngredientLineRow>(
            r#"
            SELECT i.name, i.measurement_unit, ri.amount
            FROM foodgram.recipe_ingredient ri
            JOIN foodgram.ingredient i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = $1
            ORDER BY i.name COLLATE "C", i.measurement_unit COLLATE "C"
            "#,
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::ColumnDecode { index, source } => RepositoryError::DataCorruption(
                format!("invalid ingredient line column {index} for recipe {recipe_id}: {source}"),
            ),
            other => RepositoryError::Database(other),
        })?;

        Ok(rows
            .into_iter()
            .map(|r| IngredientLine {
                name: r.name,
                measurement_unit: r.measurement_unit,
                amount: r.amount,
            })
            .collect())
    }
}

impl RecipeStore for RecipeRepository {
    async fn summary(&self, recipe_id: RecipeId) -> Result<Option<RecipeSummary>, RepositoryError> {
        self.get_summary(recipe_id).await
    }

    async fn ingredient_lines(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<IngredientLine>, RepositoryError> {
        Self::ingredient_lines(self, recipe_id).await
    }
}
