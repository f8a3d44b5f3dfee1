//! Shopping cart repository.
//!
//! A cart entry links a user to a recipe. Entries are only ever inserted
//! or deleted; the `(user_id, recipe_id)` unique constraint guarantees a
//! recipe appears at most once per cart.

use sqlx::PgPool;
use tracing::instrument;

use foodgram_core::{RecipeId, UserId};

use super::RepositoryError;
use crate::services::CartStore;

/// Repository for shopping cart database operations.
#[derive(Clone)]
pub struct CartRepository {
    pool: PgPool,
}

impl CartRepository {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the recipes in a user's cart, ordered by recipe ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn recipe_ids(&self, user_id: UserId) -> Result<Vec<RecipeId>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, RecipeId>(
            r"
            SELECT recipe_id
            FROM foodgram.shopping_cart
            WHERE user_id = $1
            ORDER BY recipe_id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// Put a recipe into a user's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the recipe is already in the cart.
    /// Returns `RepositoryError::NotFound` if the recipe or user does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self))]
    pub async fn add(&self, user_id: UserId, recipe_id: RecipeId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO foodgram.shopping_cart (user_id, recipe_id)
            VALUES ($1, $2)
            ",
        )
        .bind(user_id)
        .bind(recipe_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return RepositoryError::Conflict("recipe already in shopping cart".to_owned());
                }
                if db_err.is_foreign_key_violation() {
                    return RepositoryError::NotFound;
                }
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    /// Remove a recipe from a user's cart.
    ///
    /// Returns `true` if an entry was deleted, `false` if the recipe was
    /// not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: UserId, recipe_id: RecipeId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM foodgram.shopping_cart
            WHERE user_id = $1 AND recipe_id = $2
            ",
        )
        .bind(user_id)
        .bind(recipe_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl CartStore for CartRepository {
    async fn recipe_ids(&self, user_id: UserId) -> Result<Vec<RecipeId>, RepositoryError> {
        Self::recipe_ids(self, user_id).await
    }

    async fn add(&self, user_id: UserId, recipe_id: RecipeId) -> Result<(), RepositoryError> {
        Self::add(self, user_id, recipe_id).await
    }

    async fn remove(&self, user_id: UserId, recipe_id: RecipeId) -> Result<bool, RepositoryError> {
        Self::remove(self, user_id, recipe_id).await
    }
}
