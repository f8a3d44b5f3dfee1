//! Storage seams consumed by the services and cart handlers.
//!
//! The Postgres repositories in [`crate::db`] implement these; tests use
//! an in-memory store.

use std::future::Future;

use foodgram_core::{RecipeId, UserId};

use crate::db::RepositoryError;
use crate::models::{IngredientLine, RecipeSummary};

/// Access to users' shopping carts.
pub trait CartStore: Send + Sync {
    /// Recipes currently in the user's cart. Order is not significant.
    fn recipe_ids(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<RecipeId>, RepositoryError>> + Send;

    /// Put a recipe into the user's cart.
    ///
    /// Fails with `RepositoryError::Conflict` if it is already there and
    /// `RepositoryError::NotFound` if the recipe does not exist.
    fn add(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Take a recipe out of the user's cart. `false` if it was not there.
    fn remove(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Read access to recipes.
pub trait RecipeStore: Send + Sync {
    /// Short view of a recipe, `None` if it does not exist.
    fn summary(
        &self,
        recipe_id: RecipeId,
    ) -> impl Future<Output = Result<Option<RecipeSummary>, RepositoryError>> + Send;

    /// Ingredient lines of a recipe, ordered by ingredient name.
    fn ingredient_lines(
        &self,
        recipe_id: RecipeId,
    ) -> impl Future<Output = Result<Vec<IngredientLine>, RepositoryError>> + Send;
}
