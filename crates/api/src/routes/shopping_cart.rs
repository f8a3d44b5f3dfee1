//! Shopping cart route handlers.
//!
//! All handlers require an authenticated user and only touch the caller's
//! own cart. They are generic over [`Stores`] and run against Postgres in
//! production.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{info, instrument};

use foodgram_core::RecipeId;

use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::RecipeSummary;
use crate::services::shopping_list::{CONTENT_TYPE, ShoppingListExport};
use crate::services::{CartStore, RecipeStore};
use crate::state::Stores;

/// Download the aggregated shopping list as a plain-text attachment.
///
/// # Errors
///
/// Returns 500 if the cart or a recipe cannot be read.
/// Returns 409 if an ingredient name appears with different units.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn download<S: Stores>(
    State(state): State<S>,
    RequireAuth(user): RequireAuth,
) -> Result<Response> {
    let list = state.shopping_list().build(user.id).await?;
    info!(
        recipes = list.recipe_count(),
        items = list.items().len(),
        "Shopping list exported"
    );

    let export = list.export(state.shopping_list_filename());
    Ok(attachment_response(export))
}

/// Put a recipe into the caller's shopping cart.
///
/// # Errors
///
/// Returns 404 if the recipe does not exist.
/// Returns 400 if the recipe is already in the cart.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn add<S: Stores>(
    State(state): State<S>,
    RequireAuth(user): RequireAuth,
    Path(recipe_id): Path<RecipeId>,
) -> Result<(StatusCode, Json<RecipeSummary>)> {
    let recipe = find_recipe(&state, recipe_id).await?;

    state
        .cart()
        .add(user.id, recipe_id)
        .await
        .map_err(|e| cart_write_error(recipe_id, e))?;

    info!("Recipe added to shopping cart");
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Remove a recipe from the caller's shopping cart.
///
/// # Errors
///
/// Returns 404 if the recipe does not exist.
/// Returns 400 if the recipe is not in the cart.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn remove<S: Stores>(
    State(state): State<S>,
    RequireAuth(user): RequireAuth,
    Path(recipe_id): Path<RecipeId>,
) -> Result<StatusCode> {
    find_recipe(&state, recipe_id).await?;

    let removed = state
        .cart()
        .remove(user.id, recipe_id)
        .await
        .map_err(|e| cart_write_error(recipe_id, e))?;
    if !removed {
        return Err(AppError::BadRequest(
            "recipe is not in the shopping cart".to_string(),
        ));
    }

    info!("Recipe removed from shopping cart");
    Ok(StatusCode::NO_CONTENT)
}

/// Build the `200 OK` attachment response for a rendered list.
#[must_use]
pub fn attachment_response(export: ShoppingListExport) -> Response {
    let disposition = export.content_disposition();
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.body,
    )
        .into_response()
}

async fn find_recipe<S: Stores>(state: &S, recipe_id: RecipeId) -> Result<RecipeSummary> {
    state
        .recipes()
        .summary(recipe_id)
        .await?
        .ok_or_else(|| recipe_not_found(recipe_id))
}

/// Map a cart write failure to its HTTP error.
///
/// A recipe deleted between the lookup and the write surfaces as a
/// foreign-key failure, reported as not found.
fn cart_write_error(recipe_id: RecipeId, err: RepositoryError) -> AppError {
    match err {
        RepositoryError::Conflict(_) => {
            AppError::BadRequest("recipe is already in the shopping cart".to_string())
        }
        RepositoryError::NotFound => recipe_not_found(recipe_id),
        other => AppError::Database(other),
    }
}

fn recipe_not_found(recipe_id: RecipeId) -> AppError {
    AppError::NotFound(format!("recipe {recipe_id}"))
}
