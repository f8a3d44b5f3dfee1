//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                  - Liveness check
//! GET    /health/ready                            - Readiness check (database)
//!
//! # Shopping cart (requires auth)
//! GET    /api/recipes/download_shopping_cart/     - Download aggregated shopping list
//! POST   /api/recipes/{id}/shopping_cart/         - Add recipe to cart
//! DELETE /api/recipes/{id}/shopping_cart/         - Remove recipe from cart
//! ```

pub mod health;
pub mod shopping_cart;

use axum::{Router, routing::get};

use crate::state::{AppState, Stores};

/// Create the recipe routes router over any store backend.
pub fn recipe_routes<S: Stores>() -> Router<S> {
    Router::new()
        .route(
            "/download_shopping_cart/",
            get(shopping_cart::download::<S>),
        )
        .route(
            "/{id}/shopping_cart/",
            axum::routing::post(shopping_cart::add::<S>).delete(shopping_cart::remove::<S>),
        )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/recipes", recipe_routes::<AppState>())
}
