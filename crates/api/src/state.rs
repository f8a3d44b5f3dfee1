//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::db::{CartRepository, RecipeRepository};
use crate::services::shopping_list::ShoppingListService;
use crate::services::{CartStore, RecipeStore};

/// Stores reachable from the cart handlers.
///
/// [`AppState`] hands out Postgres repositories; tests plug in memory.
pub trait Stores: Clone + Send + Sync + 'static {
    /// Cart store type.
    type Cart: CartStore;
    /// Recipe store type.
    type Recipes: RecipeStore;

    /// Cart store for one request.
    fn cart(&self) -> Self::Cart;

    /// Recipe store for one request.
    fn recipes(&self) -> Self::Recipes;

    /// File stem of the downloaded shopping list.
    fn shopping_list_filename(&self) -> &str;

    /// Shopping list service over this state's stores.
    fn shopping_list(&self) -> ShoppingListService<Self::Cart, Self::Recipes> {
        ShoppingListService::new(self.cart(), self.recipes())
    }
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pool }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }
}

impl Stores for AppState {
    type Cart = CartRepository;
    type Recipes = RecipeRepository;

    fn cart(&self) -> CartRepository {
        CartRepository::new(self.pool().clone())
    }

    fn recipes(&self) -> RecipeRepository {
        RecipeRepository::new(self.pool().clone())
    }

    fn shopping_list_filename(&self) -> &str {
        &self.config().shopping_list_filename
    }
}
