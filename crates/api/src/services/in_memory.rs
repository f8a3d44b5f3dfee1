//! In-memory stores for tests.
//!
//! Clones share the same data, so a test can hand one clone to a router
//! and inspect the cart through another.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use foodgram_core::{RecipeId, UserId};

use super::ports::{CartStore, RecipeStore};
use crate::db::RepositoryError;
use crate::models::{IngredientLine, RecipeSummary};
use crate::state::Stores;

#[derive(Default)]
struct Data {
    recipes: HashMap<RecipeId, (RecipeSummary, Vec<IngredientLine>)>,
    carts: HashMap<UserId, Vec<RecipeId>>,
    failing_cart: bool,
    failing_recipe: Option<RecipeId>,
    lookups: Vec<RecipeId>,
}

#[derive(Clone, Default)]
pub struct InMemoryStores {
    data: Arc<Mutex<Data>>,
}

fn unavailable() -> RepositoryError {
    RepositoryError::Database(sqlx::Error::PoolTimedOut)
}

impl InMemoryStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipe(self, id: RecipeId, name: &str, lines: Vec<IngredientLine>) -> Self {
        let summary = RecipeSummary {
            id,
            name: name.to_string(),
            cooking_time: 30,
        };
        self.data
            .lock()
            .unwrap()
            .recipes
            .insert(id, (summary, lines));
        self
    }

    /// Set a cart verbatim, duplicates and order included.
    pub fn with_cart(self, user_id: UserId, recipe_ids: Vec<RecipeId>) -> Self {
        self.data.lock().unwrap().carts.insert(user_id, recipe_ids);
        self
    }

    pub fn failing_cart(self) -> Self {
        self.data.lock().unwrap().failing_cart = true;
        self
    }

    pub fn failing_recipe(self, id: RecipeId) -> Self {
        self.data.lock().unwrap().failing_recipe = Some(id);
        self
    }

    pub fn cart_of(&self, user_id: UserId) -> Vec<RecipeId> {
        self.data
            .lock()
            .unwrap()
            .carts
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Recipes whose ingredient lines were fetched, in call order.
    pub fn lookups(&self) -> Vec<RecipeId> {
        self.data.lock().unwrap().lookups.clone()
    }
}

impl CartStore for InMemoryStores {
    async fn recipe_ids(&self, user_id: UserId) -> Result<Vec<RecipeId>, RepositoryError> {
        let data = self.data.lock().unwrap();
        if data.failing_cart {
            return Err(unavailable());
        }
        Ok(data.carts.get(&user_id).cloned().unwrap_or_default())
    }

    async fn add(&self, user_id: UserId, recipe_id: RecipeId) -> Result<(), RepositoryError> {
        let mut data = self.data.lock().unwrap();
        if data.failing_cart {
            return Err(unavailable());
        }
        if !data.recipes.contains_key(&recipe_id) {
            return Err(RepositoryError::NotFound);
        }
        let cart = data.carts.entry(user_id).or_default();
        if cart.contains(&recipe_id) {
            return Err(RepositoryError::Conflict(
                "recipe already in shopping cart".to_string(),
            ));
        }
        cart.push(recipe_id);
        Ok(())
    }

    async fn remove(&self, user_id: UserId, recipe_id: RecipeId) -> Result<bool, RepositoryError> {
        let mut data = self.data.lock().unwrap();
        if data.failing_cart {
            return Err(unavailable());
        }
        let Some(cart) = data.carts.get_mut(&user_id) else {
            return Ok(false);
        };
        let before = cart.len();
        cart.retain(|id| *id != recipe_id);
        Ok(cart.len() < before)
    }
}

impl RecipeStore for InMemoryStores {
    async fn summary(&self, recipe_id: RecipeId) -> Result<Option<RecipeSummary>, RepositoryError> {
        let data = self.data.lock().unwrap();
        Ok(data.recipes.get(&recipe_id).map(|(summary, _)| summary.clone()))
    }

    async fn ingredient_lines(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<IngredientLine>, RepositoryError> {
        let mut data = self.data.lock().unwrap();
        data.lookups.push(recipe_id);
        if data.failing_recipe == Some(recipe_id) {
            return Err(unavailable());
        }
        Ok(data
            .recipes
            .get(&recipe_id)
            .map(|(_, lines)| lines.clone())
            .unwrap_or_default())
    }
}

impl Stores for InMemoryStores {
    type Cart = Self;
    type Recipes = Self;

    fn cart(&self) -> Self {
        self.clone()
    }

    fn recipes(&self) -> Self {
        self.clone()
    }

    fn shopping_list_filename(&self) -> &str {
        "shopping_list"
    }
}
