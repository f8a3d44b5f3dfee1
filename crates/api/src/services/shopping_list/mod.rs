//! Shopping list service.
//!
//! Builds the downloadable shopping list for a user:
//! fetch cart → expand recipes → aggregate → render.
//!
//! The service only reads. Two calls with no cart change in between
//! produce byte-identical output: recipes are visited in ascending ID order
//! and items are rendered in ascending name order, whatever order the
//! stores return.

mod error;
mod report;

pub use error::ShoppingListError;
pub use report::{
    Aggregator, CONTENT_TYPE, HEADER_LABEL, ShoppingList, ShoppingListExport, ShoppingListItem,
};

use tracing::{debug, instrument};

use foodgram_core::UserId;

use crate::services::{CartStore, RecipeStore};

/// Shopping list service.
///
/// Generic over its stores so the aggregation can run against Postgres in
/// production and in-memory data in tests.
pub struct ShoppingListService<C, R> {
    cart: C,
    recipes: R,
}

impl<C, R> ShoppingListService<C, R>
where
    C: CartStore,
    R: RecipeStore,
{
    /// Create a new shopping list service.
    #[must_use]
    pub const fn new(cart: C, recipes: R) -> Self {
        Self { cart, recipes }
    }

    /// Build the aggregated shopping list for a user.
    ///
    /// An empty cart yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns `ShoppingListError::Store` if any lookup fails; nothing is
    /// rendered in that case.
    /// Returns `ShoppingListError::UnitConflict` if one ingredient name is
    /// listed with different measurement units.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn build(&self, user_id: UserId) -> Result<ShoppingList, ShoppingListError> {
        let mut recipe_ids = self.cart.recipe_ids(user_id).await?;
        recipe_ids.sort_unstable();
        recipe_ids.dedup();

        let mut aggregator = Aggregator::new();
        for recipe_id in recipe_ids {
            let lines = self.recipes.ingredient_lines(recipe_id).await?;
            aggregator.add_recipe(&lines)?;
        }

        let list = aggregator.finish();
        debug!(
            recipes = list.recipe_count(),
            items = list.items().len(),
            "Built shopping list"
        );
        Ok(list)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use foodgram_core::{Amount, RecipeId};

    use super::*;
    use crate::db::RepositoryError;
    use crate::models::IngredientLine;
    use crate::services::in_memory::InMemoryStores;

    fn line(name: &str, unit: &str, amount: i64) -> IngredientLine {
        IngredientLine::new(name, unit, Amount::new(amount).unwrap())
    }

    const USER: UserId = UserId::new(1);
    const RECIPE_A: RecipeId = RecipeId::new(10);
    const RECIPE_B: RecipeId = RecipeId::new(20);

    fn pancake_stores() -> InMemoryStores {
        InMemoryStores::new()
            .with_recipe(
                RECIPE_A,
                "Pancakes",
                vec![line("Egg", "pcs", 2), line("Flour", "g", 200)],
            )
            .with_recipe(
                RECIPE_B,
                "Crepes",
                vec![line("Flour", "g", 100), line("Milk", "ml", 50)],
            )
            // Store order is deliberately not ID order.
            .with_cart(USER, vec![RECIPE_B, RECIPE_A])
    }

    fn service(stores: &InMemoryStores) -> ShoppingListService<InMemoryStores, InMemoryStores> {
        ShoppingListService::new(stores.clone(), stores.clone())
    }

    #[tokio::test]
    async fn test_build_merges_shared_ingredients() {
        let stores = pancake_stores();

        let list = service(&stores).build(USER).await.unwrap();

        assert_eq!(
            list.render(),
            "Отобрано рецептов: 2\nEgg (pcs) — 2\nFlour (g) — 300\nMilk (ml) — 50\n"
        );
    }

    #[tokio::test]
    async fn test_build_is_idempotent() {
        let stores = pancake_stores();
        let service = service(&stores);

        let first = service.build(USER).await.unwrap().render();
        let second = service.build(USER).await.unwrap().render();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_build_empty_cart() {
        let stores = InMemoryStores::new();

        let list = service(&stores).build(USER).await.unwrap();

        assert_eq!(list.recipe_count(), 0);
        assert!(list.items().is_empty());
        assert_eq!(list.render(), "Отобрано рецептов: 0\n");
    }

    #[tokio::test]
    async fn test_build_visits_each_recipe_once_in_id_order() {
        let stores = pancake_stores().with_cart(USER, vec![RECIPE_B, RECIPE_A, RECIPE_B]);

        let list = service(&stores).build(USER).await.unwrap();

        assert_eq!(list.recipe_count(), 2);
        assert_eq!(stores.lookups(), vec![RECIPE_A, RECIPE_B]);
        let flour = list.items().iter().find(|i| i.name == "Flour").unwrap();
        assert_eq!(flour.total, 300);
    }

    #[tokio::test]
    async fn test_build_only_reads_own_cart() {
        let other = UserId::new(2);
        let stores = pancake_stores().with_cart(other, vec![RECIPE_A]);

        let list = service(&stores).build(other).await.unwrap();

        assert_eq!(list.recipe_count(), 1);
        assert_eq!(
            list.render(),
            "Отобрано рецептов: 1\nEgg (pcs) — 2\nFlour (g) — 200\n"
        );
    }

    #[tokio::test]
    async fn test_build_fails_on_cart_error() {
        let stores = pancake_stores().failing_cart();

        let err = service(&stores).build(USER).await.unwrap_err();
        assert!(matches!(err, ShoppingListError::Store(_)));
    }

    #[tokio::test]
    async fn test_build_fails_whole_request_on_recipe_error() {
        let stores = pancake_stores().failing_recipe(RECIPE_B);

        let err = service(&stores).build(USER).await.unwrap_err();
        assert!(matches!(
            err,
            ShoppingListError::Store(RepositoryError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_build_rejects_unit_conflict() {
        let stores = pancake_stores().with_recipe(RECIPE_B, "Crepes", vec![line("Flour", "cup", 1)]);

        let err = service(&stores).build(USER).await.unwrap_err();
        assert!(matches!(err, ShoppingListError::UnitConflict { .. }));
    }
}
