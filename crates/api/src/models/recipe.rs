//! Recipe domain types.

use serde::Serialize;

use foodgram_core::{Amount, RecipeId};

/// One ingredient requirement of a recipe, flattened for aggregation.
///
/// Joins `recipe_ingredient` with `ingredient`, so the catalog entry's
/// identity is gone and only its name and unit remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    /// Ingredient name, exactly as stored in the catalog.
    pub name: String,
    /// Measurement unit (e.g. "g", "ml", "pcs").
    pub measurement_unit: String,
    /// Quantity required by the recipe.
    pub amount: Amount,
}

impl IngredientLine {
    /// Build a line from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>, amount: Amount) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            amount,
        }
    }
}

/// Short recipe representation returned by the shopping cart endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSummary {
    /// Recipe ID.
    pub id: RecipeId,
    /// Recipe name.
    pub name: String,
    /// Cooking time in minutes.
    pub cooking_time: i32,
}
