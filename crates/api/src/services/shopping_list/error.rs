//! Shopping list error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur while building a shopping list.
#[derive(Debug, Error)]
pub enum ShoppingListError {
    /// Cart or recipe lookup failed.
    #[error("store error: {0}")]
    Store(#[from] RepositoryError),

    /// Two recipes list the same ingredient name with different units.
    ///
    /// Amounts in different units cannot be summed, so the list is not built.
    #[error("ingredient \"{name}\" is measured in both \"{first_unit}\" and \"{second_unit}\"")]
    UnitConflict {
        /// Ingredient name shared by the conflicting lines.
        name: String,
        /// Unit of the line seen first.
        first_unit: String,
        /// Unit of the conflicting line.
        second_unit: String,
    },
}
