//! Domain models for the API.
//!
//! These types represent validated domain objects separate from database
//! row types. Row structs live next to their queries in [`crate::db`].

pub mod recipe;
pub mod session;

pub use recipe::{IngredientLine, RecipeSummary};
pub use session::{CurrentUser, keys as session_keys};
