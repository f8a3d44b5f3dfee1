//! Business logic services for the API.
//!
//! # Services
//!
//! - `shopping_list` - Aggregate the ingredients of every recipe in a
//!   user's cart into a downloadable plain-text list
//!
//! [`ports`] holds the store traits shared by the services and the cart
//! handlers.

pub mod ports;
pub mod shopping_list;

#[cfg(test)]
pub(crate) mod in_memory;

pub use ports::{CartStore, RecipeStore};
