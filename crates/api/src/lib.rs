//! Foodgram API library.
//!
//! Shopping cart management and the downloadable shopping list, exposed as a
//! library so the CLI and tests can reuse the database layer and router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
