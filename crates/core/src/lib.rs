//! Foodgram Core - Shared types library.
//!
//! This crate provides common types used across all Foodgram components:
//! - `api` - HTTP backend (shopping cart and shopping list export)
//! - `cli` - Command-line tools for migrations and catalog import
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and ingredient amounts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
