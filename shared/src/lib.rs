//! Shared types and domain logic for the Fabric Stock Inventory system
//!
//! This crate contains the wire models and the pure parts of the stock
//! receipt derivation (identifier formatting, amount computation) so they
//! can be tested without a database.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
