//! HTTP handlers for the Fabric Stock Inventory backend

mod auth;
mod category;
mod health;
mod product;
mod supplier;

pub use auth::*;
pub use category::*;
pub use health::*;
pub use product::*;
pub use supplier::*;
