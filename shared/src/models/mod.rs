//! Domain models for the Fabric Stock Inventory system

mod category;
mod product;
mod supplier;

pub use category::*;
pub use product::*;
pub use supplier::*;
