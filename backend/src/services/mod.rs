//! Business logic services for the Fabric Stock Inventory backend

pub mod auth;
pub mod category;
pub mod product;
pub mod sequence;
pub mod supplier;

pub use auth::AuthService;
pub use category::CategoryService;
pub use product::ProductService;
pub use sequence::SequenceService;
pub use supplier::SupplierService;
