//! `stockbridge-catalog` — product identity collaborators.
//!
//! Sku ↔ legacy product id mapping, plus the platform's default
//! source/stock scope values.

pub mod defaults;
pub mod mapping;

pub use defaults::DefaultScopes;
pub use mapping::{CatalogError, InMemoryProductCatalog, ProductCatalog};
