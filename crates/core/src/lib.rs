//! `stockbridge-core` — identifier and error primitives.
//!
//! This crate contains **pure domain** primitives (no storage concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{ProductId, Sku, SourceCode, StockId};
