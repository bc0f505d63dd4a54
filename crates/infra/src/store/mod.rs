//! Inventory storage boundary.
//!
//! This module defines a relational-style abstraction over the inventory
//! tables (source items, the three configuration scopes, the legacy stock
//! table) without making any storage assumptions. Writes travel as atomic
//! batches; reads treat missing rows as absent values, not errors.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::{InMemoryInventoryStore, JournalEntry};
pub use r#trait::{InventoryStore, StoreError, WriteOp};
