//! `stockbridge-inventory` — multi-source inventory domain model.
//!
//! Pure types and computations: per-source stock assignments, the layered
//! configuration scopes (source item → source → global), and the legacy
//! stock-item mirror. Storage and services live in `stockbridge-infra`.

pub mod configuration;
pub mod legacy;
pub mod source_item;

pub use configuration::{
    Backorders, GlobalConfiguration, InventorySetting, SettingValue, SourceConfiguration,
    SourceItemConfiguration,
};
pub use legacy::{LegacyStockItem, LegacyStockUpdate};
pub use source_item::{SourceItem, SourceItemStatus};
