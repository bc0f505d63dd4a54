use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockbridge_core::{ProductId, Sku, SourceCode, StockId};
use stockbridge_inventory::{
    GlobalConfiguration, LegacyStockItem, LegacyStockUpdate, SourceConfiguration, SourceItem,
    SourceItemConfiguration,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The write batch failed validation; nothing was applied.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The storage layer rejected a read or write.
    #[error("save failed: {0}")]
    Save(String),
}

/// One write against the inventory tables.
///
/// Writes are only ever submitted as a batch through
/// [`InventoryStore::apply`]; a batch commits atomically or not at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WriteOp {
    /// Upsert a stock assignment row keyed by (sku, source_code).
    UpsertSourceItem(SourceItem),

    /// Upsert a source-item configuration row keyed by (sku, source_code).
    UpsertSourceItemConfig {
        sku: Sku,
        source_code: SourceCode,
        configuration: SourceItemConfiguration,
    },

    /// Upsert the per-source defaults row keyed by source_code.
    UpsertSourceConfig {
        source_code: SourceCode,
        configuration: SourceConfiguration,
    },

    /// Replace the global fallback configuration.
    SetGlobalConfig(GlobalConfiguration),

    /// Overwrite the mirrored columns of the legacy stock row matching
    /// (stock_id, product_id). Matching zero rows is a valid outcome;
    /// legacy row creation belongs to the host.
    UpdateLegacyStockItem {
        stock_id: StockId,
        product_id: ProductId,
        update: LegacyStockUpdate,
    },
}

/// Relational-style inventory store.
///
/// Missing rows read as `None`/empty, never as errors. `apply` validates
/// the whole batch before touching any table and commits all-or-nothing;
/// concurrent writers race with last-writer-wins upsert semantics.
pub trait InventoryStore: Send + Sync {
    /// All stock assignment rows for one sku, possibly empty.
    fn source_items_by_sku(&self, sku: &Sku) -> Result<Vec<SourceItem>, StoreError>;

    fn source_item_config(
        &self,
        sku: &Sku,
        source_code: &SourceCode,
    ) -> Result<Option<SourceItemConfiguration>, StoreError>;

    fn source_config(
        &self,
        source_code: &SourceCode,
    ) -> Result<Option<SourceConfiguration>, StoreError>;

    fn global_config(&self) -> Result<GlobalConfiguration, StoreError>;

    fn legacy_stock_item(
        &self,
        stock_id: StockId,
        product_id: ProductId,
    ) -> Result<Option<LegacyStockItem>, StoreError>;

    /// Apply a write batch atomically. An empty batch is a no-op.
    fn apply(&self, batch: Vec<WriteOp>) -> Result<(), StoreError>;
}

impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    fn source_items_by_sku(&self, sku: &Sku) -> Result<Vec<SourceItem>, StoreError> {
        (**self).source_items_by_sku(sku)
    }

    fn source_item_config(
        &self,
        sku: &Sku,
        source_code: &SourceCode,
    ) -> Result<Option<SourceItemConfiguration>, StoreError> {
        (**self).source_item_config(sku, source_code)
    }

    fn source_config(
        &self,
        source_code: &SourceCode,
    ) -> Result<Option<SourceConfiguration>, StoreError> {
        (**self).source_config(source_code)
    }

    fn global_config(&self) -> Result<GlobalConfiguration, StoreError> {
        (**self).global_config()
    }

    fn legacy_stock_item(
        &self,
        stock_id: StockId,
        product_id: ProductId,
    ) -> Result<Option<LegacyStockItem>, StoreError> {
        (**self).legacy_stock_item(stock_id, product_id)
    }

    fn apply(&self, batch: Vec<WriteOp>) -> Result<(), StoreError> {
        (**self).apply(batch)
    }
}
