use std::collections::{BTreeMap, HashSet};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockbridge_core::{ProductId, Sku, SourceCode, StockId};
use stockbridge_inventory::{
    GlobalConfiguration, LegacyStockItem, SourceConfiguration, SourceItem,
    SourceItemConfiguration,
};

use super::r#trait::{InventoryStore, StoreError, WriteOp};

/// One committed write batch.
///
/// The journal is ordered and append-only; replaying it against an empty
/// store reproduces the table state. This stands in for multi-statement
/// transactions on storage that cannot provide them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub entry_id: Uuid,
    pub sequence: u64,
    pub committed_at: DateTime<Utc>,
    pub ops: Vec<WriteOp>,
}

#[derive(Debug, Default)]
struct Tables {
    sources: HashSet<SourceCode>,
    source_items: BTreeMap<(Sku, SourceCode), SourceItem>,
    source_item_configs: BTreeMap<(Sku, SourceCode), SourceItemConfiguration>,
    source_configs: BTreeMap<SourceCode, SourceConfiguration>,
    global_config: GlobalConfiguration,
    legacy_stock_items: BTreeMap<(StockId, ProductId), LegacyStockItem>,
    journal: Vec<JournalEntry>,
}

/// In-memory inventory store.
///
/// Intended for tests/dev. Writers serialize on one lock, so a batch is
/// atomic and concurrent upserts are last-writer-wins.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that knows the given source codes.
    pub fn with_sources<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = SourceCode>,
    {
        let store = Self::new();
        if let Ok(mut tables) = store.tables.write() {
            tables.sources.extend(sources);
        }
        store
    }

    /// Register one source code.
    pub fn add_source(&self, source_code: SourceCode) {
        if let Ok(mut tables) = self.tables.write() {
            tables.sources.insert(source_code);
        }
    }

    /// Seed a legacy stock row. The host creates these when products are
    /// created; our write path only ever updates them.
    pub fn seed_legacy_stock_item(&self, row: LegacyStockItem) {
        if let Ok(mut tables) = self.tables.write() {
            tables
                .legacy_stock_items
                .insert((row.stock_id, row.product_id), row);
        }
    }

    /// Seed a stock assignment row without batch validation (fixtures).
    pub fn seed_source_item(&self, item: SourceItem) {
        if let Ok(mut tables) = self.tables.write() {
            tables
                .source_items
                .insert((item.sku.clone(), item.source_code.clone()), item);
        }
    }

    /// Snapshot of the committed write journal, in commit order.
    pub fn journal(&self) -> Vec<JournalEntry> {
        match self.tables.read() {
            Ok(tables) => tables.journal.clone(),
            Err(_) => vec![],
        }
    }

    /// Rebuild a store by replaying a journal against the given sources.
    ///
    /// Entries must be in their original commit order. The rebuilt store
    /// starts a fresh journal of its own.
    pub fn replay<I>(sources: I, entries: &[JournalEntry]) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = SourceCode>,
    {
        let store = Self::with_sources(sources);
        for entry in entries {
            store.apply(entry.ops.clone())?;
        }
        Ok(store)
    }

    fn validate(tables: &Tables, batch: &[WriteOp]) -> Result<(), StoreError> {
        for op in batch {
            match op {
                WriteOp::UpsertSourceItem(item) => {
                    item.validate()
                        .map_err(|e| StoreError::Validation(e.to_string()))?;
                    if !tables.sources.contains(&item.source_code) {
                        return Err(StoreError::Validation(format!(
                            "unknown source code: {}",
                            item.source_code
                        )));
                    }
                }
                WriteOp::UpsertSourceItemConfig {
                    sku,
                    source_code,
                    configuration,
                } => {
                    if !tables.sources.contains(source_code) {
                        return Err(StoreError::Validation(format!(
                            "unknown source code: {source_code}"
                        )));
                    }
                    Self::validate_notify_qty(configuration.notify_stock_qty, sku.as_str())?;
                }
                WriteOp::UpsertSourceConfig {
                    source_code,
                    configuration,
                } => {
                    if !tables.sources.contains(source_code) {
                        return Err(StoreError::Validation(format!(
                            "unknown source code: {source_code}"
                        )));
                    }
                    Self::validate_notify_qty(
                        configuration.notify_stock_qty,
                        source_code.as_str(),
                    )?;
                }
                WriteOp::SetGlobalConfig(configuration) => {
                    Self::validate_notify_qty(Some(configuration.notify_stock_qty), "global")?;
                }
                WriteOp::UpdateLegacyStockItem {
                    product_id, update, ..
                } => {
                    if update.use_config_backorders && update.backorders.is_some() {
                        return Err(StoreError::Validation(format!(
                            "legacy backorders for product {product_id} must be unset when use_config_backorders is set"
                        )));
                    }
                    if update.use_config_notify_stock_qty && update.notify_stock_qty.is_some() {
                        return Err(StoreError::Validation(format!(
                            "legacy notify_stock_qty for product {product_id} must be unset when use_config_notify_stock_qty is set"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn validate_notify_qty(qty: Option<f64>, scope: &str) -> Result<(), StoreError> {
        if let Some(qty) = qty {
            if !qty.is_finite() || qty < 0.0 {
                return Err(StoreError::Validation(format!(
                    "notify_stock_qty for '{scope}' must be a non-negative number, got {qty}"
                )));
            }
        }
        Ok(())
    }
}

impl InventoryStore for InMemoryInventoryStore {
    fn source_items_by_sku(&self, sku: &Sku) -> Result<Vec<SourceItem>, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::Save("lock poisoned".to_string()))?;

        Ok(tables
            .source_items
            .iter()
            .filter(|((item_sku, _), _)| item_sku == sku)
            .map(|(_, item)| item.clone())
            .collect())
    }

    fn source_item_config(
        &self,
        sku: &Sku,
        source_code: &SourceCode,
    ) -> Result<Option<SourceItemConfiguration>, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::Save("lock poisoned".to_string()))?;

        Ok(tables
            .source_item_configs
            .get(&(sku.clone(), source_code.clone()))
            .copied())
    }

    fn source_config(
        &self,
        source_code: &SourceCode,
    ) -> Result<Option<SourceConfiguration>, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::Save("lock poisoned".to_string()))?;

        Ok(tables.source_configs.get(source_code).copied())
    }

    fn global_config(&self) -> Result<GlobalConfiguration, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::Save("lock poisoned".to_string()))?;

        Ok(tables.global_config)
    }

    fn legacy_stock_item(
        &self,
        stock_id: StockId,
        product_id: ProductId,
    ) -> Result<Option<LegacyStockItem>, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::Save("lock poisoned".to_string()))?;

        Ok(tables
            .legacy_stock_items
            .get(&(stock_id, product_id))
            .cloned())
    }

    fn apply(&self, batch: Vec<WriteOp>) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut tables = self
            .tables
            .write()
            .map_err(|_| StoreError::Save("lock poisoned".to_string()))?;

        // Whole-batch validation before any mutation.
        Self::validate(&tables, &batch)?;

        for op in &batch {
            match op {
                WriteOp::UpsertSourceItem(item) => {
                    tables
                        .source_items
                        .insert((item.sku.clone(), item.source_code.clone()), item.clone());
                }
                WriteOp::UpsertSourceItemConfig {
                    sku,
                    source_code,
                    configuration,
                } => {
                    tables
                        .source_item_configs
                        .insert((sku.clone(), source_code.clone()), *configuration);
                }
                WriteOp::UpsertSourceConfig {
                    source_code,
                    configuration,
                } => {
                    tables
                        .source_configs
                        .insert(source_code.clone(), *configuration);
                }
                WriteOp::SetGlobalConfig(configuration) => {
                    tables.global_config = *configuration;
                }
                WriteOp::UpdateLegacyStockItem {
                    stock_id,
                    product_id,
                    update,
                } => {
                    // Predicate update: zero matched rows is a valid outcome.
                    if let Some(row) = tables.legacy_stock_items.get_mut(&(*stock_id, *product_id))
                    {
                        update.apply_to(row);
                    }
                }
            }
        }

        let sequence = tables.journal.last().map(|e| e.sequence).unwrap_or(0) + 1;
        let op_count = batch.len();
        tables.journal.push(JournalEntry {
            entry_id: Uuid::now_v7(),
            sequence,
            committed_at: Utc::now(),
            ops: batch,
        });
        tracing::trace!(sequence, op_count, "committed write batch");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockbridge_inventory::{Backorders, LegacyStockUpdate, SourceItemStatus};

    fn sku(value: &str) -> Sku {
        Sku::new(value).unwrap()
    }

    fn source(value: &str) -> SourceCode {
        SourceCode::new(value).unwrap()
    }

    fn store_with(sources: &[&str]) -> InMemoryInventoryStore {
        InMemoryInventoryStore::with_sources(sources.iter().map(|s| source(s)))
    }

    #[test]
    fn apply_rejects_unknown_source_code() {
        let store = store_with(&["east"]);

        let err = store
            .apply(vec![WriteOp::UpsertSourceItemConfig {
                sku: sku("SKU-1"),
                source_code: source("west"),
                configuration: SourceItemConfiguration::default(),
            }])
            .unwrap_err();

        match err {
            StoreError::Validation(msg) => assert!(msg.contains("west")),
            _ => panic!("Expected Validation error for unknown source"),
        }
    }

    #[test]
    fn failed_batch_applies_nothing() {
        let store = store_with(&["east"]);

        let err = store
            .apply(vec![
                WriteOp::UpsertSourceItemConfig {
                    sku: sku("SKU-1"),
                    source_code: source("east"),
                    configuration: SourceItemConfiguration {
                        backorders: Some(Backorders::AllowBelowZero),
                        notify_stock_qty: None,
                    },
                },
                WriteOp::UpsertSourceItemConfig {
                    sku: sku("SKU-1"),
                    source_code: source("east"),
                    configuration: SourceItemConfiguration {
                        backorders: None,
                        notify_stock_qty: Some(-1.0),
                    },
                },
            ])
            .unwrap_err();

        match err {
            StoreError::Validation(_) => {}
            _ => panic!("Expected Validation error for negative notify qty"),
        }

        // The valid first op must not have been applied.
        assert!(store
            .source_item_config(&sku("SKU-1"), &source("east"))
            .unwrap()
            .is_none());
        assert!(store.journal().is_empty());
    }

    #[test]
    fn legacy_update_on_missing_row_matches_zero_rows() {
        let store = store_with(&["east"]);

        store
            .apply(vec![WriteOp::UpdateLegacyStockItem {
                stock_id: StockId(1),
                product_id: ProductId(7),
                update: LegacyStockUpdate::mirror(&SourceItemConfiguration::default()),
            }])
            .unwrap();

        assert!(store
            .legacy_stock_item(StockId(1), ProductId(7))
            .unwrap()
            .is_none());
    }

    #[test]
    fn legacy_update_overwrites_existing_row() {
        let store = store_with(&["east"]);
        store.seed_legacy_stock_item(LegacyStockItem::inheriting(ProductId(7), StockId(1)));

        store
            .apply(vec![WriteOp::UpdateLegacyStockItem {
                stock_id: StockId(1),
                product_id: ProductId(7),
                update: LegacyStockUpdate::mirror(&SourceItemConfiguration {
                    backorders: Some(Backorders::AllowBelowZeroNotify),
                    notify_stock_qty: Some(3.0),
                }),
            }])
            .unwrap();

        let row = store
            .legacy_stock_item(StockId(1), ProductId(7))
            .unwrap()
            .unwrap();
        assert_eq!(row.backorders, Some(Backorders::AllowBelowZeroNotify));
        assert!(!row.use_config_backorders);
        assert_eq!(row.notify_stock_qty, Some(3.0));
        assert!(!row.use_config_notify_stock_qty);
    }

    #[test]
    fn apply_rejects_inconsistent_legacy_flags() {
        let store = store_with(&["east"]);

        let err = store
            .apply(vec![WriteOp::UpdateLegacyStockItem {
                stock_id: StockId(1),
                product_id: ProductId(7),
                update: LegacyStockUpdate {
                    backorders: Some(Backorders::Disabled),
                    use_config_backorders: true,
                    notify_stock_qty: None,
                    use_config_notify_stock_qty: true,
                },
            }])
            .unwrap_err();

        match err {
            StoreError::Validation(msg) => assert!(msg.contains("use_config_backorders")),
            _ => panic!("Expected Validation error for inconsistent flags"),
        }
    }

    #[test]
    fn empty_batch_is_a_no_op_and_not_journaled() {
        let store = store_with(&["east"]);

        store.apply(vec![]).unwrap();

        assert!(store.journal().is_empty());
    }

    #[test]
    fn journal_sequence_is_monotonic() {
        let store = store_with(&["east"]);

        for qty in [1.0, 2.0, 3.0] {
            store
                .apply(vec![WriteOp::UpsertSourceItem(
                    SourceItem::new(sku("SKU-1"), source("east"), qty, SourceItemStatus::InStock)
                        .unwrap(),
                )])
                .unwrap();
        }

        let sequences: Vec<u64> = store.journal().iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
    }

    #[test]
    fn replaying_the_journal_rebuilds_table_state() {
        let store = store_with(&["east", "west"]);

        store
            .apply(vec![
                WriteOp::UpsertSourceItem(
                    SourceItem::new(sku("SKU-1"), source("east"), 5.0, SourceItemStatus::InStock)
                        .unwrap(),
                ),
                WriteOp::UpsertSourceItemConfig {
                    sku: sku("SKU-1"),
                    source_code: source("east"),
                    configuration: SourceItemConfiguration {
                        backorders: Some(Backorders::AllowBelowZero),
                        notify_stock_qty: None,
                    },
                },
            ])
            .unwrap();
        store
            .apply(vec![WriteOp::SetGlobalConfig(GlobalConfiguration {
                backorders: Backorders::AllowBelowZeroNotify,
                notify_stock_qty: 2.0,
            })])
            .unwrap();

        let rebuilt = InMemoryInventoryStore::replay(
            [source("east"), source("west")],
            &store.journal(),
        )
        .unwrap();

        assert_eq!(
            rebuilt.source_items_by_sku(&sku("SKU-1")).unwrap(),
            store.source_items_by_sku(&sku("SKU-1")).unwrap()
        );
        assert_eq!(
            rebuilt
                .source_item_config(&sku("SKU-1"), &source("east"))
                .unwrap(),
            store
                .source_item_config(&sku("SKU-1"), &source("east"))
                .unwrap()
        );
        assert_eq!(rebuilt.global_config().unwrap(), store.global_config().unwrap());
    }

    #[test]
    fn upsert_overwrites_by_key() {
        let store = store_with(&["east"]);

        for qty in [5.0, 9.0] {
            store
                .apply(vec![WriteOp::UpsertSourceItem(
                    SourceItem::new(sku("SKU-1"), source("east"), qty, SourceItemStatus::InStock)
                        .unwrap(),
                )])
                .unwrap();
        }

        let items = store.source_items_by_sku(&sku("SKU-1")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 9.0);
    }
}
