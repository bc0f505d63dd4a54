//! Configuration save paths with legacy stock synchronization.

use thiserror::Error;
use tracing::instrument;

use stockbridge_catalog::{CatalogError, DefaultScopes, ProductCatalog};
use stockbridge_core::{ProductId, Sku, SourceCode};
use stockbridge_inventory::{
    GlobalConfiguration, LegacyStockUpdate, SourceConfiguration, SourceItemConfiguration,
};

use crate::store::{InventoryStore, StoreError, WriteOp};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyncError {
    /// The sku has no product id mapping; nothing was written.
    #[error("no such entity: {0}")]
    NotFound(String),

    /// The batch failed validation; nothing was written.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The storage layer rejected the batch.
    #[error("save failed: {0}")]
    Save(String),
}

fn store_err(err: StoreError) -> SyncError {
    match err {
        StoreError::Validation(msg) => SyncError::Validation(msg),
        StoreError::Save(msg) => SyncError::Save(msg),
    }
}

fn catalog_err(err: CatalogError) -> SyncError {
    match err {
        CatalogError::SkuNotFound(sku) => SyncError::NotFound(format!("sku '{sku}'")),
        CatalogError::ProductIdNotFound(id) => SyncError::NotFound(format!("product id {id}")),
        CatalogError::Unavailable(msg) => SyncError::Save(msg),
    }
}

/// Saves configuration scopes and keeps the legacy stock row consistent.
///
/// Only the default source is mirrored: the legacy model has no
/// per-source concept, so saves against other sources leave it alone. The
/// configuration upsert and the legacy overwrite commit as one batch, so
/// the mirror can never trail the configuration row.
#[derive(Debug)]
pub struct ConfigurationSync<S, C> {
    store: S,
    catalog: C,
    defaults: DefaultScopes,
}

impl<S, C> ConfigurationSync<S, C>
where
    S: InventoryStore,
    C: ProductCatalog,
{
    pub fn new(store: S, catalog: C, defaults: DefaultScopes) -> Self {
        Self {
            store,
            catalog,
            defaults,
        }
    }

    /// Upsert a source-item configuration row. A default-source save also
    /// overwrites the legacy stock row, atomically with the upsert:
    /// unset fields flip the legacy row to "use config", explicit fields
    /// are pinned. Re-saving the same values is idempotent.
    #[instrument(skip(self, configuration))]
    pub fn save_source_item_config(
        &self,
        sku: &Sku,
        source_code: &SourceCode,
        configuration: SourceItemConfiguration,
    ) -> Result<(), SyncError> {
        let mut batch = vec![WriteOp::UpsertSourceItemConfig {
            sku: sku.clone(),
            source_code: source_code.clone(),
            configuration,
        }];

        if self.defaults.is_default_source(source_code) {
            let product_id = self.product_id_for(sku)?;
            batch.push(WriteOp::UpdateLegacyStockItem {
                stock_id: self.defaults.stock_id,
                product_id,
                update: LegacyStockUpdate::mirror(&configuration),
            });
            tracing::debug!(%sku, %product_id, "mirroring default-source configuration to legacy stock row");
        }

        self.store.apply(batch).map_err(store_err)
    }

    /// Upsert per-source defaults; no legacy involvement.
    pub fn save_source_config(
        &self,
        source_code: &SourceCode,
        configuration: SourceConfiguration,
    ) -> Result<(), SyncError> {
        self.store
            .apply(vec![WriteOp::UpsertSourceConfig {
                source_code: source_code.clone(),
                configuration,
            }])
            .map_err(store_err)
    }

    /// Replace the global fallback; no legacy involvement.
    pub fn save_global_config(&self, configuration: GlobalConfiguration) -> Result<(), SyncError> {
        self.store
            .apply(vec![WriteOp::SetGlobalConfig(configuration)])
            .map_err(store_err)
    }

    fn product_id_for(&self, sku: &Sku) -> Result<ProductId, SyncError> {
        let mut ids = self
            .catalog
            .product_ids_by_skus(std::slice::from_ref(sku))
            .map_err(catalog_err)?;
        ids.remove(sku)
            .ok_or_else(|| SyncError::NotFound(format!("sku '{sku}'")))
    }
}
