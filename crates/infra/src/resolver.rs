//! Effective-setting resolution across configuration scopes.

use thiserror::Error;
use tracing::instrument;

use stockbridge_catalog::{CatalogError, DefaultScopes, ProductCatalog};
use stockbridge_core::{ProductId, Sku, SourceCode};
use stockbridge_inventory::{Backorders, InventorySetting, SettingValue};

use crate::store::{InventoryStore, StoreError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolveError {
    /// The sku ↔ product id mapping failed: the caller supplied an
    /// invalid identifier.
    #[error("no such entity: {0}")]
    NotFound(String),

    /// The storage layer failed to answer.
    #[error("storage failed: {0}")]
    Store(String),
}

fn store_err(err: StoreError) -> ResolveError {
    ResolveError::Store(err.to_string())
}

fn catalog_err(err: CatalogError) -> ResolveError {
    match err {
        CatalogError::SkuNotFound(sku) => ResolveError::NotFound(format!("sku '{sku}'")),
        CatalogError::ProductIdNotFound(id) => ResolveError::NotFound(format!("product id {id}")),
        CatalogError::Unavailable(msg) => ResolveError::Store(msg),
    }
}

/// Resolves the effective value of an inventory setting.
///
/// Walks source-item → source → global scope; the first scope with a
/// value wins, and the global scope always has one. Missing configuration
/// rows read as "no value here", never as errors.
#[derive(Debug)]
pub struct SettingResolver<S, C> {
    store: S,
    catalog: C,
    defaults: DefaultScopes,
}

impl<S, C> SettingResolver<S, C>
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

    /// Effective value of `setting` for (sku, source_code).
    pub fn resolve(
        &self,
        sku: &Sku,
        source_code: &SourceCode,
        setting: InventorySetting,
    ) -> Result<SettingValue, ResolveError> {
        match setting {
            InventorySetting::Backorders => self
                .backorders(sku, source_code)
                .map(SettingValue::Backorders),
            InventorySetting::NotifyStockQty => self
                .notify_stock_qty(sku, source_code)
                .map(SettingValue::NotifyStockQty),
        }
    }

    /// Effective backorder policy for (sku, source_code).
    pub fn backorders(
        &self,
        sku: &Sku,
        source_code: &SourceCode,
    ) -> Result<Backorders, ResolveError> {
        let item = self
            .store
            .source_item_config(sku, source_code)
            .map_err(store_err)?;
        if let Some(value) = item.and_then(|c| c.backorders) {
            return Ok(value);
        }

        let source = self.store.source_config(source_code).map_err(store_err)?;
        if let Some(value) = source.and_then(|c| c.backorders) {
            return Ok(value);
        }

        Ok(self.store.global_config().map_err(store_err)?.backorders)
    }

    /// Effective low-stock notification threshold for (sku, source_code).
    pub fn notify_stock_qty(
        &self,
        sku: &Sku,
        source_code: &SourceCode,
    ) -> Result<f64, ResolveError> {
        let item = self
            .store
            .source_item_config(sku, source_code)
            .map_err(store_err)?;
        if let Some(value) = item.and_then(|c| c.notify_stock_qty) {
            return Ok(value);
        }

        let source = self.store.source_config(source_code).map_err(store_err)?;
        if let Some(value) = source.and_then(|c| c.notify_stock_qty) {
            return Ok(value);
        }

        Ok(self
            .store
            .global_config()
            .map_err(store_err)?
            .notify_stock_qty)
    }

    /// Effective backorder policy for a legacy product id, resolved at
    /// the default source. An unmapped id is a hard failure.
    #[instrument(skip(self))]
    pub fn backorders_for_product(&self, product_id: ProductId) -> Result<Backorders, ResolveError> {
        let sku = self.sku_for(product_id)?;
        self.backorders(&sku, &self.defaults.source_code)
    }

    /// Effective notification threshold for a legacy product id, resolved
    /// at the default source.
    #[instrument(skip(self))]
    pub fn notify_stock_qty_for_product(&self, product_id: ProductId) -> Result<f64, ResolveError> {
        let sku = self.sku_for(product_id)?;
        self.notify_stock_qty(&sku, &self.defaults.source_code)
    }

    fn sku_for(&self, product_id: ProductId) -> Result<Sku, ResolveError> {
        let mut skus = self
            .catalog
            .skus_by_product_ids(&[product_id])
            .map_err(catalog_err)?;
        skus.remove(&product_id)
            .ok_or_else(|| ResolveError::NotFound(format!("product id {product_id}")))
    }
}
