//! Source-item duplication on product copy.

use thiserror::Error;
use tracing::instrument;

use stockbridge_core::Sku;

use crate::store::{InventoryStore, StoreError, WriteOp};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CopyError {
    /// A duplicated row failed validation; no rows were written.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The storage layer rejected the batch; no rows were written.
    #[error("save failed: {0}")]
    Save(String),
}

fn store_err(err: StoreError) -> CopyError {
    match err {
        StoreError::Validation(msg) => CopyError::Validation(msg),
        StoreError::Save(msg) => CopyError::Save(msg),
    }
}

/// Copies stock assignments to a duplicated product.
///
/// Only quantity/status rows travel. Source-scoped configuration stays
/// behind, so the duplicate falls back to source/global defaults until it
/// is configured explicitly.
#[derive(Debug)]
pub struct SourceItemCopier<S> {
    store: S,
}

impl<S> SourceItemCopier<S>
where
    S: InventoryStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Rebuild every stock assignment of `original_sku` under
    /// `duplicate_sku` and submit them as one batch. A product with no
    /// assignments duplicates to an empty batch, which is a no-op.
    #[instrument(skip(self))]
    pub fn copy_source_items(
        &self,
        original_sku: &Sku,
        duplicate_sku: &Sku,
    ) -> Result<usize, CopyError> {
        let items = self
            .store
            .source_items_by_sku(original_sku)
            .map_err(store_err)?;

        let batch: Vec<WriteOp> = items
            .iter()
            .map(|item| WriteOp::UpsertSourceItem(item.for_sku(duplicate_sku.clone())))
            .collect();
        let copied = batch.len();

        self.store.apply(batch).map_err(store_err)?;
        tracing::debug!(%original_sku, %duplicate_sku, copied, "copied source items to duplicate");

        Ok(copied)
    }
}
