use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use stockbridge_core::{ProductId, Sku};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No product id is mapped for the given sku.
    #[error("no such entity: sku '{0}'")]
    SkuNotFound(Sku),

    /// No sku is mapped for the given product id.
    #[error("no such entity: product id {0}")]
    ProductIdNotFound(ProductId),

    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Bidirectional sku ↔ product id lookup, batched.
///
/// Unknown inputs are a hard failure: callers pass identifiers they claim
/// exist, so a miss signals an invalid identifier, not an empty result.
pub trait ProductCatalog: Send + Sync {
    fn product_ids_by_skus(&self, skus: &[Sku]) -> Result<HashMap<Sku, ProductId>, CatalogError>;
    fn skus_by_product_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Sku>, CatalogError>;
}

impl<C> ProductCatalog for Arc<C>
where
    C: ProductCatalog + ?Sized,
{
    fn product_ids_by_skus(&self, skus: &[Sku]) -> Result<HashMap<Sku, ProductId>, CatalogError> {
        (**self).product_ids_by_skus(skus)
    }

    fn skus_by_product_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Sku>, CatalogError> {
        (**self).skus_by_product_ids(ids)
    }
}

#[derive(Debug, Default)]
struct CatalogMaps {
    by_sku: HashMap<Sku, ProductId>,
    by_id: HashMap<ProductId, Sku>,
}

/// In-memory catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    inner: RwLock<CatalogMaps>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or remap) one product.
    pub fn insert(&self, sku: Sku, id: ProductId) {
        if let Ok(mut maps) = self.inner.write() {
            maps.by_id.insert(id, sku.clone());
            maps.by_sku.insert(sku, id);
        }
    }
}

impl ProductCatalog for InMemoryProductCatalog {
    fn product_ids_by_skus(&self, skus: &[Sku]) -> Result<HashMap<Sku, ProductId>, CatalogError> {
        let maps = self
            .inner
            .read()
            .map_err(|_| CatalogError::Unavailable("lock poisoned".to_string()))?;

        let mut out = HashMap::with_capacity(skus.len());
        for sku in skus {
            let id = maps
                .by_sku
                .get(sku)
                .ok_or_else(|| CatalogError::SkuNotFound(sku.clone()))?;
            out.insert(sku.clone(), *id);
        }
        Ok(out)
    }

    fn skus_by_product_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Sku>, CatalogError> {
        let maps = self
            .inner
            .read()
            .map_err(|_| CatalogError::Unavailable("lock poisoned".to_string()))?;

        let mut out = HashMap::with_capacity(ids.len());
        for id in ids {
            let sku = maps
                .by_id
                .get(id)
                .ok_or(CatalogError::ProductIdNotFound(*id))?;
            out.insert(*id, sku.clone());
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sku(value: &str) -> Sku {
        Sku::new(value).unwrap()
    }

    #[test]
    fn maps_both_directions() {
        let catalog = InMemoryProductCatalog::new();
        catalog.insert(sku("SKU-1"), ProductId(11));
        catalog.insert(sku("SKU-2"), ProductId(22));

        let ids = catalog
            .product_ids_by_skus(&[sku("SKU-1"), sku("SKU-2")])
            .unwrap();
        assert_eq!(ids[&sku("SKU-1")], ProductId(11));
        assert_eq!(ids[&sku("SKU-2")], ProductId(22));

        let skus = catalog.skus_by_product_ids(&[ProductId(11)]).unwrap();
        assert_eq!(skus[&ProductId(11)], sku("SKU-1"));
    }

    #[test]
    fn unknown_sku_fails_naming_the_key() {
        let catalog = InMemoryProductCatalog::new();
        catalog.insert(sku("SKU-1"), ProductId(11));

        let err = catalog
            .product_ids_by_skus(&[sku("SKU-1"), sku("missing")])
            .unwrap_err();
        assert_eq!(err, CatalogError::SkuNotFound(sku("missing")));
    }

    #[test]
    fn unknown_product_id_fails_naming_the_key() {
        let catalog = InMemoryProductCatalog::new();

        let err = catalog.skus_by_product_ids(&[ProductId(404)]).unwrap_err();
        assert_eq!(err, CatalogError::ProductIdNotFound(ProductId(404)));
    }

    #[test]
    fn insert_remaps_an_existing_sku() {
        let catalog = InMemoryProductCatalog::new();
        catalog.insert(sku("SKU-1"), ProductId(11));
        catalog.insert(sku("SKU-1"), ProductId(12));

        let ids = catalog.product_ids_by_skus(&[sku("SKU-1")]).unwrap();
        assert_eq!(ids[&sku("SKU-1")], ProductId(12));
    }
}
