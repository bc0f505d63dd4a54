//! Legacy single-warehouse stock rows and the mirror computation.

use serde::{Deserialize, Serialize};

use stockbridge_core::{ProductId, StockId};

use crate::configuration::{Backorders, SourceItemConfiguration};

/// Row of the legacy single-warehouse stock table.
///
/// Invariant: the row always reflects the source-item configuration of
/// the **default source**; saves against other sources never touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyStockItem {
    pub product_id: ProductId,
    pub stock_id: StockId,
    pub backorders: Option<Backorders>,
    pub use_config_backorders: bool,
    pub notify_stock_qty: Option<f64>,
    pub use_config_notify_stock_qty: bool,
}

impl LegacyStockItem {
    /// Fresh row inheriting everything from the legacy global config.
    pub fn inheriting(product_id: ProductId, stock_id: StockId) -> Self {
        Self {
            product_id,
            stock_id,
            backorders: None,
            use_config_backorders: true,
            notify_stock_qty: None,
            use_config_notify_stock_qty: true,
        }
    }
}

/// The mirrored columns of a legacy stock row, computed from a
/// source-item configuration save against the default source.
///
/// An unset source value flips the row back to "use config" (flag set,
/// column null); an explicit value pins it (flag cleared, value copied).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyStockUpdate {
    pub backorders: Option<Backorders>,
    pub use_config_backorders: bool,
    pub notify_stock_qty: Option<f64>,
    pub use_config_notify_stock_qty: bool,
}

impl LegacyStockUpdate {
    pub fn mirror(configuration: &SourceItemConfiguration) -> Self {
        Self {
            backorders: configuration.backorders,
            use_config_backorders: configuration.backorders.is_none(),
            notify_stock_qty: configuration.notify_stock_qty,
            use_config_notify_stock_qty: configuration.notify_stock_qty.is_none(),
        }
    }

    /// Overwrite the mirrored columns of an existing row.
    pub fn apply_to(&self, row: &mut LegacyStockItem) {
        row.backorders = self.backorders;
        row.use_config_backorders = self.use_config_backorders;
        row.notify_stock_qty = self.notify_stock_qty;
        row.use_config_notify_stock_qty = self.use_config_notify_stock_qty;
    }
}
