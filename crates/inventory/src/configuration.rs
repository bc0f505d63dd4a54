//! Layered inventory configuration scopes.
//!
//! A setting is resolved source-item → source → global; `None` at the two
//! narrower scopes means "inherit", never an error. The global scope is
//! always fully populated.

use serde::{Deserialize, Serialize};

use stockbridge_core::DomainError;

/// Backorder policy for an item or scope.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backorders {
    /// No backorders: quantity cannot drop below zero.
    Disabled,
    /// Allow quantity below zero.
    AllowBelowZero,
    /// Allow quantity below zero and notify the customer.
    AllowBelowZeroNotify,
}

impl Backorders {
    /// Numeric representation stored by the legacy single-stock model.
    pub fn as_legacy_code(self) -> u8 {
        match self {
            Backorders::Disabled => 0,
            Backorders::AllowBelowZero => 1,
            Backorders::AllowBelowZeroNotify => 2,
        }
    }

    pub fn from_legacy_code(code: u8) -> Result<Self, DomainError> {
        match code {
            0 => Ok(Backorders::Disabled),
            1 => Ok(Backorders::AllowBelowZero),
            2 => Ok(Backorders::AllowBelowZeroNotify),
            other => Err(DomainError::validation(format!(
                "unknown backorders code: {other}"
            ))),
        }
    }
}

/// Source-item-scoped overrides for one (sku, source_code).
///
/// Either field may be unset, meaning "inherit from the source scope".
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceItemConfiguration {
    pub backorders: Option<Backorders>,
    pub notify_stock_qty: Option<f64>,
}

/// Per-source defaults, one row per source.
///
/// Either field may be unset, meaning "inherit from the global scope".
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceConfiguration {
    pub backorders: Option<Backorders>,
    pub notify_stock_qty: Option<f64>,
}

/// Global fallback configuration, always fully populated.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfiguration {
    pub backorders: Backorders,
    pub notify_stock_qty: f64,
}

impl Default for GlobalConfiguration {
    /// Platform defaults: no backorders, notify when quantity reaches 1.
    fn default() -> Self {
        Self {
            backorders: Backorders::Disabled,
            notify_stock_qty: 1.0,
        }
    }
}

/// A resolvable inventory setting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventorySetting {
    Backorders,
    NotifyStockQty,
}

/// Effective value of an [`InventorySetting`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    Backorders(Backorders),
    NotifyStockQty(f64),
}
