use serde::{Deserialize, Serialize};

use stockbridge_core::{DomainError, Sku, SourceCode};

/// Whether a source currently offers the item for sale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceItemStatus {
    OutOfStock,
    InStock,
}

impl SourceItemStatus {
    /// Numeric representation used by the legacy tables (0/1).
    pub fn as_legacy_code(self) -> u8 {
        match self {
            SourceItemStatus::OutOfStock => 0,
            SourceItemStatus::InStock => 1,
        }
    }

    pub fn from_legacy_code(code: u8) -> Result<Self, DomainError> {
        match code {
            0 => Ok(SourceItemStatus::OutOfStock),
            1 => Ok(SourceItemStatus::InStock),
            other => Err(DomainError::validation(format!(
                "unknown source item status code: {other}"
            ))),
        }
    }
}

/// Stock assignment of one sku at one source.
///
/// Identity is (sku, source_code). Duplicating a product copies these
/// rows under the new sku; the duplicate never references the originals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceItem {
    pub sku: Sku,
    pub source_code: SourceCode,
    pub quantity: f64,
    pub status: SourceItemStatus,
}

impl SourceItem {
    pub fn new(
        sku: Sku,
        source_code: SourceCode,
        quantity: f64,
        status: SourceItemStatus,
    ) -> Result<Self, DomainError> {
        let item = Self {
            sku,
            source_code,
            quantity,
            status,
        };
        item.validate()?;
        Ok(item)
    }

    /// Reject quantities the storage layer would refuse.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.quantity.is_finite() {
            return Err(DomainError::validation(format!(
                "quantity for sku '{}' must be finite",
                self.sku
            )));
        }
        if self.quantity < 0.0 {
            return Err(DomainError::validation(format!(
                "quantity for sku '{}' cannot be negative: {}",
                self.sku, self.quantity
            )));
        }
        Ok(())
    }

    /// Rebuild this assignment under another sku (product duplication).
    pub fn for_sku(&self, sku: Sku) -> Self {
        Self {
            sku,
            source_code: self.source_code.clone(),
            quantity: self.quantity,
            status: self.status,
        }
    }
}
