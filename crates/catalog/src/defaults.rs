use serde::{Deserialize, Serialize};

use stockbridge_core::{SourceCode, StockId};

/// Platform-level default scope identifiers.
///
/// Injected once per service rather than read from ambient singletons;
/// the legacy stock model only ever sees this source/stock pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultScopes {
    pub source_code: SourceCode,
    pub stock_id: StockId,
}

impl DefaultScopes {
    pub fn new(source_code: SourceCode, stock_id: StockId) -> Self {
        Self {
            source_code,
            stock_id,
        }
    }

    /// True when a save against `source_code` must be mirrored into the
    /// legacy stock row.
    pub fn is_default_source(&self, source_code: &SourceCode) -> bool {
        &self.source_code == source_code
    }
}
