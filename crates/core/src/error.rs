//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures of this module's own
/// contracts (validation, identity lookups, writes). Host-framework
/// failures stay with the host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. negative quantity, unknown code).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was malformed (e.g. empty sku).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested entity was not found; carries the offending key.
    #[error("no such entity: {0}")]
    NotFound(String),

    /// A storage write was rejected.
    #[error("save failed: {0}")]
    Save(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }

    pub fn save(msg: impl Into<String>) -> Self {
        Self::Save(msg.into())
    }
}
