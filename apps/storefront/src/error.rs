//! Error types for the storefront.

use bookstore_catalog::CatalogError;
use bookstore_core::{CoreError, ValidationError};
use thiserror::Error;

use crate::state::StorageError;

/// Storefront failures that reach a caller.
///
/// Cart persistence problems never show up here: the cart recovers from
/// them itself.
#[derive(Debug, Error)]
pub enum StorefrontError {
    // =========================================================================
    // Catalog
    // =========================================================================
    #[error("Catalog request failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Configuration
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to read or write config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Storage
    // =========================================================================
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Convenience type alias for storefront results.
pub type StorefrontResult<T> = Result<T, StorefrontError>;
