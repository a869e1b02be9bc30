//! # Catalog Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  reqwest::Error / HTTP status                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← one variant per failure class            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Feature controller ← logs it, shows "Create Failed" etc.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Catalog API request errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The configured base URL can't be used to build request URLs.
    #[error("Invalid catalog URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request never produced a response.
    ///
    /// ## When This Occurs
    /// - API server not running (connection refused)
    /// - Configured timeout elapsed
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered 404.
    #[error("Not found: {url}")]
    NotFound { url: String },

    /// Any other non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The body wasn't the JSON we expected.
    #[error("Response parsing failed: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Whether the API reported the record as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

/// Convenience type alias for catalog results.
pub type CatalogResult<T> = Result<T, CatalogError>;
