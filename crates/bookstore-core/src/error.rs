//! # Error Types
//!
//! Domain-specific error types for bookstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookstore-core (this file)                                            │
//! │  ├── CoreError        - Domain rule failures                           │
//! │  └── ValidationError  - Presence / format checks                       │
//! │                                                                         │
//! │  bookstore-catalog                                                     │
//! │  └── CatalogError     - HTTP and decode failures                       │
//! │                                                                         │
//! │  storefront app                                                        │
//! │  ├── StorageError     - Persistence slot failures (never surfaced)     │
//! │  └── StorefrontError  - What controllers report                        │
//! │                                                                         │
//! │  api server                                                            │
//! │  └── ApiError         - JSON `{ "error": ... }` responses              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Book cannot be found.
    #[error("Book not found: {0}")]
    BookNotFound(i64),

    /// Category cannot be found.
    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    /// A filter or sort key from the UI isn't one we know.
    ///
    /// ## When This Occurs
    /// - Price range other than `0-20`, `20-50`, `50-100`, `100+`
    /// - Sort key other than `name`, `author`, `price`, `publishDate`
    #[error("Unknown {kind}: {value}")]
    UnknownOption { kind: &'static str, value: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
