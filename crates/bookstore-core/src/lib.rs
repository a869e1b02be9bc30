//! # bookstore-core: Pure Domain Logic for the Bookstore
//!
//! Every type that crosses a boundary (REST payloads, the persisted cart,
//! the observable state snapshot) is defined here, together with the pure
//! rules applied to them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookstore Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront (apps/storefront)                    │   │
//! │  │   Controllers ──► State Container ──► Cart Store               │   │
//! │  └──────────────┬──────────────────────────────────────────────────┘   │
//! │                 │ bookstore-catalog (reqwest)                           │
//! │  ┌──────────────▼──────────────────────────────────────────────────┐   │
//! │  │                 Catalog API (apps/api-server)                   │   │
//! │  └──────────────┬──────────────────────────────────────────────────┘   │
//! │                 │                                                       │
//! │  ┌──────────────▼──────────────────────────────────────────────────┐   │
//! │  │               ★ bookstore-core (THIS CRATE) ★                   │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌────────────┐  ┌─────────────┐   │   │
//! │  │   │  types  │  │  money  │  │  catalog   │  │ validation  │   │   │
//! │  │   │  Book   │  │  Money  │  │ BookFilter │  │  presence   │   │   │
//! │  │   │Category │  │ TaxRate │  │ suggestions│  │   checks    │   │   │
//! │  │   └─────────┘  └─────────┘  └────────────┘  └─────────────┘   │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Book, Category, CartLineItem, TaxRate
//! - [`money`] - Fixed-point money (four decimal places)
//! - [`catalog`] - Search predicates, filters, sorting, suggestions
//! - [`validation`] - Presence checks and date normalisation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bookstore_core::{Book, CartLineItem, Money, TaxRate};
//!
//! let line = CartLineItem {
//!     book: Book { value: Money::from_cents(1999), ..Book::default() },
//!     quantity: 2,
//! };
//! let tax = line.line_total().calculate_tax(TaxRate::STANDARD);
//! assert_eq!(tax.to_decimal(), 3.998);
//! ```

pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest search query accepted.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Type-ahead needs at least this many characters before it suggests.
pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;

/// Most suggestions shown at once.
pub const MAX_SUGGESTIONS: usize = 5;
