//! # bookstore-catalog: Catalog API Accessors
//!
//! Thin, stateless wrappers over the bookstore REST API. Each call builds a
//! URL, sends one request and decodes one response. There is no caching,
//! no retry, and no business logic.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  controller.save_book()                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  client.books().create(&draft)                                          │
//! │       │   POST {base}/Books   body: Book (camelCase JSON)               │
//! │       ▼                                                                 │
//! │  2xx ─► Ok(Book)       404 ─► Err(NotFound)                             │
//! │                        4xx/5xx ─► Err(Api { status, message })          │
//! │  connection / timeout ─► Err(Request)                                   │
//! │  bad JSON ─► Err(Decode)                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The caller decides what a failure means: the storefront's controllers
//! turn them into error notifications.

pub mod books;
pub mod categories;
pub mod client;
pub mod error;

pub use books::BookApi;
pub use categories::CategoryApi;
pub use client::CatalogClient;
pub use error::{CatalogError, CatalogResult};

/// Where the catalog API listens unless configured otherwise.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:82/api";
