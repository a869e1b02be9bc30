//! # Bookstore API
//!
//! A small REST server over two in-memory collections, books and
//! categories. It is the peer the storefront's catalog accessors talk to.
//!
//! ## Module Organization
//! ```text
//! bookstore_api/
//! ├── lib.rs       ◄─── You are here (app builder, tracing)
//! ├── config.rs    ◄─── ServerConfig (env)
//! ├── error.rs     ◄─── ApiError → { "error": ... }
//! ├── store.rs     ◄─── CatalogStore (RwLock collections)
//! └── routes.rs    ◄─── axum handlers
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use bookstore_api::{app, CatalogStore};
//!
//! # async fn run() -> std::io::Result<()> {
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8082").await?;
//! axum::serve(listener, app(Arc::new(CatalogStore::seeded()))).await
//! # }
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

use axum::Router;
use tracing_subscriber::EnvFilter;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use routes::SharedStore;
pub use store::CatalogStore;

/// The full API, ready to serve.
pub fn app(store: SharedStore) -> Router {
    routes::router(store)
}

/// Installs the fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bookstore_api=debug,tower_http=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
