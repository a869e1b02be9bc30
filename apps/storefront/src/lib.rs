//! # Bookstore Storefront Library
//!
//! The client half of the bookstore. Screens drive Feature Controllers,
//! which call the catalog API and mutate one shared State Container.
//!
//! ## Module Organization
//! ```text
//! bookstore_storefront/
//! ├── lib.rs            ◄─── You are here (Storefront context, tracing)
//! ├── config.rs         ◄─── StorefrontConfig (toml + env)
//! ├── error.rs          ◄─── StorefrontError
//! ├── ui.rs             ◄─── Notifier / Confirmer collaborators
//! ├── state/
//! │   ├── storage.rs    ◄─── KeyValueStore, MemoryStore, FileStore
//! │   ├── cart.rs       ◄─── Cart Store
//! │   ├── subscription.rs ◄─ Snapshot delivery
//! │   └── bookstore.rs  ◄─── Application State Container
//! └── controllers/
//!     ├── shop.rs       ◄─── Catalog grid
//!     ├── admin.rs      ◄─── Book and category forms
//!     ├── cart.rs       ◄─── Cart page and checkout
//!     └── search.rs     ◄─── Home screen search
//! ```
//!
//! ## One Context Per Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Storefront                                    │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌─────────────┐ ┌───────────┐ │
//! │  │CatalogClient │  │ StateContainer   │  │ Notifier    │ │ Confirmer │ │
//! │  │ (reqwest)    │  │  └─ CartStore    │  │ (toasts)    │ │ (modals)  │ │
//! │  └──────────────┘  └──────────────────┘  └─────────────┘ └───────────┘ │
//! │                                                                         │
//! │  Controllers borrow `&mut Storefront` per call. Nothing is global.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod controllers;
pub mod error;
pub mod state;
pub mod ui;

use std::sync::Arc;

use bookstore_catalog::CatalogClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::StorefrontConfig;
pub use error::{StorefrontError, StorefrontResult};
use state::{CartStore, FileStore, KeyValueStore, StateContainer};
use ui::{AutoConfirmer, Confirmer, LogNotifier, Notifier};

/// Everything a storefront session owns.
pub struct Storefront {
    config: StorefrontConfig,
    catalog: CatalogClient,
    state: StateContainer,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
}

impl Storefront {
    /// Assembles a session from explicit parts.
    ///
    /// `storage` of `None` keeps the cart in memory only.
    pub fn new(
        config: StorefrontConfig,
        catalog: CatalogClient,
        storage: Option<Arc<dyn KeyValueStore>>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        let cart = CartStore::with_tax_rate(storage, config.tax_rate());
        Storefront {
            config,
            catalog,
            state: StateContainer::new(cart),
            notifier,
            confirmer,
        }
    }

    /// Builds a headless session from config: a file-backed cart when
    /// persistence is on, log notifications, and confirmations that always
    /// decline.
    ///
    /// ## Startup Sequence
    /// ```text
    /// 1. CatalogClient::with_timeout(api.base_url, api.timeout)
    /// 2. FileStore at config.data_dir() (or no store)
    /// 3. CartStore restores "bookstore-cart"
    /// 4. StateContainer seeded with the restored cart
    /// ```
    pub fn bootstrap(config: StorefrontConfig) -> StorefrontResult<Self> {
        let catalog = CatalogClient::with_timeout(&config.api.base_url, config.api.timeout())?;

        let storage: Option<Arc<dyn KeyValueStore>> = match config.data_dir() {
            Some(dir) => {
                info!(?dir, "Cart persistence enabled");
                Some(Arc::new(FileStore::new(dir)))
            }
            None => {
                info!("Cart persistence disabled");
                None
            }
        };

        Ok(Self::new(
            config,
            catalog,
            storage,
            Arc::new(LogNotifier),
            Arc::new(AutoConfirmer::declining()),
        ))
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    pub fn state(&self) -> &StateContainer {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut StateContainer {
        &mut self.state
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn confirmer(&self) -> &dyn Confirmer {
        self.confirmer.as_ref()
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bookstore_storefront=trace` - Trace for this crate only
/// - Default: INFO, DEBUG for the bookstore crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,bookstore_storefront=debug,bookstore_catalog=debug")
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
