//! # Feature Controllers
//!
//! One controller per screen. Each subscribes to the State Container when it
//! is built and keeps the newest snapshot as its view.
//!
//! ## Lifecycle
//! ```text
//! let mut shop = ShopController::new(&mut store);    subscribe
//! shop.load(&mut store).await;                       catalog ──► container
//! shop.add_to_cart(&mut store, &book);               container ──► cart
//! shop.view();                                       newest snapshot
//! shop.dispose();                                    unsubscribe
//! ```
//!
//! Catalog failures in load paths are logged only. Failures in user
//! actions (save, delete) become error notifications.

pub mod admin;
pub mod cart;
pub mod search;
pub mod shop;

pub use admin::AdminController;
pub use cart::CartController;
pub use search::{SearchController, SearchHits, SearchMode, SearchRequest, SearchResponse};
pub use shop::ShopController;

use std::sync::Arc;

use bookstore_core::Book;
use tracing::{debug, error};

use crate::state::{BookstoreState, Subscription};
use crate::Storefront;

// =============================================================================
// State View
// =============================================================================

/// A controller's subscription plus the newest snapshot it has seen.
#[derive(Debug)]
pub struct StateView {
    subscription: Subscription<BookstoreState>,
    current: Arc<BookstoreState>,
}

impl StateView {
    pub fn attach(store: &mut Storefront) -> Self {
        let mut subscription = store.state_mut().subscribe();
        let current = subscription
            .latest()
            .unwrap_or_else(|| store.state().snapshot());
        StateView {
            subscription,
            current,
        }
    }

    /// Catches up with every snapshot emitted since the last call.
    pub fn sync(&mut self) -> &BookstoreState {
        if let Some(newest) = self.subscription.latest() {
            self.current = newest;
        }
        &self.current
    }

    /// The last synced snapshot.
    pub fn current(&self) -> &BookstoreState {
        &self.current
    }

    pub fn dispose(self) {
        self.subscription.unsubscribe();
    }
}

// =============================================================================
// Shared Actions
// =============================================================================

/// Fetches every book into the container. Failures are logged only.
pub(crate) async fn load_books(store: &mut Storefront) -> bool {
    let result = store.catalog().books().list().await;
    match result {
        Ok(books) => {
            debug!(count = books.len(), "Books loaded");
            store.state_mut().set_books(books);
            true
        }
        Err(e) => {
            error!(error = %e, "Error loading books");
            false
        }
    }
}

/// Fetches every category into the container. Failures are logged only.
pub(crate) async fn load_categories(store: &mut Storefront) -> bool {
    let result = store.catalog().categories().list().await;
    match result {
        Ok(categories) => {
            debug!(count = categories.len(), "Categories loaded");
            store.state_mut().set_categories(categories);
            true
        }
        Err(e) => {
            error!(error = %e, "Error loading categories");
            false
        }
    }
}

/// Adds one copy of `book` and tells the user.
pub(crate) fn add_to_cart(store: &mut Storefront, book: &Book) {
    store.state_mut().add_to_cart(book);
    store.notifier().success(
        "Added to Cart!",
        &format!("\"{}\" by {} has been added to your cart.", book.name, book.author),
    );
    debug!(
        lines = store.state().cart().line_count(),
        "Cart count after adding"
    );
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn test_state_view_tracks_newest_snapshot() {
        let mut h = harness(true).await;
        let mut view = StateView::attach(&mut h.store);
        assert!(view.current().books.is_empty());

        h.store.state_mut().set_books(vec![gatsby()]);
        h.store.state_mut().set_books(vec![gatsby(), nineteen_eighty_four()]);

        assert!(view.current().books.is_empty());
        assert_eq!(view.sync().books.len(), 2);

        view.dispose();
        assert_eq!(h.store.state().subscriber_count(), 0);
    }
}
