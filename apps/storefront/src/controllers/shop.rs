//! # Shop Controller
//!
//! The catalog grid: every book, a category strip, and add-to-cart.

use bookstore_core::Book;
use tracing::debug;

use super::StateView;
use crate::state::BookstoreState;
use crate::Storefront;

#[derive(Debug)]
pub struct ShopController {
    view: StateView,
}

impl ShopController {
    pub fn new(store: &mut Storefront) -> Self {
        ShopController {
            view: StateView::attach(store),
        }
    }

    /// Loads books and categories, as the screen does when it opens.
    pub async fn load(&mut self, store: &mut Storefront) {
        self.load_books(store).await;
        self.load_categories(store).await;
    }

    pub async fn load_books(&mut self, store: &mut Storefront) -> bool {
        super::load_books(store).await
    }

    pub async fn load_categories(&mut self, store: &mut Storefront) -> bool {
        super::load_categories(store).await
    }

    /// Narrows `filtered_books` to one category of the loaded books.
    pub fn filter_by_category(&mut self, store: &mut Storefront, category_id: i64) {
        let matching: Vec<Book> = self
            .view
            .sync()
            .books
            .iter()
            .filter(|b| b.category_id == category_id)
            .cloned()
            .collect();

        debug!(category_id, count = matching.len(), "Filtering shop by category");
        store.state_mut().set_filtered_books(matching);
    }

    pub fn add_to_cart(&mut self, store: &mut Storefront, book: &Book) {
        super::add_to_cart(store, book);
    }

    /// The newest snapshot this screen has seen.
    pub fn view(&mut self) -> &BookstoreState {
        self.view.sync()
    }

    pub fn dispose(self) {
        self.view.dispose();
    }
}
