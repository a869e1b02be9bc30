//! # Application State Container
//!
//! The single source of truth for everything the storefront screens render.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         StateContainer                                  │
//! │                                                                         │
//! │   state: Arc<BookstoreState>  ◄── replaced wholesale on every change    │
//! │   ┌───────────────────────────────────────────────────────────────┐    │
//! │   │ books  categories  filtered_books                             │    │
//! │   │ show_book_form  editing_book  book_form                       │    │
//! │   │ show_category_form  editing_category  category_form           │    │
//! │   │ cart_items  ◄── read-through copy, refreshed after every      │    │
//! │   │                 cart proxy call                               │    │
//! │   └───────────────────────────────────────────────────────────────┘    │
//! │                                                                         │
//! │   cart: CartStore  ◄── owns the line items and their persistence        │
//! │                                                                         │
//! │   hub: Broadcaster ──► Subscription, Subscription, ...                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Emission Contract
//! - Every setter, `update`, form reset and cart proxy emits exactly once
//! - Getters never emit
//! - No batching: three setters in a row are three snapshots
//!
//! ## User Workflow
//! ```text
//! ShopController::add_to_cart(book)
//!        │
//!        ▼
//! container.add_to_cart(&book)
//!        ├── cart.add(&book)               (persists)
//!        ├── next.cart_items = cart.items()
//!        └── emit(next) ──► every controller's Subscription
//! ```

use std::sync::Arc;

use bookstore_core::{today_utc, Book, CartLineItem, Category};
use serde::Serialize;
use tracing::{debug, warn};

use super::cart::CartStore;
use super::subscription::{Broadcaster, Subscription};

// =============================================================================
// Snapshot
// =============================================================================

/// One immutable view of the application.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookstoreState {
    pub books: Vec<Book>,
    pub categories: Vec<Category>,
    /// Derived subset shown by the shop screen.
    pub filtered_books: Vec<Book>,

    pub show_category_form: bool,
    pub editing_category: Option<Category>,
    pub category_form: Category,

    pub show_book_form: bool,
    pub editing_book: Option<Book>,
    pub book_form: Book,

    /// Mirror of the cart. Written only by the cart proxies.
    pub cart_items: Vec<CartLineItem>,
}

// =============================================================================
// Container
// =============================================================================

/// Observable application state plus the cart it mirrors.
#[derive(Debug)]
pub struct StateContainer {
    state: Arc<BookstoreState>,
    cart: CartStore,
    hub: Broadcaster<BookstoreState>,
}

impl StateContainer {
    /// Builds the initial snapshot. `cart_items` starts as whatever the cart
    /// restored from storage.
    pub fn new(cart: CartStore) -> Self {
        let state = BookstoreState {
            cart_items: cart.items(),
            ..BookstoreState::default()
        };

        StateContainer {
            state: Arc::new(state),
            cart,
            hub: Broadcaster::default(),
        }
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<BookstoreState> {
        Arc::clone(&self.state)
    }

    /// Starts observing. The subscription yields the current snapshot first.
    pub fn subscribe(&mut self) -> Subscription<BookstoreState> {
        self.hub.subscribe(self.snapshot())
    }

    /// Subscriptions still being delivered to.
    pub fn subscriber_count(&self) -> usize {
        self.hub.live_count()
    }

    /// Read access to the cart for totals.
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn books(&self) -> &[Book] {
        &self.state.books
    }

    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    pub fn filtered_books(&self) -> &[Book] {
        &self.state.filtered_books
    }

    pub fn show_category_form(&self) -> bool {
        self.state.show_category_form
    }

    pub fn editing_category(&self) -> Option<&Category> {
        self.state.editing_category.as_ref()
    }

    pub fn category_form(&self) -> &Category {
        &self.state.category_form
    }

    pub fn show_book_form(&self) -> bool {
        self.state.show_book_form
    }

    pub fn editing_book(&self) -> Option<&Book> {
        self.state.editing_book.as_ref()
    }

    pub fn book_form(&self) -> &Book {
        &self.state.book_form
    }

    /// Straight from the cart, not the mirrored copy.
    pub fn cart_items(&self) -> Vec<CartLineItem> {
        self.cart.items()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    pub fn set_books(&mut self, books: Vec<Book>) {
        self.merge(|s| s.books = books);
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.merge(|s| s.categories = categories);
    }

    pub fn set_filtered_books(&mut self, books: Vec<Book>) {
        self.merge(|s| s.filtered_books = books);
    }

    pub fn set_show_category_form(&mut self, show: bool) {
        self.merge(|s| s.show_category_form = show);
    }

    pub fn set_editing_category(&mut self, category: Option<Category>) {
        self.merge(|s| s.editing_category = category);
    }

    pub fn set_category_form(&mut self, form: Category) {
        self.merge(|s| s.category_form = form);
    }

    pub fn set_show_book_form(&mut self, show: bool) {
        self.merge(|s| s.show_book_form = show);
    }

    pub fn set_editing_book(&mut self, book: Option<Book>) {
        self.merge(|s| s.editing_book = book);
    }

    pub fn set_book_form(&mut self, form: Book) {
        self.merge(|s| s.book_form = form);
    }

    /// Changes several fields in one emission.
    ///
    /// `cart_items` belongs to the cart; a closure that edits it has that
    /// edit discarded.
    ///
    /// ## Example
    /// ```rust,ignore
    /// container.update(|s| {
    ///     s.show_book_form = false;
    ///     s.editing_book = None;
    /// });
    /// ```
    pub fn update(&mut self, f: impl FnOnce(&mut BookstoreState)) {
        let mut next = (*self.state).clone();
        f(&mut next);

        if next.cart_items != self.state.cart_items {
            warn!("update() tried to change cart_items; use the cart proxies instead");
            next.cart_items = self.state.cart_items.clone();
        }

        self.commit(next);
    }

    // =========================================================================
    // Form Resets
    // =========================================================================

    /// Blank book draft dated today (UTC).
    pub fn reset_book_form(&mut self) {
        self.reset_book_form_on(today_utc());
    }

    /// Blank book draft dated `today`.
    pub fn reset_book_form_on(&mut self, today: impl Into<String>) {
        let draft = Book::draft(today);
        self.merge(|s| s.book_form = draft);
    }

    pub fn reset_category_form(&mut self) {
        self.merge(|s| s.category_form = Category::default());
    }

    /// Swaps in `book` for the entry with `id`. Emits even when nothing
    /// matched.
    pub fn update_book_in_books(&mut self, id: i64, book: Book) {
        self.merge(|s| {
            match s.books.iter_mut().find(|b| b.id == Some(id)) {
                Some(slot) => *slot = book,
                None => debug!(book_id = id, "No book to replace"),
            }
        });
    }

    // =========================================================================
    // Cart Proxies
    // =========================================================================

    pub fn add_to_cart(&mut self, book: &Book) {
        self.cart.add(book);
        self.sync_cart();
    }

    pub fn update_cart_item_quantity(&mut self, book_id: i64, quantity: i64) {
        self.cart.set_quantity(book_id, quantity);
        self.sync_cart();
    }

    pub fn remove_from_cart(&mut self, book_id: i64) {
        self.cart.remove(book_id);
        self.sync_cart();
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.sync_cart();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn sync_cart(&mut self) {
        let mut next = (*self.state).clone();
        next.cart_items = self.cart.items();
        self.commit(next);
    }

    /// Shallow merge for everything except `cart_items`.
    fn merge(&mut self, f: impl FnOnce(&mut BookstoreState)) {
        let mut next = (*self.state).clone();
        f(&mut next);
        self.commit(next);
    }

    fn commit(&mut self, next: BookstoreState) {
        let snapshot = Arc::new(next);
        self.state = Arc::clone(&snapshot);
        self.hub.emit(snapshot);
    }
}

impl Default for StateContainer {
    fn default() -> Self {
        Self::new(CartStore::in_memory())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::storage::{KeyValueStore, MemoryStore};
    use bookstore_core::Money;

    fn gatsby() -> Book {
        Book {
            id: Some(1),
            category_id: 1,
            name: "The Great Gatsby".to_string(),
            author: "F. Scott Fitzgerald".to_string(),
            description: "A classic American novel".to_string(),
            value: Money::from_cents(1599),
            publish_date: "1925-04-10T00:00:00.000Z".to_string(),
        }
    }

    fn drain_count(sub: &mut Subscription<BookstoreState>) -> usize {
        let mut n = 0;
        while sub.try_next().is_some() {
            n += 1;
        }
        n
    }

    #[test]
    fn test_initial_state_is_empty() {
        let container = StateContainer::default();
        let state = container.snapshot();

        assert!(state.books.is_empty());
        assert!(!state.show_book_form);
        assert_eq!(state.book_form, Book::default());
        assert_eq!(state.category_form, Category::default());
        assert!(state.cart_items.is_empty());
    }

    #[test]
    fn test_set_then_get_books() {
        let mut container = StateContainer::default();
        container.set_books(vec![gatsby()]);
        assert_eq!(container.books(), &[gatsby()]);
    }

    #[test]
    fn test_reset_book_form_uses_today() {
        let mut container = StateContainer::default();
        container.set_book_form(gatsby());

        container.reset_book_form_on("2024-05-06");

        let form = container.book_form();
        assert!(form.name.is_empty());
        assert!(form.author.is_empty());
        assert!(form.description.is_empty());
        assert!(form.value.is_zero());
        assert_eq!(form.category_id, 0);
        assert_eq!(form.publish_date, "2024-05-06");
    }

    #[test]
    fn test_reset_book_form_defaults_to_utc_today() {
        let mut container = StateContainer::default();
        container.reset_book_form();
        assert_eq!(container.book_form().publish_date, today_utc());
    }

    #[test]
    fn test_reset_category_form() {
        let mut container = StateContainer::default();
        container.set_category_form(Category::named("Poetry"));
        container.reset_category_form();
        assert_eq!(container.category_form().name, "");
    }

    #[test]
    fn test_each_setter_emits_once() {
        let mut container = StateContainer::default();
        let mut sub = container.subscribe();
        assert_eq!(drain_count(&mut sub), 1);

        container.set_show_book_form(true);
        container.set_editing_book(Some(gatsby()));
        container.set_book_form(gatsby());
        assert_eq!(drain_count(&mut sub), 3);

        let _ = container.books();
        let _ = container.snapshot();
        assert_eq!(drain_count(&mut sub), 0);
    }

    #[test]
    fn test_update_emits_once_and_protects_cart_items() {
        let mut container = StateContainer::default();
        container.add_to_cart(&gatsby());
        let mut sub = container.subscribe();
        sub.latest();

        container.update(|s| {
            s.show_category_form = true;
            s.editing_category = Some(Category::named("Fiction"));
            s.cart_items.clear();
        });

        assert_eq!(drain_count(&mut sub), 1);
        assert!(container.show_category_form());
        assert_eq!(container.snapshot().cart_items.len(), 1);
    }

    #[test]
    fn test_update_book_in_books() {
        let mut container = StateContainer::default();
        let other = Book {
            id: Some(2),
            name: "1984".to_string(),
            ..gatsby()
        };
        container.set_books(vec![gatsby(), other.clone()]);

        let renamed = Book {
            name: "Gatsby".to_string(),
            ..gatsby()
        };
        container.update_book_in_books(1, renamed.clone());
        assert_eq!(container.books(), &[renamed.clone(), other.clone()]);

        let mut sub = container.subscribe();
        sub.latest();
        container.update_book_in_books(42, gatsby());
        assert_eq!(container.books(), &[renamed, other]);
        assert_eq!(drain_count(&mut sub), 1);
    }

    #[test]
    fn test_cart_proxy_keeps_mirror_in_sync() {
        let mut container = StateContainer::default();
        let mut sub = container.subscribe();
        sub.latest();

        container.add_to_cart(&gatsby());
        assert_eq!(container.cart_items(), container.snapshot().cart_items);

        container.update_cart_item_quantity(1, 4);
        assert_eq!(container.snapshot().cart_items[0].quantity, 4);

        container.remove_from_cart(1);
        assert!(container.snapshot().cart_items.is_empty());

        container.add_to_cart(&gatsby());
        container.clear_cart();
        assert_eq!(container.cart_items(), container.snapshot().cart_items);

        assert_eq!(drain_count(&mut sub), 5);
    }

    #[test]
    fn test_initial_mirror_comes_from_persisted_cart() {
        let store = MemoryStore::new();
        let storage: Arc<dyn KeyValueStore> = Arc::new(store.clone());

        let mut first = StateContainer::new(CartStore::new(Some(Arc::clone(&storage))));
        first.add_to_cart(&gatsby());

        let second = StateContainer::new(CartStore::new(Some(storage)));
        assert_eq!(second.snapshot().cart_items.len(), 1);
        assert_eq!(second.cart().item_count(), 1);
    }

    #[test]
    fn test_snapshots_are_immutable() {
        let mut container = StateContainer::default();
        let before = container.snapshot();

        container.set_books(vec![gatsby()]);

        assert!(before.books.is_empty());
        assert_eq!(container.snapshot().books.len(), 1);
    }

    #[test]
    fn test_dropped_subscription_is_pruned() {
        let mut container = StateContainer::default();
        let sub = container.subscribe();
        assert_eq!(container.subscriber_count(), 1);

        drop(sub);
        container.set_show_book_form(true);
        assert_eq!(container.subscriber_count(), 0);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let container = StateContainer::default();
        let json = serde_json::to_value(&*container.snapshot()).unwrap();
        assert!(json.get("filteredBooks").is_some());
        assert!(json.get("cartItems").is_some());
        assert!(json.get("showBookForm").is_some());
    }
}
