//! # Cart Controller
//!
//! The cart page: per-line quantity edits, removal, totals, and checkout.
//!
//! ## Checkout
//! ```text
//! checkout()
//!    │
//!    ├── confirm "Confirm Purchase" (total formatted to cents)
//!    │      cancelled ──► nothing changes
//!    │
//!    └── confirmed ──► "Order Completed!" ──► clear_cart() (persists "[]")
//! ```

use bookstore_core::CartLineItem;
use tracing::{debug, info};

use super::StateView;
use crate::state::{BookstoreState, CartTotals};
use crate::ui::ConfirmationOptions;
use crate::Storefront;

#[derive(Debug)]
pub struct CartController {
    view: StateView,
}

impl CartController {
    pub fn new(store: &mut Storefront) -> Self {
        CartController {
            view: StateView::attach(store),
        }
    }

    pub fn view(&mut self) -> &BookstoreState {
        self.view.sync()
    }

    pub fn dispose(self) {
        self.view.dispose();
    }

    /// The line at `index` as this screen last saw it.
    fn line(&mut self, index: usize) -> Option<CartLineItem> {
        self.view.sync().cart_items.get(index).cloned()
    }

    /// Sets the quantity of the line at `index`. Only positive quantities on
    /// lines with a book id are applied.
    pub fn update_quantity(&mut self, store: &mut Storefront, index: usize, quantity: i64) -> bool {
        if quantity <= 0 {
            return false;
        }
        let Some(line) = self.line(index) else {
            return false;
        };
        let Some(book_id) = line.book.id else {
            debug!(index, "Line has no book id; quantity left alone");
            return false;
        };

        store.state_mut().update_cart_item_quantity(book_id, quantity);

        let name = if line.book.name.is_empty() {
            "Item"
        } else {
            line.book.name.as_str()
        };
        store.notifier().info(
            "Quantity Updated",
            &format!("Quantity of \"{}\" updated to {}.", name, quantity),
        );
        true
    }

    /// Asks, then drops the line at `index`.
    pub async fn remove(&mut self, store: &mut Storefront, index: usize) -> bool {
        let Some(line) = self.line(index) else {
            return false;
        };

        let answer = store
            .confirmer()
            .confirm(ConfirmationOptions::delete(Some(line.book.name.as_str())))
            .await;
        if !answer.confirmed {
            return false;
        }

        let Some(book_id) = line.book.id else {
            debug!(index, "Line has no book id; nothing removed");
            return false;
        };

        store.state_mut().remove_from_cart(book_id);
        store.notifier().success(
            "Removed from Cart",
            &format!("\"{}\" has been removed from your cart.", line.book.name),
        );
        true
    }

    pub fn totals(&self, store: &Storefront) -> CartTotals {
        store.state().cart().totals()
    }

    /// Asks to complete the purchase; on yes, thanks the user and empties
    /// the cart.
    pub async fn checkout(&mut self, store: &mut Storefront) -> bool {
        let total = store.state().cart().total();

        let options = ConfirmationOptions::custom_action(
            "Confirm Purchase",
            format!(
                "Are you sure you want to complete your purchase totaling {}? This will clear your cart.",
                total
            ),
            "Purchase",
        );
        if !store.confirmer().confirm(options).await.confirmed {
            return false;
        }

        store.notifier().success(
            "Order Completed!",
            &format!(
                "Thank you for your purchase! Your order totaling {} has been processed successfully.",
                total
            ),
        );
        store.state_mut().clear_cart();
        info!(%total, "Order completed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support::*;
    use crate::state::{KeyValueStore, STORAGE_KEY};
    use crate::ui::NotificationKind;
    use bookstore_core::{Book, Money};

    fn nineteen_ninety_nine() -> Book {
        Book {
            value: Money::from_cents(1999),
            ..gatsby()
        }
    }

    fn twenty_nine_ninety_nine() -> Book {
        Book {
            value: Money::from_cents(2999),
            ..nineteen_eighty_four()
        }
    }

    #[tokio::test]
    async fn test_update_quantity_notifies() {
        let mut h = harness(true).await;
        h.store.state_mut().add_to_cart(&gatsby());
        let mut cart = CartController::new(&mut h.store);

        assert!(cart.update_quantity(&mut h.store, 0, 3));

        assert_eq!(cart.view().cart_items[0].quantity, 3);
        let last = h.notifier.last().unwrap();
        assert_eq!(last.kind, NotificationKind::Info);
        assert_eq!(last.message, "Quantity of \"The Great Gatsby\" updated to 3.");
    }

    #[tokio::test]
    async fn test_update_quantity_ignores_non_positive_and_bad_index() {
        let mut h = harness(true).await;
        h.store.state_mut().add_to_cart(&gatsby());
        let mut cart = CartController::new(&mut h.store);

        assert!(!cart.update_quantity(&mut h.store, 0, 0));
        assert!(!cart.update_quantity(&mut h.store, 5, 2));

        assert_eq!(cart.view().cart_items[0].quantity, 1);
        assert!(h.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_remove_after_confirmation() {
        let mut h = harness(true).await;
        h.store.state_mut().add_to_cart(&gatsby());
        let mut cart = CartController::new(&mut h.store);

        assert!(cart.remove(&mut h.store, 0).await);

        assert!(cart.view().cart_items.is_empty());
        assert_eq!(h.confirmer.asked()[0].title, "Confirm Deletion");
        assert_eq!(
            h.notifier.last().unwrap().message,
            "\"The Great Gatsby\" has been removed from your cart."
        );
    }

    #[tokio::test]
    async fn test_remove_declined_keeps_line() {
        let mut h = harness(false).await;
        h.store.state_mut().add_to_cart(&gatsby());
        let mut cart = CartController::new(&mut h.store);

        assert!(!cart.remove(&mut h.store, 0).await);
        assert_eq!(cart.view().cart_items.len(), 1);
    }

    #[tokio::test]
    async fn test_totals() {
        let mut h = harness(true).await;
        h.store.state_mut().add_to_cart(&nineteen_ninety_nine());
        h.store.state_mut().add_to_cart(&nineteen_ninety_nine());
        h.store.state_mut().add_to_cart(&twenty_nine_ninety_nine());
        let cart = CartController::new(&mut h.store);

        let totals = cart.totals(&h.store);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.subtotal.to_decimal(), 69.97);
        assert_eq!(totals.tax.to_decimal(), 6.997);
        assert_eq!(totals.total.to_decimal(), 76.967);
    }

    #[tokio::test]
    async fn test_checkout_clears_cart() {
        let mut h = harness(true).await;
        h.store.state_mut().add_to_cart(&nineteen_ninety_nine());
        h.store.state_mut().add_to_cart(&nineteen_ninety_nine());
        h.store.state_mut().add_to_cart(&twenty_nine_ninety_nine());
        let mut cart = CartController::new(&mut h.store);

        assert!(cart.checkout(&mut h.store).await);

        assert_eq!(
            h.confirmer.asked()[0].message,
            "Are you sure you want to complete your purchase totaling $76.97? This will clear your cart."
        );
        let last = h.notifier.last().unwrap();
        assert_eq!(last.title, "Order Completed!");
        assert!(last.message.contains("$76.97"));
        assert!(cart.view().cart_items.is_empty());
        assert_eq!(h.storage.get(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_checkout_declined() {
        let mut h = harness(false).await;
        h.store.state_mut().add_to_cart(&gatsby());
        let mut cart = CartController::new(&mut h.store);

        assert!(!cart.checkout(&mut h.store).await);
        assert_eq!(cart.view().cart_items.len(), 1);
        assert!(h.notifier.sent().is_empty());
    }
}
