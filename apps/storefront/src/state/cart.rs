//! # Cart Store
//!
//! Owns the shopping cart's line items, persists them to the key/value slot
//! and computes the derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Operation                 In-memory change            Persisted?      │
//! │  ─────────                 ────────────────            ──────────      │
//! │                                                                         │
//! │  add(book) ──────────────► qty += 1 or push {book,1}   yes             │
//! │                                                                         │
//! │  set_quantity(id, n > 0) ► items[i].qty = n            if found        │
//! │  set_quantity(id, n ≤ 0) ► same as remove(id)          yes             │
//! │                                                                         │
//! │  remove(id) ─────────────► retain(id != ..)            yes, always     │
//! │                                                                         │
//! │  clear() ────────────────► items = []                  yes ("[]")      │
//! │                                                                         │
//! │  items() / totals() ─────► (read only)                 no              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence Is Best-Effort
//! A failed load (missing slot, corrupt JSON, unreadable store) yields an
//! empty cart. A failed save leaves the in-memory change in place. Both are
//! logged with `warn!` and never returned to the caller.

use std::fmt;
use std::sync::Arc;

use bookstore_core::{Book, CartLineItem, Money, TaxRate};
use serde::Serialize;
use tracing::{debug, warn};

use super::storage::KeyValueStore;

/// Slot the cart is persisted under.
pub const STORAGE_KEY: &str = "bookstore-cart";

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct line items.
    pub line_count: usize,
    /// Sum of quantities.
    pub item_count: i64,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

// =============================================================================
// Cart Store
// =============================================================================

/// The canonical cart.
///
/// ## Invariants
/// - At most one line item per book id
/// - Every line's quantity is ≥ 1 (anything lower removes the line)
/// - Books without an id never match an existing line, so each add of such
///   a book appends a fresh line
pub struct CartStore {
    items: Vec<CartLineItem>,
    storage: Option<Arc<dyn KeyValueStore>>,
    tax_rate: TaxRate,
}

impl CartStore {
    /// Creates a cart backed by `storage` at the standard 10% tax rate,
    /// restoring whatever the slot holds.
    ///
    /// ## Usage
    /// ```rust
    /// use std::sync::Arc;
    /// use bookstore_storefront::state::{CartStore, MemoryStore};
    ///
    /// let cart = CartStore::new(Some(Arc::new(MemoryStore::new())));
    /// assert!(cart.is_empty());
    /// ```
    pub fn new(storage: Option<Arc<dyn KeyValueStore>>) -> Self {
        Self::with_tax_rate(storage, TaxRate::STANDARD)
    }

    /// Like [`CartStore::new`] with an explicit tax rate.
    pub fn with_tax_rate(storage: Option<Arc<dyn KeyValueStore>>, tax_rate: TaxRate) -> Self {
        let items = load_items(storage.as_deref());
        CartStore {
            items,
            storage,
            tax_rate,
        }
    }

    /// A cart that never touches storage.
    pub fn in_memory() -> Self {
        Self::new(None)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// A copy of the line items. Mutating it doesn't affect the cart.
    pub fn items(&self) -> Vec<CartLineItem> {
        self.items.clone()
    }

    /// Borrowed view of the line items.
    pub fn lines(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, line| count.saturating_add(line.quantity))
    }

    /// Σ value × quantity.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    pub fn tax(&self) -> Money {
        self.subtotal().calculate_tax(self.tax_rate)
    }

    pub fn total(&self) -> Money {
        let subtotal = self.subtotal();
        subtotal + subtotal.calculate_tax(self.tax_rate)
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Whether a line exists for `book_id`.
    pub fn contains(&self, book_id: i64) -> bool {
        self.position(book_id).is_some()
    }

    /// Quantity held for `book_id`, or 0.
    pub fn quantity_of(&self, book_id: i64) -> i64 {
        self.position(book_id)
            .map(|i| self.items[i].quantity)
            .unwrap_or(0)
    }

    /// All totals in one pass-friendly value.
    pub fn totals(&self) -> CartTotals {
        let subtotal = self.subtotal();
        let tax = subtotal.calculate_tax(self.tax_rate);
        CartTotals {
            line_count: self.line_count(),
            item_count: self.item_count(),
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one copy of `book`.
    pub fn add(&mut self, book: &Book) {
        let existing = book.id.and_then(|id| self.position(id));

        match existing {
            Some(i) => {
                self.items[i].quantity = self.items[i].quantity.saturating_add(1);
                debug!(book_id = ?book.id, quantity = self.items[i].quantity, "Cart line incremented");
            }
            None => {
                if book.id.is_none() {
                    warn!(name = %book.name, "Adding a book without an id; it gets its own line");
                }
                self.items.push(CartLineItem::single(book.clone()));
                debug!(book_id = ?book.id, lines = self.items.len(), "Cart line added");
            }
        }

        self.save();
    }

    /// Overwrites the quantity for `book_id`. Zero or less removes the line.
    /// A missing id changes nothing and isn't persisted.
    pub fn set_quantity(&mut self, book_id: i64, quantity: i64) {
        if quantity <= 0 {
            self.remove(book_id);
            return;
        }

        match self.position(book_id) {
            Some(i) => {
                self.items[i].quantity = quantity;
                debug!(book_id, quantity, "Cart quantity updated");
                self.save();
            }
            None => debug!(book_id, "Quantity change for a book not in the cart ignored"),
        }
    }

    /// Drops the line for `book_id`, if any. Always persists.
    pub fn remove(&mut self, book_id: i64) {
        let before = self.items.len();
        self.items.retain(|i| i.book.id != Some(book_id));
        debug!(book_id, removed = before - self.items.len(), "Cart line removed");
        self.save();
    }

    /// Empties the cart and persists the empty list.
    pub fn clear(&mut self) {
        self.items.clear();
        debug!("Cart cleared");
        self.save();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn position(&self, book_id: i64) -> Option<usize> {
        self.items.iter().position(|i| i.book.id == Some(book_id))
    }

    fn save(&self) {
        let Some(storage) = self.storage.as_deref() else {
            return;
        };

        let json = match serde_json::to_string(&self.items) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart; skipping save");
                return;
            }
        };

        if let Err(e) = storage.set(STORAGE_KEY, &json) {
            warn!(error = %e, "Failed to persist cart; keeping in-memory changes");
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("persistent", &self.storage.is_some())
            .field("tax_rate", &self.tax_rate)
            .finish()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Reads the persisted cart. Anything other than a valid list is empty.
fn load_items(storage: Option<&dyn KeyValueStore>) -> Vec<CartLineItem> {
    let Some(storage) = storage else {
        return Vec::new();
    };

    let raw = match storage.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "Cart storage unreadable; starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
        Ok(items) => {
            debug!(lines = items.len(), "Cart restored from storage");
            items
        }
        Err(e) => {
            warn!(error = %e, "Persisted cart is corrupt; starting empty");
            Vec::new()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
