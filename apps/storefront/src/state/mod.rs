//! # Storefront State
//!
//! - [`cart`] - Cart Store: line items, totals, persistence
//! - [`bookstore`] - Application State Container and its snapshots
//! - [`subscription`] - Snapshot delivery to observers
//! - [`storage`] - Key/value persistence slot

pub mod bookstore;
pub mod cart;
pub mod storage;
pub mod subscription;

pub use bookstore::{BookstoreState, StateContainer};
pub use cart::{CartStore, CartTotals, STORAGE_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};
pub use subscription::Subscription;
