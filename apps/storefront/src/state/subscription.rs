//! # Snapshot Subscriptions
//!
//! Fan-out of state snapshots to any number of observers.
//!
//! ## Delivery Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subscribe() ──► channel created, current snapshot sent immediately    │
//! │                                                                         │
//! │  every emit ──► Arc<snapshot> cloned into each live sender              │
//! │                 senders whose receiver is gone are dropped              │
//! │                                                                         │
//! │  Subscription dropped / unsubscribe() ──► receiver closed, pruned on    │
//! │                                           the next emit                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Channels are unbounded so an emit never blocks the mutating caller. A slow
//! observer that only cares about the newest state uses [`Subscription::latest`].

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Sending half, owned by the state container.
#[derive(Debug)]
pub(crate) struct Broadcaster<T> {
    senders: Vec<UnboundedSender<Arc<T>>>,
}

impl<T> Default for Broadcaster<T> {
    fn default() -> Self {
        Broadcaster {
            senders: Vec::new(),
        }
    }
}

impl<T> Broadcaster<T> {
    /// Registers a new observer and hands it `current` right away.
    pub(crate) fn subscribe(&mut self, current: Arc<T>) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        // The receiver is alive in this scope, so the send can't fail.
        let _ = tx.send(current);
        self.senders.push(tx);
        Subscription { rx }
    }

    /// Delivers `snapshot` to every live observer.
    pub(crate) fn emit(&mut self, snapshot: Arc<T>) {
        self.senders
            .retain(|tx| tx.send(Arc::clone(&snapshot)).is_ok());
    }

    /// Observers that haven't gone away.
    pub(crate) fn live_count(&self) -> usize {
        self.senders.iter().filter(|tx| !tx.is_closed()).count()
    }
}

/// Receiving half handed to an observer.
///
/// ## Example
/// ```rust,ignore
/// let mut sub = container.subscribe();
/// let initial = sub.try_next().unwrap();
///
/// container.add_to_cart(&book);
/// let after = sub.latest().unwrap();
/// assert_eq!(after.cart_items.len(), initial.cart_items.len() + 1);
/// ```
#[derive(Debug)]
pub struct Subscription<T> {
    rx: UnboundedReceiver<Arc<T>>,
}

impl<T> Subscription<T> {
    /// Next queued snapshot, without waiting.
    pub fn try_next(&mut self) -> Option<Arc<T>> {
        match self.rx.try_recv() {
            Ok(snapshot) => Some(snapshot),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drains the queue and returns only the newest snapshot.
    pub fn latest(&mut self) -> Option<Arc<T>> {
        let mut newest = None;
        while let Some(snapshot) = self.try_next() {
            newest = Some(snapshot);
        }
        newest
    }

    /// Waits for the next snapshot. `None` once the container is gone.
    pub async fn next(&mut self) -> Option<Arc<T>> {
        self.rx.recv().await
    }

    /// Stops delivery. Dropping the subscription does the same.
    pub fn unsubscribe(mut self) {
        self.rx.close();
    }
}
