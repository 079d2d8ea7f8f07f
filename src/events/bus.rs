//! # Event bus for retry events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`]. Sessions publish
//! into it from whatever execution context they run on; listeners (the retrier's
//! subscriber fan-out, or callers via [`Retrier::subscribe`](crate::Retrier::subscribe))
//! receive clones.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks and never fails.
//! - **Bounded capacity**: one ring buffer holds recent events for all receivers.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: events published with no receiver are dropped.
//! - **Closing**: the channel closes once every [`Bus`] clone is dropped; a
//!   [`WeakBus`] does not keep it open.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for retry events.
///
/// Cheap to clone (internally holds an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers, the event is dropped.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a receiver for events sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Returns a handle that can publish without keeping the channel open.
    pub fn downgrade(&self) -> WeakBus {
        WeakBus {
            tx: self.tx.downgrade(),
        }
    }
}

/// Publishing handle that does not keep the bus alive.
#[derive(Clone, Debug)]
pub struct WeakBus {
    tx: broadcast::WeakSender<Event>,
}

impl WeakBus {
    /// Publishes if the bus is still open; otherwise the event is dropped.
    pub fn publish(&self, ev: Event) {
        if let Some(tx) = self.tx.upgrade() {
            let _ = tx.send(ev);
        }
    }
}
