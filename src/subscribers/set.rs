//! # SubscriberSet: non-blocking fan-out over multiple subscribers
//!
//! [`SubscriberSet`] distributes each [`Event`] to multiple subscribers
//! **without awaiting** their processing.
//!
//! ## What it guarantees
//! - `emit(&Event)` returns immediately.
//! - Per-subscriber FIFO (queue order).
//! - Panics inside subscribers are caught and reported (isolation).
//!
//! ## What it does **not** guarantee
//! - No global ordering across different subscribers.
//! - No redelivery on per-subscriber queue overflow.
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        │                        (Arc-clone per subscriber)
//!        ├────────────────► [queue S1] ─► worker S1 ─► on_event()
//!        ├────────────────► [queue S2] ─► worker S2 ─► on_event()
//!        └────────────────► [queue SN] ─► worker SN ─► on_event()
//! ```

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::{Bus, Event, WeakBus};

use super::Subscribe;

/// Per-subscriber channel with metadata.
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Composite fan-out with per-subscriber bounded queues and worker tasks.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<JoinHandle<()>>,
    bus: WeakBus,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker per subscriber.
    ///
    /// Overflow and panic reports go to `bus` through a weak handle, so the set
    /// never keeps the bus open. Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: &Bus) -> Self {
        let bus = bus.downgrade();
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let cap = sub.queue_capacity().max(1);
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(cap);
            let worker_bus = bus.clone();

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = sub.on_event(ev.as_ref());
                    if let Err(panic) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        let info = panic_message(panic.as_ref());
                        eprintln!("[retrykit] subscriber '{name}' panicked: {info}");
                        if !ev.is_subscriber_event() {
                            worker_bus.publish(Event::subscriber_panicked(name, info));
                        }
                    }
                }
            });

            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(handle);
        }

        Self {
            channels,
            workers,
            bus,
        }
    }

    /// Fan-out one event to all subscribers (non-blocking).
    ///
    /// If a subscriber's queue is **full** or **closed**, the event is dropped for it
    /// and a `SubscriberOverflow` event is published. Overflow of a subscriber event
    /// is only logged, so a stuck subscriber cannot cause an overflow storm.
    pub fn emit(&self, event: &Event) {
        let ev = Arc::new(event.clone());
        for channel in &self.channels {
            let reason = match channel.sender.try_send(Arc::clone(&ev)) {
                Ok(()) => continue,
                Err(mpsc::error::TrySendError::Full(_)) => "full",
                Err(mpsc::error::TrySendError::Closed(_)) => "closed",
            };
            eprintln!(
                "[retrykit] subscriber '{}' dropped event seq={}: queue {reason}",
                channel.name, ev.seq
            );
            if !ev.is_subscriber_event() {
                self.bus
                    .publish(Event::subscriber_overflow(channel.name, reason));
            }
        }
    }

    /// Graceful shutdown: close all queues and await worker completion.
    pub async fn shutdown(self) {
        drop(self.channels);
        for h in self.workers {
            let _ = h.await;
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Recorder {
        seen: Arc<Mutex<Vec<EventKind>>>,
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, ev: &Event) {
            self.seen.lock().unwrap().push(ev.kind);
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    struct Panicker;

    #[async_trait]
    impl Subscribe for Panicker {
        async fn on_event(&self, _ev: &Event) {
            panic!("boom");
        }

        fn name(&self) -> &'static str {
            "panicker"
        }
    }

    #[tokio::test]
    async fn test_emit_delivers_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let set = SubscriberSet::new(
            vec![Arc::new(Recorder { seen: seen.clone() })],
            &Bus::new(8),
        );
        assert!(!set.is_empty());

        set.emit(&Event::new(EventKind::SessionStarted));
        set.emit(&Event::new(EventKind::Exhausted));
        set.shutdown().await;

        assert_eq!(
            *seen.lock().unwrap(),
            vec![EventKind::SessionStarted, EventKind::Exhausted]
        );
    }

    #[tokio::test]
    async fn test_panic_is_isolated_and_reported() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let set = SubscriberSet::new(
            vec![
                Arc::new(Panicker),
                Arc::new(Recorder { seen: seen.clone() }),
            ],
            &bus,
        );

        set.emit(&Event::new(EventKind::OutputAccepted));
        set.shutdown().await;

        let ev = rx.recv().await.expect("panic event");
        assert_eq!(ev.kind, EventKind::SubscriberPanicked);
        assert_eq!(ev.task.as_deref(), Some("panicker"));
        assert_eq!(ev.reason.as_deref(), Some("boom"));
        assert_eq!(*seen.lock().unwrap(), vec![EventKind::OutputAccepted]);
    }
}
