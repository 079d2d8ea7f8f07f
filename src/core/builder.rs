use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;

use crate::{
    config::Config,
    context::ExecutionContext,
    events::Bus,
    subscribers::{Subscribe, SubscriberSet},
};

use super::retrier::Retrier;

/// Builder for constructing a [`Retrier`] with subscribers.
pub struct RetrierBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl RetrierBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive session events through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the retrier on `context`.
    ///
    /// With subscribers configured, this spawns their workers and the bus listener,
    /// so it must then be called from within a tokio runtime. The listener and the
    /// workers stop once the retrier and every session it started are dropped.
    pub fn build(self, context: impl ExecutionContext) -> Retrier {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());

        let set = SubscriberSet::new(self.subscribers, &bus);
        if !set.is_empty() {
            subscriber_listener(&bus, set);
        }

        Retrier::from_parts(self.cfg.strategy, Arc::new(context), bus)
    }
}

/// Subscribes to the bus and forwards events to the subscriber set (fire-and-forget).
fn subscriber_listener(bus: &Bus, set: SubscriberSet) {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => set.emit(&ev),
                Err(RecvError::Lagged(skipped)) => {
                    eprintln!("[retrykit] subscriber listener lagged; skipped {skipped} events");
                }
                Err(RecvError::Closed) => break,
            }
        }
        set.shutdown().await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::TokioContext,
        events::{Event, EventKind},
        policies::Strategy,
        tasks::{Completion, Task},
    };
    use async_trait::async_trait;
    use std::sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    };
    use std::time::Duration;
    use tokio::sync::Notify;

    struct Collector {
        kinds: Mutex<Vec<EventKind>>,
        done: Notify,
    }

    #[async_trait]
    impl Subscribe for Collector {
        async fn on_event(&self, ev: &Event) {
            self.kinds.lock().unwrap().push(ev.kind);
            if ev.kind.is_terminal() {
                self.done.notify_one();
            }
        }

        fn name(&self) -> &'static str {
            "collector"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_receive_session_events() {
        let collector = Arc::new(Collector {
            kinds: Mutex::new(Vec::new()),
            done: Notify::new(),
        });
        let cfg = Config::default().with_strategy(Strategy::FixedDelay(Duration::from_millis(5)));
        let retrier = Retrier::builder(cfg)
            .with_subscribers(vec![collector.clone() as Arc<dyn Subscribe>])
            .build(TokioContext::current());

        let task = Task::new(2, |done: Completion<i32>| done.complete(0), |_| false).unwrap();
        retrier.begin(task, None);
        collector.done.notified().await;

        let kinds = collector.kinds.lock().unwrap().clone();
        assert_eq!(kinds.first(), Some(&EventKind::SessionStarted));
        assert_eq!(kinds.last(), Some(&EventKind::Exhausted));
        assert_eq!(
            kinds
                .iter()
                .filter(|k| **k == EventKind::OutputRejected)
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_builder_uses_config_strategy() {
        let cfg = Config::default().with_strategy(Strategy::FixedDelay(Duration::from_secs(1)));
        let retrier = Retrier::builder(cfg).build(TokioContext::current());
        assert_eq!(retrier.strategy().delay_for(9), Duration::from_secs(1));
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl Subscribe for DropFlag {
        async fn on_event(&self, _ev: &Event) {}
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_retrier_releases_subscribers() {
        let dropped = Arc::new(AtomicBool::new(false));
        let retrier = Retrier::builder(Config::default())
            .with_subscribers(vec![Arc::new(DropFlag(dropped.clone())) as Arc<dyn Subscribe>])
            .build(TokioContext::current());

        let task = Task::new(1, |done: Completion<i32>| done.complete(0), |_| true).unwrap();
        retrier.begin(task, None);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!dropped.load(Ordering::SeqCst));

        drop(retrier);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(dropped.load(Ordering::SeqCst));
    }
}
