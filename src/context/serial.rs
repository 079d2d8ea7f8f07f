//! # SerialQueue: single-worker FIFO context.
//!
//! Every job runs on one dedicated tokio task, strictly one after another.
//! Delayed jobs are parked in a timer task and enqueued when their delay expires.
//!
//! ```text
//! run_now(job) ───────────────────────────────┐
//!                                             ▼
//! run_after(d, job) ─► sleep(d) ─► enqueue ─► [mpsc] ─► worker (scope: queue id) ─► job()
//! ```
//!
//! The worker runs inside a task-local scope carrying the queue id, which is what
//! [`SerialQueue::is_current`] inspects. A panicking job is reported and the worker
//! moves on to the next one.

use std::borrow::Cow;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::{runtime::Handle, sync::mpsc, time};

use super::{ExecutionContext, Job};

static QUEUE_SEQ: AtomicU64 = AtomicU64::new(1);

tokio::task_local! {
    static CURRENT_QUEUE: u64;
}

struct Inner {
    id: u64,
    label: Cow<'static, str>,
    tx: mpsc::UnboundedSender<Job>,
    handle: Handle,
}

/// Serial execution context; cheap to clone, clones share the same worker.
///
/// The worker stops once every clone and every pending delayed job is gone.
#[derive(Clone)]
pub struct SerialQueue {
    inner: Arc<Inner>,
}

impl SerialQueue {
    /// Creates a queue whose worker runs on the current tokio runtime.
    ///
    /// # Panics
    /// Panics when called outside of a tokio runtime.
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self::with_handle(label, Handle::current())
    }

    /// Creates a queue whose worker runs on `handle`.
    pub fn with_handle(label: impl Into<Cow<'static, str>>, handle: Handle) -> Self {
        let id = QUEUE_SEQ.fetch_add(1, Ordering::Relaxed);
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();

        let label: Cow<'static, str> = label.into();
        let worker_label = label.clone();
        handle.spawn(CURRENT_QUEUE.scope(id, async move {
            while let Some(job) = rx.recv().await {
                if std::panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                    eprintln!("[retrykit] serial queue '{worker_label}': job panicked");
                }
            }
        }));

        Self {
            inner: Arc::new(Inner {
                id,
                label,
                tx,
                handle,
            }),
        }
    }

    /// Queue label, for diagnostics.
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Returns `true` when called from a job running on this queue.
    pub fn is_current(&self) -> bool {
        CURRENT_QUEUE
            .try_with(|id| *id == self.inner.id)
            .unwrap_or(false)
    }

    fn enqueue(tx: &mpsc::UnboundedSender<Job>, label: &str, job: Job) {
        if tx.send(job).is_err() {
            eprintln!("[retrykit] serial queue '{label}' is closed; job dropped");
        }
    }
}

impl ExecutionContext for SerialQueue {
    fn run_now(&self, job: Job) {
        Self::enqueue(&self.inner.tx, &self.inner.label, job);
    }

    fn run_after(&self, delay: Duration, job: Job) {
        if delay.is_zero() {
            return self.run_now(job);
        }
        let inner = Arc::clone(&self.inner);
        self.inner.handle.spawn(async move {
            time::sleep(delay).await;
            Self::enqueue(&inner.tx, &inner.label, job);
        });
    }
}

impl std::fmt::Debug for SerialQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialQueue")
            .field("id", &self.inner.id)
            .field("label", &self.inner.label)
            .finish()
    }
}
