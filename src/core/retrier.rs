//! # Retrier: starts retry sessions.
//!
//! The [`Retrier`] owns a delay [`Strategy`], the [`ExecutionContext`] sessions run
//! on, and the event [`Bus`]. It keeps no per-session state: every
//! [`Retrier::begin`] call starts an independent session, and one retrier can run
//! any number of sessions at once.
//!
//! ## Flow
//! ```text
//! begin(task, on_exhausted)
//!   ├─► publish SessionStarted
//!   ├─► !task.can_retry() ─► publish Exhausted ─► context.run_now(on_exhausted)
//!   └─► delay = strategy.delay_for(task.attempts())
//!       ├─► publish AttemptScheduled
//!       └─► context.run_after(delay, attempt)          (begin returns here)
//!
//! attempt (on the context):
//!   ├─► publish AttemptStarting
//!   └─► work.perform(completion) ─► completion.complete(output)
//!                                       └─► context.run_now(judge)
//! judge (on the context):
//!   ├─ valid    ─► publish OutputAccepted (session ends, nothing else fires)
//!   └─ invalid  ─► publish OutputRejected ─► begin-step with task.next_attempt()
//! ```
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retrykit::{Completion, Retrier, Strategy, Task, TokioContext};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let retrier = Retrier::new(
//!         Strategy::FixedDelay(Duration::from_millis(10)),
//!         TokioContext::current(),
//!     );
//!
//!     let (tx, rx) = tokio::sync::oneshot::channel();
//!     let task = Task::new(3, |done: Completion<u16>| done.complete(503), |status| *status == 200)?;
//!
//!     retrier.begin(task, Some(Box::new(move || {
//!         let _ = tx.send(());
//!     })));
//!
//!     rx.await?; // fired after three rejected attempts
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    context::ExecutionContext,
    core::{
        builder::RetrierBuilder,
        session::{OnExhausted, Session, Shared},
    },
    events::{Bus, Event},
    policies::Strategy,
    tasks::Task,
};

static SESSION_SEQ: AtomicU64 = AtomicU64::new(1);

/// Strategy-driven retry orchestrator.
///
/// Cheap to clone; clones share strategy, context and bus.
#[derive(Clone)]
pub struct Retrier {
    shared: Arc<Shared>,
}

/// Handle to a running session.
///
/// Dropping the handle does **not** cancel the session.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    id: u64,
    token: CancellationToken,
}

impl SessionHandle {
    /// Session id, as carried by the session's events.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Stops scheduling: a pending attempt is skipped, no further attempt is
    /// scheduled and the exhaustion callback will not fire. Work already running
    /// is not interrupted.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` once [`cancel`](Self::cancel) was called.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Retrier {
    /// Creates a retrier with the given strategy and execution context.
    pub fn new(strategy: Strategy, context: impl ExecutionContext) -> Self {
        Self::from_parts(
            strategy,
            Arc::new(context),
            Bus::new(Config::default().bus_capacity_clamped()),
        )
    }

    /// Creates a retrier using [`Strategy::Immediate`].
    pub fn immediate(context: impl ExecutionContext) -> Self {
        Self::new(Strategy::Immediate, context)
    }

    /// Returns a builder configured from `cfg`.
    pub fn builder(cfg: Config) -> RetrierBuilder {
        RetrierBuilder::new(cfg)
    }

    pub(crate) fn from_parts(
        strategy: Strategy,
        context: Arc<dyn ExecutionContext>,
        bus: Bus,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                strategy,
                context,
                bus,
            }),
        }
    }

    /// The delay strategy sessions run with.
    pub fn strategy(&self) -> &Strategy {
        &self.shared.strategy
    }

    /// Creates a receiver for events of all sessions started from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.shared.bus.subscribe()
    }

    /// Starts retrying `task`.
    ///
    /// Returns right after the first step is scheduled. `on_exhausted` runs on the
    /// execution context once the attempt limit is reached without an accepted
    /// output (immediately scheduled when `task` cannot retry at all). A session
    /// that ends with an accepted output fires nothing.
    pub fn begin<O>(&self, task: Task<O>, on_exhausted: Option<OnExhausted>) -> SessionHandle
    where
        O: Send + 'static,
    {
        let id = SESSION_SEQ.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();

        Session::new(
            id,
            Arc::clone(&self.shared),
            token.clone(),
            task,
            on_exhausted,
        )
        .start();

        SessionHandle { id, token }
    }
}

impl std::fmt::Debug for Retrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retrier")
            .field("strategy", &self.shared.strategy)
            .finish_non_exhaustive()
    }
}
