//! # retrykit
//!
//! **retrykit** re-runs a unit of asynchronous work until its output passes a
//! validation predicate or an attempt limit is reached, waiting between attempts
//! according to a delay strategy.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   Task<O>                          Retrier
//!   ├─ work: Work<O>                 ├─ strategy: Strategy (Immediate / FixedDelay / Custom)
//!   ├─ validation: Validate<O>       ├─ context: ExecutionContext (TokioContext / SerialQueue / yours)
//!   ├─ maximum_attempts              └─ bus: Bus ──► SubscriberSet ──► Subscribe (LogWriter, ...)
//!   └─ attempts (advanced by replacement)
//!
//!   retrier.begin(task, on_exhausted) ─► SessionHandle
//! ```
//!
//! ### Lifecycle
//! ```text
//! begin(task)
//!   loop (each step re-entered through the context) {
//!     ├─► !task.can_retry()           ─► Exhausted: run_now(on_exhausted), stop
//!     ├─► delay = strategy.delay_for(task.attempts())
//!     ├─► run_after(delay):   work.perform(completion)
//!     └─► on completion (run_now):
//!            ├─ validation(output) == true  ─► stop silently
//!            └─ validation(output) == false ─► task = task.next_attempt(), continue
//!   }
//! ```
//!
//! Success is silent: the only terminal signal the retrier itself delivers is
//! exhaustion. Callers observe success through their own work.
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                          |
//! |-------------------|-------------------------------------------------------------|---------------------------------------------|
//! | **Tasks**         | Work, validation and attempt bookkeeping                    | [`Task`], [`Work`], [`Completion`], [`Validate`] |
//! | **Strategies**    | Delay before each attempt, plus an exponential helper       | [`Strategy`], [`BackoffPolicy`], [`JitterPolicy`] |
//! | **Contexts**      | Where attempts and callbacks run                            | [`ExecutionContext`], [`TokioContext`], [`SerialQueue`] |
//! | **Retrier**       | Starts sessions, cancellation                               | [`Retrier`], [`SessionHandle`]              |
//! | **Subscriber API**| Hook into session events                                    | [`Subscribe`], [`Event`], [`EventKind`]     |
//! | **Errors**        | Construction-time validation                                | [`RetryError`]                              |
//! | **Configuration** | Defaults for retrier and tasks                              | [`Config`]                                  |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retrykit::{BackoffPolicy, Completion, Config, Retrier, Strategy, Task, TokioContext};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config::default().with_strategy(Strategy::backoff(BackoffPolicy {
//!         first: Duration::from_millis(5),
//!         ..BackoffPolicy::default()
//!     }));
//!     let retrier = Retrier::builder(cfg).build(TokioContext::current());
//!
//!     let (tx, rx) = tokio::sync::oneshot::channel();
//!     let task = Task::new(
//!         4,
//!         move |done: Completion<u16>| done.complete(503),
//!         |status| *status == 200,
//!     )?
//!     .with_name("health-check");
//!
//!     retrier.begin(task, Some(Box::new(move || {
//!         let _ = tx.send("gave up");
//!     })));
//!
//!     assert_eq!(rx.await?, "gave up");
//!     Ok(())
//! }
//! ```
mod config;
mod context;
mod core;
mod error;
mod events;
mod policies;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use config::Config;
pub use context::{ExecutionContext, Job, SerialQueue, TokioContext};
pub use core::{OnExhausted, Retrier, RetrierBuilder, SessionHandle};
pub use error::RetryError;
pub use events::{Event, EventKind};
pub use policies::{BackoffPolicy, DelayFn, JitterPolicy, Strategy};
pub use subscribers::{Subscribe, SubscriberSet};
pub use tasks::{AsyncWork, Completion, Task, Validate, Work, WorkFn};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
