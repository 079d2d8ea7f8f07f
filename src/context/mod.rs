//! # Execution contexts.
//!
//! An [`ExecutionContext`] is the host-provided place where a retrier runs
//! everything it schedules: delayed attempts, validation and the exhaustion
//! callback. It has exactly two primitives, "run this now" and "run this after
//! a delay", and must never run a job inline in the caller's stack.
//!
//! ## Provided contexts
//! - [`TokioContext`]: spawns every job as a tokio task on a runtime handle
//!   (jobs of different sessions may run in parallel on a multi-thread runtime).
//! - [`SerialQueue`]: one FIFO worker executing jobs one at a time, the
//!   equivalent of a serial dispatch queue; [`SerialQueue::is_current`] tells
//!   whether the calling code runs on it.
//!
//! ## Rules
//! - Delays are timer-driven (`tokio::time::sleep` in a spawned task); nothing blocks.
//! - A context is shared and externally owned; the retrier only holds an `Arc` to it.

mod runtime;
mod serial;

use std::sync::Arc;
use std::time::Duration;

pub use runtime::TokioContext;
pub use serial::SerialQueue;

/// A unit of scheduled work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Scheduling facility used by a [`Retrier`](crate::Retrier).
pub trait ExecutionContext: Send + Sync + 'static {
    /// Runs `job` as soon as possible, never inline in the calling stack.
    fn run_now(&self, job: Job);

    /// Runs `job` once `delay` has elapsed.
    fn run_after(&self, delay: Duration, job: Job);
}

impl<C: ExecutionContext + ?Sized> ExecutionContext for Arc<C> {
    fn run_now(&self, job: Job) {
        (**self).run_now(job)
    }

    fn run_after(&self, delay: Duration, job: Job) {
        (**self).run_after(delay, job)
    }
}
