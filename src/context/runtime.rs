//! Tokio runtime handle as an execution context.

use std::time::Duration;

use tokio::{runtime::Handle, time};

use super::{ExecutionContext, Job};

/// Runs every job as a separate tokio task on the wrapped runtime.
#[derive(Clone, Debug)]
pub struct TokioContext {
    handle: Handle,
}

impl TokioContext {
    /// Wraps an explicit runtime handle.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Wraps the runtime the caller is running on.
    ///
    /// # Panics
    /// Panics when called outside of a tokio runtime, like [`Handle::current`].
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl ExecutionContext for TokioContext {
    fn run_now(&self, job: Job) {
        self.handle.spawn(async move { job() });
    }

    fn run_after(&self, delay: Duration, job: Job) {
        if delay.is_zero() {
            return self.run_now(job);
        }
        self.handle.spawn(async move {
            time::sleep(delay).await;
            job();
        });
    }
}
