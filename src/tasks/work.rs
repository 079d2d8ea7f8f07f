//! # Work and its one-shot completion.
//!
//! A [`Work`] performs **one attempt** and reports its output through the
//! [`Completion`] it is handed. The completion is move-only and consumed by
//! [`Completion::complete`], so an attempt can report at most one output.
//!
//! Dropping a completion without completing it (including when the work panics)
//! abandons the attempt: the session ends instead of waiting forever.
//!
//! Two implementations are provided:
//! - [`WorkFn`] wraps a closure `Fn(Completion<O>)` (callback style);
//! - [`AsyncWork`] wraps a closure `Fn() -> Fut`, spawning a fresh future per
//!   attempt onto the current tokio runtime.
//!
//! ## Example
//! ```rust
//! use retrykit::{AsyncWork, Completion, Work, WorkFn};
//!
//! let callback = WorkFn::new(|done: Completion<u16>| done.complete(200));
//! let future = AsyncWork::new(|| async { 503u16 });
//! # let _ = (callback, future);
//! ```

use std::fmt;
use std::future::Future;

use tokio::runtime::Handle;

type Sink<O> = Box<dyn FnOnce(Option<O>) + Send + 'static>;

/// One-shot channel for an attempt's output.
#[must_use = "dropping a completion abandons the attempt"]
pub struct Completion<O> {
    sink: Option<Sink<O>>,
}

impl<O> Completion<O> {
    /// Creates a completion that forwards the output (or `None` when dropped) to `sink`.
    pub(crate) fn new<F>(sink: F) -> Self
    where
        F: FnOnce(Option<O>) + Send + 'static,
    {
        Self {
            sink: Some(Box::new(sink)),
        }
    }

    /// Reports the attempt's output.
    pub fn complete(mut self, output: O) {
        if let Some(sink) = self.sink.take() {
            sink(Some(output));
        }
    }
}

impl<O> Drop for Completion<O> {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink(None);
        }
    }
}

impl<O> fmt::Debug for Completion<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("pending", &self.sink.is_some())
            .finish()
    }
}

/// # One attempt of work.
///
/// Implementations must eventually complete (or drop) the completion.
/// `perform` runs on the retrier's execution context and should not block it.
pub trait Work<O>: Send + Sync + 'static {
    /// Starts one attempt.
    fn perform(&self, done: Completion<O>);
}

/// Callback-style work backed by a closure.
#[derive(Debug)]
pub struct WorkFn<F> {
    f: F,
}

impl<F> WorkFn<F> {
    /// Wraps a closure receiving the attempt's completion.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<O, F> Work<O> for WorkFn<F>
where
    F: Fn(Completion<O>) + Send + Sync + 'static,
{
    fn perform(&self, done: Completion<O>) {
        (self.f)(done)
    }
}

/// Future-backed work.
///
/// Wraps a closure that *creates* a new future per attempt; the future is spawned
/// on the runtime the attempt runs on and its output completes the attempt.
#[derive(Debug)]
pub struct AsyncWork<F> {
    f: F,
}

impl<F> AsyncWork<F> {
    /// Wraps a future factory.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<O, F, Fut> Work<O> for AsyncWork<F>
where
    O: Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = O> + Send + 'static,
{
    fn perform(&self, done: Completion<O>) {
        match Handle::try_current() {
            Ok(handle) => {
                let fut = (self.f)();
                handle.spawn(async move { done.complete(fut.await) });
            }
            Err(_) => {
                eprintln!("[retrykit] async work requires a tokio runtime; attempt abandoned");
                drop(done);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording() -> (Arc<Mutex<Vec<Option<u8>>>>, Completion<u8>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let done = Completion::new(move |out| sink.lock().unwrap().push(out));
        (seen, done)
    }

    #[test]
    fn test_complete_reports_once() {
        let (seen, done) = recording();
        done.complete(7);
        assert_eq!(*seen.lock().unwrap(), vec![Some(7)]);
    }

    #[test]
    fn test_drop_reports_abandoned() {
        let (seen, done) = recording();
        drop(done);
        assert_eq!(*seen.lock().unwrap(), vec![None]);
    }

    #[test]
    fn test_work_fn_forwards_completion() {
        let (seen, done) = recording();
        WorkFn::new(|done: Completion<u8>| done.complete(3)).perform(done);
        assert_eq!(*seen.lock().unwrap(), vec![Some(3)]);
    }

    #[test]
    fn test_async_work_outside_runtime_abandons() {
        let (seen, done) = recording();
        AsyncWork::new(|| async { 1u8 }).perform(done);
        assert_eq!(*seen.lock().unwrap(), vec![None]);
    }

    #[tokio::test]
    async fn test_async_work_completes_from_future() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let done = Completion::new(move |out: Option<u8>| {
            let _ = tx.send(out);
        });
        AsyncWork::new(|| async { 42u8 }).perform(done);
        assert_eq!(rx.await.expect("completed"), Some(42));
    }
}
