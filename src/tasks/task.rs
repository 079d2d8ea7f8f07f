//! # Retryable task.
//!
//! A [`Task`] bundles what one attempt needs: the [`Work`] to perform, the
//! [`Validate`] predicate judging its output, and the attempt ceiling.
//!
//! A task value is immutable. Its attempt counter advances by replacement:
//! [`Task::next_attempt`] returns a new value with the counter incremented, so a
//! task handed to several sessions is never affected by any of them.
//!
//! ```text
//! Task{attempts: 0} ──next_attempt()──► Task{attempts: 1} ──► ... ──► Task{attempts: max}
//!   can_retry: true                       can_retry: true              can_retry: false
//! ```
//!
//! ## Example
//! ```rust
//! use retrykit::{Completion, Task};
//!
//! let task = Task::new(3, |done: Completion<u16>| done.complete(200), |status| *status == 200)?;
//! assert!(task.can_retry());
//! assert_eq!(task.next_attempt().attempts(), 1);
//!
//! assert!(Task::new(-1, |done: Completion<u16>| done.complete(200), |_| true).is_err());
//! # Ok::<(), retrykit::RetryError>(())
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::config::Config;
use crate::error::RetryError;
use crate::tasks::validate::Validate;
use crate::tasks::work::{AsyncWork, Completion, Work, WorkFn};

/// Work, validation and attempt bookkeeping for one retry chain.
pub struct Task<O> {
    work: Arc<dyn Work<O>>,
    validation: Arc<dyn Validate<O>>,
    maximum_attempts: u32,
    attempts: u32,
    name: Option<Arc<str>>,
}

impl<O> Clone for Task<O> {
    fn clone(&self) -> Self {
        Self {
            work: Arc::clone(&self.work),
            validation: Arc::clone(&self.validation),
            maximum_attempts: self.maximum_attempts,
            attempts: self.attempts,
            name: self.name.clone(),
        }
    }
}

impl<O: Send + 'static> Task<O> {
    /// Creates a task from a callback-style work closure and a validation predicate.
    ///
    /// ### Parameters
    /// - `maximum_attempts`: total attempts allowed (`0` = the work never runs)
    /// - `work`: performs one attempt, reporting through the [`Completion`]
    /// - `output_validation`: `true` accepts the output and ends the session
    ///
    /// ### Errors
    /// [`RetryError::InvalidConfiguration`] if `maximum_attempts` is negative or
    /// larger than `u32::MAX`.
    pub fn new<F, V>(maximum_attempts: i64, work: F, output_validation: V) -> Result<Self, RetryError>
    where
        F: Fn(Completion<O>) + Send + Sync + 'static,
        V: Fn(&O) -> bool + Send + Sync + 'static,
    {
        Self::from_work(maximum_attempts, WorkFn::new(work), output_validation)
    }

    /// Creates a task whose attempts are futures produced by `f`.
    ///
    /// Attempts must run inside a tokio runtime (true for the provided contexts).
    pub fn from_async<F, Fut, V>(
        maximum_attempts: i64,
        f: F,
        output_validation: V,
    ) -> Result<Self, RetryError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = O> + Send + 'static,
        V: Fn(&O) -> bool + Send + Sync + 'static,
    {
        Self::from_work(maximum_attempts, AsyncWork::new(f), output_validation)
    }

    /// Creates a task from any [`Work`] and [`Validate`] implementation.
    pub fn from_work<W, V>(
        maximum_attempts: i64,
        work: W,
        output_validation: V,
    ) -> Result<Self, RetryError>
    where
        W: Work<O>,
        V: Validate<O>,
    {
        let maximum_attempts = u32::try_from(maximum_attempts)
            .map_err(|_| RetryError::InvalidConfiguration { maximum_attempts })?;
        Ok(Self::build(
            maximum_attempts,
            Arc::new(work),
            Arc::new(output_validation),
        ))
    }

    /// Creates a task with an inverted predicate: `retry_predicate` returning `true`
    /// means the output is **not** acceptable and another attempt should follow.
    pub fn retry_while<F, P>(
        maximum_attempts: i64,
        work: F,
        retry_predicate: P,
    ) -> Result<Self, RetryError>
    where
        F: Fn(Completion<O>) + Send + Sync + 'static,
        P: Fn(&O) -> bool + Send + Sync + 'static,
    {
        Self::new(maximum_attempts, work, move |output: &O| !retry_predicate(output))
    }

    /// Creates a task taking its attempt ceiling from `cfg.max_attempts`.
    pub fn with_defaults<F, V>(work: F, output_validation: V, cfg: &Config) -> Self
    where
        F: Fn(Completion<O>) + Send + Sync + 'static,
        V: Fn(&O) -> bool + Send + Sync + 'static,
    {
        Self::build(
            cfg.max_attempts,
            Arc::new(WorkFn::new(work)),
            Arc::new(output_validation),
        )
    }

    fn build(
        maximum_attempts: u32,
        work: Arc<dyn Work<O>>,
        validation: Arc<dyn Validate<O>>,
    ) -> Self {
        Self {
            work,
            validation,
            maximum_attempts,
            attempts: 0,
            name: None,
        }
    }
}

impl<O: 'static> Task<O> {
    /// Returns a copy labelled `name`; the label shows up in events.
    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns `true` while fewer than `maximum_attempts` attempts were made.
    #[inline]
    pub fn can_retry(&self) -> bool {
        self.attempts < self.maximum_attempts
    }

    /// Returns the same task with the attempt counter incremented.
    ///
    /// Does not check [`can_retry`](Self::can_retry); the retrier does.
    pub fn next_attempt(&self) -> Self {
        Self {
            attempts: self.attempts.saturating_add(1),
            ..self.clone()
        }
    }

    /// Attempts already made.
    #[inline]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Attempt ceiling.
    #[inline]
    pub fn maximum_attempts(&self) -> u32 {
        self.maximum_attempts
    }

    /// Task label, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn name_arc(&self) -> Option<Arc<str>> {
        self.name.clone()
    }

    pub(crate) fn perform(&self, done: Completion<O>) {
        self.work.perform(done)
    }

    pub(crate) fn validate(&self, output: &O) -> bool {
        self.validation.validate(output)
    }
}

impl<O> fmt::Debug for Task<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("attempts", &self.attempts)
            .field("maximum_attempts", &self.maximum_attempts)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(max: i64) -> Task<i32> {
        Task::new(max, |done: Completion<i32>| done.complete(1), |out| *out == 1)
            .expect("valid config")
    }

    #[test]
    fn test_negative_maximum_is_rejected() {
        let err = Task::<i32>::new(-1, |done| done.complete(1), |_| true).unwrap_err();
        assert_eq!(
            err,
            RetryError::InvalidConfiguration {
                maximum_attempts: -1
            }
        );
    }

    #[test]
    fn test_oversized_maximum_is_rejected() {
        let too_big = i64::from(u32::MAX) + 1;
        assert!(Task::<i32>::new(too_big, |done| done.complete(1), |_| true).is_err());
    }

    #[test]
    fn test_zero_maximum_cannot_retry() {
        let task = constant(0);
        assert_eq!(task.attempts(), 0);
        assert!(!task.can_retry());
    }

    #[test]
    fn test_next_attempt_is_a_new_value() {
        let first = constant(2);
        let second = first.next_attempt();
        let third = second.next_attempt();

        assert_eq!(first.attempts(), 0);
        assert_eq!(second.attempts(), 1);
        assert_eq!(third.attempts(), 2);
        assert!(first.can_retry());
        assert!(second.can_retry());
        assert!(!third.can_retry());
        assert_eq!(third.maximum_attempts(), 2);
    }

    #[test]
    fn test_perform_hands_completion_to_work() {
        let task = Task::<String>::new(1, |done| done.complete("ok".to_string()), |out| out == "ok")
            .unwrap();
        let seen = Arc::new(std::sync::Mutex::new(None));
        let sink = seen.clone();
        task.perform(Completion::new(move |out: Option<String>| {
            *sink.lock().unwrap() = out;
        }));

        let out = seen.lock().unwrap().take().expect("output");
        assert!(task.validate(&out));
    }

    #[test]
    fn test_retry_while_inverts_predicate() {
        let task = Task::<i32>::retry_while(5, |done| done.complete(1), |out| *out != 1).unwrap();
        assert!(task.validate(&1));
        assert!(!task.validate(&2));
    }

    #[test]
    fn test_with_defaults_uses_config_limit() {
        let cfg = Config {
            max_attempts: 7,
            ..Config::default()
        };
        let task = Task::<i32>::with_defaults(|done| done.complete(1), |_| true, &cfg);
        assert_eq!(task.maximum_attempts(), 7);
    }

    #[test]
    fn test_name_survives_next_attempt() {
        let task = constant(3).with_name("probe");
        assert_eq!(task.next_attempt().name(), Some("probe"));
    }
}
