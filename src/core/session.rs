//! # Session: one retry chain driven through the execution context.
//!
//! A session owns the current [`Task`] snapshot and moves itself from step to
//! step. Every step is re-entered through the execution context, never by a
//! direct call, so the call stack stays flat no matter how many attempts run.
//!
//! ## State machine
//! ```text
//!                 ┌──────────────── rejected: task.next_attempt() ◄───────────┐
//!                 ▼                                                            │
//!   begin ─► step(): CheckingLimit ──can_retry──► run_after(delay) ─► attempt(): Working
//!                 │                                                      │
//!                 └─ !can_retry ─► Exhausted                              ├─ accepted ─► ValidatedSuccess
//!                       (run_now(on_exhausted))                           └─ dropped  ─► Abandoned
//!
//!   cancelled token at step()/attempt() ─► Cancelled
//! ```
//!
//! ## Rules
//! - Attempts are **sequential**: the next one is scheduled only after the
//!   previous output was judged.
//! - The delay is `strategy.delay_for(task.attempts())`, i.e. computed from the
//!   attempts made **before** the one being scheduled.
//! - Validation and the next step run on the context (the completion hops back
//!   with `run_now`), whatever thread the work completed on.
//! - `on_exhausted` is always delivered with `run_now`, never inline.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    context::{ExecutionContext, Job},
    events::{Bus, Event, EventKind},
    policies::Strategy,
    tasks::{Completion, Task},
};

/// Callback fired when a session runs out of attempts.
pub type OnExhausted = Box<dyn FnOnce() + Send + 'static>;

/// Retrier state shared by all sessions; read-only.
pub(crate) struct Shared {
    pub(crate) strategy: Strategy,
    pub(crate) context: Arc<dyn ExecutionContext>,
    pub(crate) bus: Bus,
}

pub(crate) struct Session<O> {
    id: u64,
    shared: Arc<Shared>,
    token: CancellationToken,
    task: Task<O>,
    on_exhausted: Option<OnExhausted>,
}

impl<O: Send + 'static> Session<O> {
    pub(crate) fn new(
        id: u64,
        shared: Arc<Shared>,
        token: CancellationToken,
        task: Task<O>,
        on_exhausted: Option<OnExhausted>,
    ) -> Self {
        Self {
            id,
            shared,
            token,
            task,
            on_exhausted,
        }
    }

    /// Publishes `SessionStarted` and runs the first limit check.
    pub(crate) fn start(self) {
        self.publish(EventKind::SessionStarted, self.task.maximum_attempts());
        self.step();
    }

    /// CheckingLimit: either deliver exhaustion or schedule the next attempt.
    fn step(self) {
        if self.token.is_cancelled() {
            self.publish(EventKind::SessionCancelled, self.task.attempts());
            return;
        }

        if !self.task.can_retry() {
            self.publish(EventKind::Exhausted, self.task.attempts());
            if let Some(on_exhausted) = self.on_exhausted {
                self.shared.context.run_now(on_exhausted);
            }
            return;
        }

        let delay = self.shared.strategy.delay_for(self.task.attempts());
        self.shared.bus.publish(
            self.event(EventKind::AttemptScheduled)
                .with_attempt(self.task.attempts() + 1)
                .with_delay(delay),
        );

        let context = Arc::clone(&self.shared.context);
        context.run_after(delay, self.job(Self::attempt));
    }

    /// Working: hand the work a completion that hops back onto the context.
    fn attempt(self) {
        if self.token.is_cancelled() {
            self.publish(EventKind::SessionCancelled, self.task.attempts());
            return;
        }

        let attempt = self.task.attempts() + 1;
        self.publish(EventKind::AttemptStarting, attempt);

        let task = self.task.clone();
        let done = Completion::new(move |output: Option<O>| {
            let context = Arc::clone(&self.shared.context);
            context.run_now(Box::new(move || self.judge(output)));
        });
        task.perform(done);
    }

    /// Validates the output of the attempt that just finished.
    fn judge(self, output: Option<O>) {
        let attempt = self.task.attempts() + 1;
        match output {
            None => self.publish(EventKind::AttemptAbandoned, attempt),
            Some(out) if self.task.validate(&out) => {
                self.publish(EventKind::OutputAccepted, attempt)
            }
            Some(_) => {
                self.publish(EventKind::OutputRejected, attempt);
                let task = self.task.next_attempt();
                Self { task, ..self }.step();
            }
        }
    }

    fn job(self, f: fn(Self)) -> Job {
        Box::new(move || f(self))
    }

    fn event(&self, kind: EventKind) -> Event {
        Event::new(kind)
            .with_session(self.id)
            .with_task_opt(self.task.name_arc())
    }

    fn publish(&self, kind: EventKind, attempt: u32) {
        self.shared
            .bus
            .publish(self.event(kind).with_attempt(attempt));
    }
}
