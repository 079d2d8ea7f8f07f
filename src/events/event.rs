//! # Events emitted by retry sessions.
//!
//! The [`EventKind`] enum classifies events into:
//! - **Session events**: a session starting or reaching a terminal state
//! - **Attempt events**: scheduling, starting and judging one attempt
//! - **Subscriber events**: problems delivering events to subscribers
//!
//! The [`Event`] struct carries metadata such as the session id, task name,
//! attempt number and scheduled delay.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Within one session, events are published in the order the session's steps happen.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retrykit::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::AttemptScheduled)
//!     .with_task("fetch-profile")
//!     .with_attempt(2)
//!     .with_delay(Duration::from_millis(400));
//!
//! assert_eq!(ev.kind, EventKind::AttemptScheduled);
//! assert_eq!(ev.task.as_deref(), Some("fetch-profile"));
//! assert_eq!(ev.delay_ms, Some(400));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of retry events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `task`: subscriber name
    /// - `reason`: panic info
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `task`: subscriber name
    /// - `reason`: "full" or "closed"
    SubscriberOverflow,

    // === Session events ===
    /// A session was started by `Retrier::begin`.
    ///
    /// Sets:
    /// - `session`, `task`
    /// - `attempt`: maximum attempts allowed
    SessionStarted,

    /// The attempt limit was reached without an accepted output.
    ///
    /// Sets:
    /// - `session`, `task`
    /// - `attempt`: attempts made
    Exhausted,

    /// The session was cancelled before its next attempt ran.
    ///
    /// Sets:
    /// - `session`, `task`
    /// - `attempt`: attempts made
    SessionCancelled,

    // === Attempt events ===
    /// Next attempt scheduled on the execution context.
    ///
    /// Sets:
    /// - `session`, `task`
    /// - `attempt`: number of the scheduled attempt (1-based)
    /// - `delay_ms`: delay before it runs
    AttemptScheduled,

    /// Attempt is starting (work invoked).
    ///
    /// Sets:
    /// - `session`, `task`
    /// - `attempt`: attempt number (1-based)
    AttemptStarting,

    /// Attempt output was accepted by validation; the session ends.
    ///
    /// Sets:
    /// - `session`, `task`, `attempt`
    OutputAccepted,

    /// Attempt output failed validation.
    ///
    /// Sets:
    /// - `session`, `task`, `attempt`
    OutputRejected,

    /// Work dropped its completion without reporting an output; the session ends.
    ///
    /// Sets:
    /// - `session`, `task`, `attempt`
    AttemptAbandoned,
}

impl EventKind {
    /// Returns `true` for kinds that end a session.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EventKind::Exhausted
                | EventKind::OutputAccepted
                | EventKind::SessionCancelled
                | EventKind::AttemptAbandoned
        )
    }
}

/// Retry event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Session the event belongs to.
    pub session: Option<u64>,
    /// Name of the task, if it has one.
    pub task: Option<Arc<str>>,
    /// Attempt number (starting from 1) or count, depending on the kind.
    pub attempt: Option<u32>,
    /// Delay before the scheduled attempt in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable reason (overflow details, panic info).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            session: None,
            task: None,
            attempt: None,
            delay_ms: None,
            reason: None,
        }
    }

    /// Attaches a session id.
    #[inline]
    pub fn with_session(mut self, id: u64) -> Self {
        self.session = Some(id);
        self
    }

    /// Attaches a task name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a task name when there is one.
    #[inline]
    pub fn with_task_opt(mut self, task: Option<Arc<str>>) -> Self {
        self.task = task;
        self
    }

    /// Attaches an attempt number.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a delay (stored as milliseconds, saturating).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_task(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_task(subscriber)
            .with_reason(info)
    }

    /// Returns `true` for events about subscriber delivery itself.
    #[inline]
    pub fn is_subscriber_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked
        )
    }
}
