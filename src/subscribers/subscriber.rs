//! # Event subscriber trait.
//!
//! Provides [`Subscribe`] an extension point for plugging event handlers into a retrier.
//!
//! Each subscriber gets:
//! - **Dedicated worker task** (runs independently of sessions)
//! - **Per-subscriber bounded queue** (capacity via [`Subscribe::queue_capacity`])
//! - **Panic isolation** (panics are caught and reported as `EventKind::SubscriberPanicked`)
//!
//! ## Rules
//! - A slow subscriber only affects its own queue.
//! - Queue overflow drops the event **for this subscriber only** and publishes
//!   `EventKind::SubscriberOverflow`.
//! - Events are processed sequentially (FIFO) per subscriber.
//! - Subscribers never delay retry sessions.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use retrykit::{Event, EventKind, Subscribe};
//!
//! struct ExhaustionAlert;
//!
//! #[async_trait]
//! impl Subscribe for ExhaustionAlert {
//!     async fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::Exhausted) {
//!             // page someone, bump a counter, etc.
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "exhaustion-alert" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Event subscriber for retry observability.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from a dedicated worker task, in FIFO order per subscriber.
    async fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in overflow/panic events.
    ///
    /// The default uses `type_name::<Self>()`; override it with something short.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this subscriber (clamped to at least 1).
    ///
    /// Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
