//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait and the [`SubscriberSet`] fan-out
//! that delivers retry events to user subscribers.
//!
//! ## Architecture
//! ```text
//! Session ── publish(Event) ──► Bus ──► retrier listener ──► SubscriberSet::emit(&Event)
//!                                                                 │
//!                                                  ┌──────────────┼──────────────┐
//!                                                  ▼              ▼              ▼
//!                                              LogWriter       Metrics        Custom
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
