//! Delay policies.
//!
//! This module groups the knobs that control **how long** a retrier waits
//! before each attempt.
//!
//! ## Contents
//! - [`Strategy`]      the delay variant a retrier runs with (immediate / fixed / custom)
//! - [`BackoffPolicy`] exponential curve usable as a custom strategy
//! - [`JitterPolicy`]  randomization applied by a backoff curve
//!
//! ## Quick wiring
//! ```text
//! Retrier { strategy: Strategy, .. }
//!      └─► core::session::Session uses:
//!           - strategy.delay_for(task.attempts()) before every attempt
//!
//! Strategy::backoff(BackoffPolicy { first, factor, max, jitter })
//!      └─► Strategy::Custom(|attempts| policy.next(attempts))
//! ```
//!
//! ## Defaults
//! - `Strategy::Immediate`.
//! - `BackoffPolicy::default()` → first=100ms, factor=2.0, max=30s, jitter=None.

mod backoff;
mod jitter;
mod strategy;

pub use backoff::BackoffPolicy;
pub use jitter::JitterPolicy;
pub use strategy::{DelayFn, Strategy};
