//! Retry events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`, [`WeakBus`] its non-owning publisher
//!
//! ## Quick reference
//! - **Publishers**: `core::session` (every step of a session), `SubscriberSet`
//!   workers (overflow/panic).
//! - **Consumers**: the retrier's subscriber listener (fans out to `SubscriberSet`)
//!   and any receiver obtained from `Retrier::subscribe`.

mod bus;
mod event;

pub use bus::{Bus, WeakBus};
pub use event::{Event, EventKind};
