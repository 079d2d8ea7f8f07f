//! Retry engine.
//!
//! The public API from this module is [`Retrier`] (with [`RetrierBuilder`]) and
//! the [`SessionHandle`] returned by [`Retrier::begin`].
//!
//! Internal modules:
//! - [`retrier`]: entry point; starts sessions, owns strategy/context/bus;
//! - [`session`]: the step loop of one retry chain;
//! - [`builder`]: wires subscribers to the bus.

mod builder;
mod retrier;
mod session;

pub use builder::RetrierBuilder;
pub use retrier::{Retrier, SessionHandle};
pub use session::OnExhausted;
