//! # Task abstractions.
//!
//! This module provides the task-related types:
//! - [`Task`] - work + validation + attempt bookkeeping, advanced by replacement
//! - [`Work`] - trait for performing one attempt ([`WorkFn`], [`AsyncWork`])
//! - [`Completion`] - one-shot channel an attempt reports its output through
//! - [`Validate`] - trait judging an attempt's output

mod task;
mod validate;
mod work;

pub use task::Task;
pub use validate::Validate;
pub use work::{AsyncWork, Completion, Work, WorkFn};
