//! # Jitter for backoff delays.
//!
//! [`JitterPolicy`] randomizes the delays produced by a [`BackoffPolicy`](crate::BackoffPolicy)
//! so that many clients retrying the same failing endpoint spread out.
//!
//! - [`JitterPolicy::None`] exact delay
//! - [`JitterPolicy::Full`] random in `[0, delay]`
//! - [`JitterPolicy::Equal`] `delay/2 + random[0, delay/2]`
//! - [`JitterPolicy::Decorrelated`] random in `[base, delay * 3]`, capped at max
//!
//! Randomness lives only inside the custom strategy built from the policy; the
//! retrier itself never randomizes.

use rand::Rng;
use std::time::Duration;

/// Randomization applied to a backoff delay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// Use the computed delay as is.
    #[default]
    None,
    /// Random delay in `[0, delay]`.
    Full,
    /// `delay/2 + random[0, delay/2]`; keeps roughly 75% of the delay on average.
    Equal,
    /// Random delay in `[base, delay * 3]`, capped at the policy maximum.
    ///
    /// Needs the policy bounds, see [`apply_decorrelated`](Self::apply_decorrelated).
    Decorrelated,
}

impl JitterPolicy {
    /// Applies jitter to `delay`.
    ///
    /// For `Decorrelated` the input is returned unchanged; use
    /// [`apply_decorrelated`](Self::apply_decorrelated).
    pub fn apply(&self, delay: Duration) -> Duration {
        match self {
            JitterPolicy::None | JitterPolicy::Decorrelated => delay,
            JitterPolicy::Full => full_jitter(delay),
            JitterPolicy::Equal => equal_jitter(delay),
        }
    }

    /// Applies decorrelated jitter given the floor (`base`), the computed delay and the cap.
    ///
    /// Falls back to [`apply`](Self::apply) for other variants.
    pub fn apply_decorrelated(&self, base: Duration, delay: Duration, max: Duration) -> Duration {
        if !matches!(self, JitterPolicy::Decorrelated) {
            return self.apply(delay);
        }

        let base_ms = base.as_millis() as u64;
        let upper_ms = (delay.as_millis() as u64)
            .saturating_mul(3)
            .min(max.as_millis() as u64)
            .max(base_ms);

        if base_ms >= upper_ms {
            return base;
        }
        Duration::from_millis(rand::rng().random_range(base_ms..=upper_ms))
    }
}

fn full_jitter(delay: Duration) -> Duration {
    let ms = delay.as_millis() as u64;
    if ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(0..=ms))
}

fn equal_jitter(delay: Duration) -> Duration {
    let ms = delay.as_millis() as u64;
    let half = ms / 2;
    if half == 0 {
        return Duration::from_millis(ms);
    }
    Duration::from_millis(half + rand::rng().random_range(0..=half))
}
