//! # Exponential backoff for custom strategies.
//!
//! [`BackoffPolicy`] is a ready-made delay curve to plug into
//! [`Strategy::backoff`](crate::Strategy::backoff). It is parameterized by:
//! - [`BackoffPolicy::first`] the delay before the first retry;
//! - [`BackoffPolicy::factor`] the multiplicative growth factor;
//! - [`BackoffPolicy::max`] the maximum delay cap;
//! - [`BackoffPolicy::jitter`] optional randomization.
//!
//! The initial attempt (no attempts made yet) is never delayed. Before retry `n`
//! (that is, after `n` attempts) the delay is `first × factor^(n-1)`, clamped to `max`,
//! then jitter is applied. The base is derived purely from the attempt count, so
//! jitter output never feeds back into later delays.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use retrykit::{BackoffPolicy, JitterPolicy};
//!
//! let backoff = BackoffPolicy {
//!     first: Duration::from_millis(100),
//!     max: Duration::from_secs(10),
//!     factor: 2.0,
//!     jitter: JitterPolicy::None,
//! };
//!
//! assert_eq!(backoff.next(0), Duration::ZERO);
//! assert_eq!(backoff.next(1), Duration::from_millis(100));
//! assert_eq!(backoff.next(2), Duration::from_millis(200));
//! // 100ms × 2^10 = 102_400ms → capped at max=10s
//! assert_eq!(backoff.next(11), Duration::from_secs(10));
//! ```

use std::time::Duration;

use crate::policies::jitter::JitterPolicy;

/// Exponential backoff parameters.
#[derive(Clone, Copy, Debug)]
pub struct BackoffPolicy {
    /// Delay before the first retry.
    pub first: Duration,
    /// Maximum delay cap.
    pub max: Duration,
    /// Multiplicative growth factor (`>= 1.0` recommended).
    pub factor: f64,
    /// Randomization applied on top of the clamped base.
    pub jitter: JitterPolicy,
}

impl Default for BackoffPolicy {
    /// Returns a policy with:
    /// - `first = 100ms`;
    /// - `factor = 2.0` (doubling);
    /// - `max = 30s`;
    /// - `jitter = None`.
    fn default() -> Self {
        Self {
            first: Duration::from_millis(100),
            max: Duration::from_secs(30),
            factor: 2.0,
            jitter: JitterPolicy::None,
        }
    }
}

impl BackoffPolicy {
    /// Computes the delay after `attempts` completed attempts.
    ///
    /// # Notes
    /// - `attempts = 0` always yields zero: the first attempt runs right away.
    /// - If `factor` equals 1.0, every retry waits `first` (up to `max`).
    /// - Non-finite or overflowing intermediate values clamp to `max`.
    pub fn next(&self, attempts: u32) -> Duration {
        if attempts == 0 {
            return Duration::ZERO;
        }
        let exp = (attempts - 1).min(i32::MAX as u32) as i32;
        let max_secs = self.max.as_secs_f64();
        let unclamped_secs = self.first.as_secs_f64() * self.factor.powi(exp);

        let base =
            if !unclamped_secs.is_finite() || unclamped_secs < 0.0 || unclamped_secs > max_secs {
                self.max
            } else {
                Duration::from_secs_f64(unclamped_secs)
            };

        match self.jitter {
            JitterPolicy::Decorrelated => {
                self.jitter
                    .apply_decorrelated(self.first.min(self.max), base, self.max)
            }
            _ => self.jitter.apply(base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doubling(jitter: JitterPolicy) -> BackoffPolicy {
        BackoffPolicy {
            first: Duration::from_millis(100),
            max: Duration::from_secs(30),
            factor: 2.0,
            jitter,
        }
    }

    #[test]
    fn test_initial_attempt_is_not_delayed() {
        for jitter in [
            JitterPolicy::None,
            JitterPolicy::Full,
            JitterPolicy::Equal,
            JitterPolicy::Decorrelated,
        ] {
            assert_eq!(doubling(jitter).next(0), Duration::ZERO);
        }
    }

    #[test]
    fn test_exponential_growth_no_jitter() {
        let policy = doubling(JitterPolicy::None);
        assert_eq!(policy.next(1), Duration::from_millis(100));
        assert_eq!(policy.next(2), Duration::from_millis(200));
        assert_eq!(policy.next(3), Duration::from_millis(400));
        assert_eq!(policy.next(4), Duration::from_millis(800));
    }

    #[test]
    fn test_constant_factor() {
        let policy = BackoffPolicy {
            first: Duration::from_millis(500),
            factor: 1.0,
            ..BackoffPolicy::default()
        };
        for attempts in 1..10 {
            assert_eq!(
                policy.next(attempts),
                Duration::from_millis(500),
                "attempts={attempts} should be constant at 500ms"
            );
        }
    }

    #[test]
    fn test_first_exceeds_max() {
        let policy = BackoffPolicy {
            first: Duration::from_secs(10),
            max: Duration::from_secs(5),
            ..BackoffPolicy::default()
        };
        assert_eq!(policy.next(1), Duration::from_secs(5));
    }

    #[test]
    fn test_huge_attempt_count_clamps_to_max() {
        let policy = BackoffPolicy {
            max: Duration::from_secs(10),
            ..BackoffPolicy::default()
        };
        assert_eq!(policy.next(100), Duration::from_secs(10));
        assert_eq!(policy.next(u32::MAX), Duration::from_secs(10));
    }

    #[test]
    fn test_equal_jitter_stays_within_half_and_base() {
        let policy = doubling(JitterPolicy::Equal);
        for attempts in 1..15 {
            let base_ms = (100.0 * 2.0f64.powi(attempts as i32 - 1)).min(30_000.0);
            let delay = policy.next(attempts);
            assert!(delay >= Duration::from_millis((base_ms / 2.0) as u64));
            assert!(delay <= Duration::from_millis(base_ms as u64));
        }
    }

    #[test]
    fn test_decorrelated_jitter_respects_floor_and_cap() {
        let policy = doubling(JitterPolicy::Decorrelated);
        for _ in 0..100 {
            let delay = policy.next(9);
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_secs(30));
        }
    }
}
