//! # Delay strategies.
//!
//! [`Strategy`] decides how long a [`Retrier`](crate::Retrier) waits before each attempt.
//!
//! - [`Strategy::Immediate`] no delay at all.
//! - [`Strategy::FixedDelay`] the same delay before every attempt.
//! - [`Strategy::Custom`] a caller-supplied function of the attempt count.
//!
//! The attempt count passed in is the number of attempts **already made**, so the
//! first attempt is scheduled after `delay_for(0)`.
//!
//! ```text
//! attempt 0: delay_for(0) ─► work ─► rejected
//! attempt 1: delay_for(1) ─► work ─► rejected
//! attempt 2: delay_for(2) ─► work ─► accepted
//! ```
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use retrykit::Strategy;
//!
//! let linear = Strategy::custom(|attempt| Duration::from_secs(u64::from(attempt) * 2));
//! assert_eq!(linear.delay_for(5), Duration::from_secs(10));
//!
//! let fixed = Strategy::FixedDelay(Duration::from_millis(250));
//! assert_eq!(fixed.delay_for(7), Duration::from_millis(250));
//! ```

use std::{fmt, sync::Arc, time::Duration};

use crate::policies::backoff::BackoffPolicy;

/// Function computing a delay from the number of attempts already made.
pub type DelayFn = Arc<dyn Fn(u32) -> Duration + Send + Sync + 'static>;

/// Delay strategy applied between attempts.
///
/// Strategies are consulted read-only; they never observe or mutate task state.
#[derive(Clone, Default)]
pub enum Strategy {
    /// Attempts run back to back.
    #[default]
    Immediate,
    /// Constant delay before every attempt, independent of the attempt count.
    FixedDelay(Duration),
    /// Delay computed by a function of the attempt count.
    ///
    /// The function must not depend on retry bookkeeping; it may implement any curve.
    Custom(DelayFn),
}

impl Strategy {
    /// Wraps a function into [`Strategy::Custom`].
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(u32) -> Duration + Send + Sync + 'static,
    {
        Strategy::Custom(Arc::new(f))
    }

    /// Builds a [`Strategy::Custom`] from a function returning seconds as `f64`.
    ///
    /// Values are clamped when converted: negative and NaN become zero,
    /// anything beyond the range of [`Duration`] becomes [`Duration::MAX`].
    pub fn custom_secs<F>(f: F) -> Self
    where
        F: Fn(u32) -> f64 + Send + Sync + 'static,
    {
        Strategy::custom(move |attempt| clamp_secs(f(attempt)))
    }

    /// Builds a [`Strategy::Custom`] that follows an exponential [`BackoffPolicy`].
    pub fn backoff(policy: BackoffPolicy) -> Self {
        Strategy::custom(move |attempt| policy.next(attempt))
    }

    /// Returns the delay to wait before running the attempt following `current_attempt`
    /// completed ones.
    pub fn delay_for(&self, current_attempt: u32) -> Duration {
        match self {
            Strategy::Immediate => Duration::ZERO,
            Strategy::FixedDelay(delay) => *delay,
            Strategy::Custom(f) => f(current_attempt),
        }
    }

    /// Returns a short stable label for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Strategy::Immediate => "immediate",
            Strategy::FixedDelay(_) => "fixed_delay",
            Strategy::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Immediate => f.write_str("Immediate"),
            Strategy::FixedDelay(d) => f.debug_tuple("FixedDelay").field(d).finish(),
            Strategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn clamp_secs(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::JitterPolicy;

    #[test]
    fn test_immediate_is_always_zero() {
        let strategy = Strategy::Immediate;
        assert_eq!(strategy.delay_for(1), Duration::ZERO);
        assert_eq!(strategy.delay_for(5), Duration::ZERO);
        assert_eq!(strategy.delay_for(10), Duration::ZERO);
    }

    #[test]
    fn test_fixed_delay_ignores_attempt() {
        let strategy = Strategy::FixedDelay(Duration::from_secs(2));
        assert_eq!(strategy.delay_for(1), Duration::from_secs(2));
        assert_eq!(strategy.delay_for(5), Duration::from_secs(2));
        assert_eq!(strategy.delay_for(10), Duration::from_secs(2));
    }

    #[test]
    fn test_custom_uses_attempt_count() {
        let strategy = Strategy::custom(|n| Duration::from_secs(u64::from(n) * 2));
        assert_eq!(strategy.delay_for(1), Duration::from_secs(2));
        assert_eq!(strategy.delay_for(5), Duration::from_secs(10));
        assert_eq!(strategy.delay_for(10), Duration::from_secs(20));
    }

    #[test]
    fn test_delay_for_is_repeatable() {
        let strategies = [
            Strategy::Immediate,
            Strategy::FixedDelay(Duration::from_millis(300)),
            Strategy::custom(|n| Duration::from_millis(100 * u64::from(n))),
        ];
        for strategy in &strategies {
            for n in 0..20 {
                assert_eq!(strategy.delay_for(n), strategy.delay_for(n), "{strategy:?} at {n}");
            }
        }
    }

    #[test]
    fn test_custom_secs_clamps_negative_to_zero() {
        let strategy = Strategy::custom_secs(|n| f64::from(n) - 3.0);
        assert_eq!(strategy.delay_for(0), Duration::ZERO);
        assert_eq!(strategy.delay_for(3), Duration::ZERO);
        assert_eq!(strategy.delay_for(5), Duration::from_secs(2));
    }

    #[test]
    fn test_custom_secs_handles_non_finite() {
        assert_eq!(Strategy::custom_secs(|_| f64::NAN).delay_for(1), Duration::ZERO);
        assert_eq!(
            Strategy::custom_secs(|_| f64::INFINITY).delay_for(1),
            Duration::MAX
        );
    }

    #[test]
    fn test_backoff_strategy_follows_policy() {
        let strategy = Strategy::backoff(BackoffPolicy {
            first: Duration::from_millis(100),
            max: Duration::from_secs(1),
            factor: 2.0,
            jitter: JitterPolicy::None,
        });
        assert_eq!(strategy.delay_for(0), Duration::ZERO);
        assert_eq!(strategy.delay_for(1), Duration::from_millis(100));
        assert_eq!(strategy.delay_for(3), Duration::from_millis(400));
        assert_eq!(strategy.delay_for(9), Duration::from_secs(1));
    }

    #[test]
    fn test_default_is_immediate() {
        assert!(matches!(Strategy::default(), Strategy::Immediate));
        assert_eq!(Strategy::default().as_label(), "immediate");
    }
}
