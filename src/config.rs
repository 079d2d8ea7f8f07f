//! # Retrier configuration.
//!
//! Provides [`Config`] centralized settings for a [`Retrier`](crate::Retrier).
//!
//! Config is used in two ways:
//! 1. **Retrier creation**: `Retrier::builder(config)`
//! 2. **Task defaults**: `Task::with_defaults(work, validation, &config)`

use crate::policies::Strategy;

/// Configuration for a retrier and the tasks it runs.
///
/// ## Field semantics
/// - `strategy`: Delay strategy applied before every attempt
/// - `max_attempts`: Default attempt ceiling for [`Task::with_defaults`](crate::Task::with_defaults) (`0` = never run)
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
#[derive(Clone, Debug)]
pub struct Config {
    /// Delay strategy used by the retrier.
    pub strategy: Strategy,

    /// Default maximum number of attempts per task.
    pub max_attempts: u32,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow listeners that lag behind more than `bus_capacity` events skip older ones.
    pub bus_capacity: usize,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns a copy with another strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `strategy = Strategy::Immediate`
    /// - `max_attempts = 3`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            strategy: Strategy::Immediate,
            max_attempts: 3,
            bus_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.strategy.as_label(), "immediate");
        assert_eq!(cfg.max_attempts, 3);
        assert_eq!(cfg.bus_capacity_clamped(), 1024);
    }

    #[test]
    fn test_zero_bus_capacity_is_clamped() {
        let cfg = Config {
            bus_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }

    #[test]
    fn test_with_strategy_replaces_only_strategy() {
        let cfg = Config::default().with_strategy(Strategy::FixedDelay(Duration::from_secs(2)));
        assert_eq!(cfg.strategy.delay_for(1), Duration::from_secs(2));
        assert_eq!(cfg.max_attempts, 3);
    }
}
