//! Error types used by retrykit.
//!
//! Retry failure itself is not an error: an attempt whose output fails validation
//! simply schedules the next attempt, and exhaustion is reported through the
//! session's exhaustion callback. The only error condition is an invalid task
//! configuration, caught at construction time.
//!
//! [`RetryError`] provides helper methods (`as_label`, `as_message`) for logs/metrics.

use thiserror::Error;

/// # Errors produced by retrykit.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetryError {
    /// A task was configured with a maximum attempt count that is negative
    /// or does not fit the attempt counter.
    #[error("invalid configuration: maximum attempts must be in 0..={max}, got {maximum_attempts}", max = u32::MAX)]
    InvalidConfiguration {
        /// The rejected value.
        maximum_attempts: i64,
    },
}

impl RetryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use retrykit::RetryError;
    ///
    /// let err = RetryError::InvalidConfiguration { maximum_attempts: -1 };
    /// assert_eq!(err.as_label(), "invalid_configuration");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RetryError::InvalidConfiguration { .. } => "invalid_configuration",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RetryError::InvalidConfiguration { maximum_attempts } => {
                format!("invalid maximum attempts: {maximum_attempts}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_display() {
        let err = RetryError::InvalidConfiguration {
            maximum_attempts: -3,
        };
        assert!(err.to_string().contains("got -3"));
        assert_eq!(err.as_message(), "invalid maximum attempts: -3");
    }
}
