//! Output validation.

/// Decides whether an attempt's output is acceptable.
///
/// `true` ends the session; `false` schedules another attempt if the limit allows.
/// Implementations must be pure: the retrier may call them from any context.
pub trait Validate<O>: Send + Sync + 'static {
    /// Returns `true` if `output` is acceptable.
    fn validate(&self, output: &O) -> bool;
}

impl<O, F> Validate<O> for F
where
    F: Fn(&O) -> bool + Send + Sync + 'static,
{
    fn validate(&self, output: &O) -> bool {
        self(output)
    }
}
