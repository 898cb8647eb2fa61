//! Retry policy configuration.

use std::time::Duration;

/// Default number of attempts, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default backoff time unit.
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Attempt budget and backoff unit for [`with_backoff`](super::with_backoff).
///
/// The delay after failed attempt `i` (counting from 0) is
/// `backoff_base * 2^i`. No delay follows the final attempt.
///
/// # Example
///
/// ```
/// use gapdecoder::retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_attempts(3)
///     .with_backoff_base(Duration::from_millis(100));
///
/// assert_eq!(policy.delay_for(0), Duration::from_millis(100));
/// assert_eq!(policy.delay_for(2), Duration::from_millis(400));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the default budget (5 attempts, 1s unit).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total number of attempts. Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the backoff time unit.
    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// Total number of attempts.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Backoff time unit.
    pub fn backoff_base(&self) -> Duration {
        self.backoff_base
    }

    /// Delay to wait after the failed attempt with index `attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.backoff_base.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_base: DEFAULT_BACKOFF_BASE,
        }
    }
}
