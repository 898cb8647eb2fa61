//! Download configuration.

use std::time::Duration;

use super::defaults::{DEFAULT_BACKOFF_BASE_MS, DEFAULT_CONCURRENCY, DEFAULT_DOWNLOAD_TIMEOUT_SECS};
use crate::crypto::MarkerPolicy;
use crate::retry::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};

/// Configuration for tile downloading.
///
/// Groups the retry budget, concurrency cap, HTTP timeout and the policy
/// for tiles without an encryption marker.
///
/// # Example
///
/// ```
/// use gapdecoder::config::DownloadConfig;
/// use std::time::Duration;
///
/// // Using defaults
/// let config = DownloadConfig::default();
/// assert_eq!(config.max_attempts(), 5);
/// assert_eq!(config.concurrency(), 0);
/// assert_eq!(config.timeout_secs(), 30);
///
/// // Custom configuration
/// let config = DownloadConfig::new()
///     .with_max_attempts(3)
///     .with_backoff_base(Duration::from_millis(500))
///     .with_concurrency(16);
/// assert_eq!(config.retry_policy().delay_for(1), Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadConfig {
    /// Attempts per tile, including the first one
    max_attempts: u32,
    /// Backoff time unit
    backoff_base: Duration,
    /// Maximum tiles in flight (0 = unbounded)
    concurrency: usize,
    /// HTTP request timeout in seconds
    timeout_secs: u64,
    /// Handling of tiles without the encryption marker
    marker_policy: MarkerPolicy,
}

impl DownloadConfig {
    /// Create a new download configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of attempts per tile. Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the backoff time unit. Default: 1 second.
    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// Set the maximum number of tiles downloaded at once.
    ///
    /// Zero leaves concurrency to the runtime and connection pool.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the HTTP request timeout in seconds. Default: 30 seconds.
    pub fn with_timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout_secs = timeout;
        self
    }

    pub fn with_marker_policy(mut self, policy: MarkerPolicy) -> Self {
        self.marker_policy = policy;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_base(&self) -> Duration {
        self.backoff_base
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn marker_policy(&self) -> MarkerPolicy {
        self.marker_policy
    }

    /// Retry policy for individual tile fetches.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new()
            .with_max_attempts(self.max_attempts)
            .with_backoff_base(self.backoff_base)
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_base: Duration::from_millis(DEFAULT_BACKOFF_BASE_MS),
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            marker_policy: MarkerPolicy::PassThrough,
        }
    }
}
