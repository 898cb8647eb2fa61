//! Bounded retry with exponential backoff.
//!
//! [`with_backoff_if`] wraps any fallible async operation: failures the
//! classifier accepts are retried after `base * 2^attempt`, everything else
//! is returned at once. When the budget runs out the last error is returned
//! unchanged. [`with_backoff`] uses the error's own [`Retryable`]
//! classification.
//!
//! ```
//! use gapdecoder::retry::{with_backoff_if, RetryPolicy};
//! use std::time::Duration;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let policy = RetryPolicy::new().with_backoff_base(Duration::ZERO);
//! let result: Result<u32, String> =
//!     rt.block_on(with_backoff_if(&policy, |_: &String| true, || async { Ok(7) }));
//! assert_eq!(result, Ok(7));
//! ```

mod policy;

pub use policy::{RetryPolicy, DEFAULT_BACKOFF_BASE, DEFAULT_MAX_ATTEMPTS};

use std::fmt::Display;
use std::future::Future;
use tracing::{debug, warn};

/// Classifies an error as transient (worth retrying) or permanent.
pub trait Retryable {
    /// Returns true if the same operation may succeed when repeated.
    fn is_retryable(&self) -> bool;
}

/// Runs `operation` under `policy`, retrying errors that report themselves
/// as [`Retryable`].
pub async fn with_backoff<T, E, F, Fut>(policy: &RetryPolicy, operation: F) -> Result<T, E>
where
    E: Retryable + Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    with_backoff_if(policy, E::is_retryable, operation).await
}

/// Runs `operation` under `policy`, retrying errors accepted by
/// `is_retryable`.
pub async fn with_backoff_if<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    is_retryable: P,
    mut operation: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!(attempt = attempt + 1, "Operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if !is_retryable(&e) => {
                debug!(attempt = attempt + 1, error = %e, "Permanent failure, not retrying");
                return Err(e);
            }
            Err(e) if attempt + 1 >= max_attempts => {
                warn!(attempts = max_attempts, error = %e, "Retry budget exhausted");
                return Err(e);
            }
            Err(e) => {
                let delay = policy.delay_for(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_attempts = max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Operation failed, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    #[derive(Debug, Clone, PartialEq)]
    enum TestError {
        Transient(u32),
        Fatal,
    }

    impl Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    impl Retryable for TestError {
        fn is_retryable(&self) -> bool {
            matches!(self, TestError::Transient(_))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_runs_exactly_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new().with_max_attempts(4);

        let counter = Arc::clone(&calls);
        let result: Result<(), TestError> = with_backoff(&policy, || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move { Err(TestError::Transient(n)) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        // The error from the last attempt is propagated unchanged
        assert_eq!(result, Err(TestError::Transient(3)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_delays_are_exponential() {
        let policy = RetryPolicy::new().with_max_attempts(5);
        let start = Instant::now();

        let result: Result<(), TestError> =
            with_backoff(&policy, || async { Err(TestError::Transient(0)) }).await;

        assert!(result.is_err());
        // 1 + 2 + 4 + 8 seconds, nothing after the final attempt
        assert_eq!(start.elapsed(), Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new();

        let counter = Arc::clone(&calls);
        let result = with_backoff(&policy, || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(TestError::Transient(n))
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_error_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new();
        let start = Instant::now();

        let counter = Arc::clone(&calls);
        let result: Result<(), TestError> = with_backoff(&policy, || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Err(TestError::Fatal) }
        })
        .await;

        assert_eq!(result, Err(TestError::Fatal));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_classifier_overrides_trait() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new().with_max_attempts(3);

        let counter = Arc::clone(&calls);
        let result: Result<(), TestError> = with_backoff_if(
            &policy,
            |_| true,
            || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err(TestError::Fatal) }
            },
        )
        .await;

        assert_eq!(result, Err(TestError::Fatal));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_single_attempt_policy_never_sleeps() {
        let policy = RetryPolicy::new()
            .with_max_attempts(1)
            .with_backoff_base(Duration::from_secs(3600));

        let result: Result<(), TestError> =
            with_backoff(&policy, || async { Err(TestError::Transient(0)) }).await;

        assert_eq!(result, Err(TestError::Transient(0)));
    }
}
