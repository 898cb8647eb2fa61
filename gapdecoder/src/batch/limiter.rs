//! Concurrency cap for in-flight batch tasks.

use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Semaphore, SemaphorePermit};

/// Limits how many batch tasks run at once.
///
/// A limit of zero means unbounded: permits are always granted immediately,
/// but in-flight and peak counts are still tracked.
#[derive(Debug)]
pub struct ConcurrencyLimiter {
    semaphore: Option<Semaphore>,
    max_permits: usize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ConcurrencyLimiter {
    /// Creates a limiter allowing `max_concurrent` tasks (0 = unbounded).
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            semaphore: (max_concurrent > 0).then(|| Semaphore::new(max_concurrent)),
            max_permits: max_concurrent,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Waits for a slot. The slot is released when the permit drops.
    pub async fn acquire(&self) -> LimiterPermit<'_> {
        // Never closed, so acquire cannot fail.
        let permit = match &self.semaphore {
            Some(semaphore) => semaphore.acquire().await.ok(),
            None => None,
        };

        let current = self.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::Relaxed);

        LimiterPermit {
            _permit: permit,
            in_flight: &self.in_flight,
        }
    }

    /// Maximum concurrent tasks, 0 when unbounded.
    pub fn max_concurrent(&self) -> usize {
        self.max_permits
    }

    /// Tasks currently holding a permit.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Highest number of simultaneous permits observed.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::Relaxed)
    }
}

/// Slot held by a running task.
pub struct LimiterPermit<'a> {
    _permit: Option<SemaphorePermit<'a>>,
    in_flight: &'a AtomicUsize,
}

impl Drop for LimiterPermit<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_permit_tracks_in_flight() {
        let limiter = ConcurrencyLimiter::new(2);
        let a = limiter.acquire().await;
        let b = limiter.acquire().await;
        assert_eq!(limiter.in_flight(), 2);
        drop(a);
        assert_eq!(limiter.in_flight(), 1);
        drop(b);
        assert_eq!(limiter.in_flight(), 0);
        assert_eq!(limiter.peak_in_flight(), 2);
    }

    #[tokio::test]
    async fn test_unbounded_limiter_never_waits() {
        let limiter = ConcurrencyLimiter::new(0);
        let permits: Vec<_> = futures::future::join_all((0..64).map(|_| limiter.acquire())).await;
        assert_eq!(limiter.in_flight(), 64);
        assert_eq!(limiter.max_concurrent(), 0);
        drop(permits);
        assert_eq!(limiter.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_bounded_limiter_blocks_at_capacity() {
        let limiter = ConcurrencyLimiter::new(1);
        let _held = limiter.acquire().await;

        let waited = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            limiter.acquire(),
        )
        .await;
        assert!(waited.is_err());
    }
}
