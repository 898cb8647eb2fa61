//! Concurrent execution of a batch of deferred tile operations.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::debug;

use super::limiter::ConcurrencyLimiter;
use super::progress::{BatchProgress, NoOpProgress, ProgressObserver, SharedObserver};

/// Runs a batch of futures concurrently and collects their results.
///
/// Results come back in the order the futures were supplied, regardless of
/// completion order. The first failure aborts the batch: remaining futures
/// are dropped and the error is returned as-is.
///
/// Futures are lazy, so each one is a deferred operation that only starts
/// once the coordinator polls it (and, with a concurrency cap, once it holds
/// a slot).
#[derive(Clone)]
pub struct BatchCoordinator {
    concurrency: usize,
    observer: SharedObserver,
}

impl BatchCoordinator {
    /// Unbounded coordinator with no progress reporting.
    pub fn new() -> Self {
        Self {
            concurrency: 0,
            observer: Arc::new(NoOpProgress),
        }
    }

    /// Caps in-flight tasks. Zero means unbounded.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Reports completions to `observer`.
    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Configured concurrency cap (0 = unbounded).
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Runs every task and returns their outputs in input order.
    ///
    /// An empty batch succeeds immediately with an empty vector.
    pub async fn run_all<T, E, Fut>(&self, tasks: Vec<Fut>) -> Result<Vec<T>, E>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        let total = tasks.len();
        if total == 0 {
            self.observer.on_finish(0);
            return Ok(Vec::new());
        }

        debug!(total = total, concurrency = self.concurrency, "Starting batch");

        let limiter = ConcurrencyLimiter::new(self.concurrency);
        let completed = AtomicUsize::new(0);
        let observer: &dyn ProgressObserver = self.observer.as_ref();

        let guarded = tasks.into_iter().map(|task| {
            let limiter = &limiter;
            let completed = &completed;
            async move {
                let _permit = limiter.acquire().await;
                let result = task.await;
                if result.is_ok() {
                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    observer.on_progress(BatchProgress {
                        completed: done,
                        total,
                    });
                }
                result
            }
        });

        let results = match try_join_all(guarded).await {
            Ok(results) => results,
            Err(e) => {
                self.observer.on_abort(completed.load(Ordering::SeqCst), total);
                return Err(e);
            }
        };

        debug!(
            total = total,
            peak_in_flight = limiter.peak_in_flight(),
            "Batch finished"
        );
        self.observer.on_finish(total);
        Ok(results)
    }
}

impl Default for BatchCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BatchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCoordinator")
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}
