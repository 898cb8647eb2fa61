//! Batch execution of tile downloads.
//!
//! [`BatchCoordinator`] drives a set of deferred operations concurrently,
//! keeps results in submission order and fails fast on the first error.
//! Progress is published through the [`ProgressObserver`] trait.

mod coordinator;
mod limiter;
mod progress;

pub use coordinator::BatchCoordinator;
pub use limiter::{ConcurrencyLimiter, LimiterPermit};
pub use progress::{BatchProgress, NoOpProgress, ProgressObserver, SharedObserver, TracingProgress};

#[cfg(test)]
mod tests;
