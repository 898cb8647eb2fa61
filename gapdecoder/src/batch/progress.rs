//! Progress reporting for batch execution.

use std::sync::Arc;
use tracing::{debug, info, warn};

/// Completion state of a batch after one more task finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Tasks finished so far
    pub completed: usize,
    /// Tasks in the batch
    pub total: usize,
}

impl BatchProgress {
    /// Completed fraction in `[0, 1]`. An empty batch counts as complete.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    /// Completed percentage in `[0, 100]`.
    pub fn percent(&self) -> f64 {
        100.0 * self.ratio()
    }

    /// Whether every task has finished.
    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}

/// Receives progress updates while a batch runs.
///
/// Called inline from the completing task, so implementations must return
/// quickly and must not block.
pub trait ProgressObserver: Send + Sync {
    /// Called once per successfully completed task.
    fn on_progress(&self, progress: BatchProgress);

    /// Called once after every task succeeded.
    fn on_finish(&self, _total: usize) {}

    /// Called once when a task failed and the batch was abandoned.
    fn on_abort(&self, _completed: usize, _total: usize) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(BatchProgress) + Send + Sync,
{
    fn on_progress(&self, progress: BatchProgress) {
        self(progress)
    }
}

/// Shared observer handle.
pub type SharedObserver = Arc<dyn ProgressObserver>;

/// Observer that discards all updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressObserver for NoOpProgress {
    fn on_progress(&self, _progress: BatchProgress) {}
}

/// Observer that logs progress through `tracing`.
///
/// Logs at info level each time another `step_percent` of the batch
/// completes, and every update at debug level.
#[derive(Debug, Clone, Copy)]
pub struct TracingProgress {
    step_percent: u32,
}

impl TracingProgress {
    /// Creates an observer logging every `step_percent` percent (minimum 1).
    pub fn new(step_percent: u32) -> Self {
        Self {
            step_percent: step_percent.clamp(1, 100),
        }
    }
}

impl Default for TracingProgress {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ProgressObserver for TracingProgress {
    fn on_progress(&self, progress: BatchProgress) {
        debug!(
            completed = progress.completed,
            total = progress.total,
            "Batch progress"
        );

        let step = self.step_percent as usize;
        let before = (progress.completed - 1) * 100 / progress.total.max(1) / step;
        let now = progress.completed * 100 / progress.total.max(1) / step;
        if now > before {
            info!(
                "Downloaded {}/{} tiles ({:.1}%)",
                progress.completed,
                progress.total,
                progress.percent()
            );
        }
    }

    fn on_finish(&self, total: usize) {
        info!(total = total, "Batch complete");
    }

    fn on_abort(&self, completed: usize, total: usize) {
        warn!(completed = completed, total = total, "Batch aborted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_ratio_and_percent() {
        let progress = BatchProgress {
            completed: 1,
            total: 8,
        };
        assert_eq!(progress.ratio(), 0.125);
        assert_eq!(format!("{:.1}%", progress.percent()), "12.5%");
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_empty_batch_is_complete() {
        let progress = BatchProgress {
            completed: 0,
            total: 0,
        };
        assert_eq!(progress.ratio(), 1.0);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_closure_observer() {
        let seen = Mutex::new(Vec::new());
        let observer = |p: BatchProgress| seen.lock().unwrap().push(p.completed);

        observer.on_progress(BatchProgress {
            completed: 1,
            total: 2,
        });
        observer.on_progress(BatchProgress {
            completed: 2,
            total: 2,
        });
        observer.on_finish(2);

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_tracing_progress_handles_every_step() {
        let observer = TracingProgress::new(0);
        for completed in 1..=7 {
            observer.on_progress(BatchProgress {
                completed,
                total: 7,
            });
        }
        observer.on_finish(7);
        observer.on_abort(3, 7);
    }
}
