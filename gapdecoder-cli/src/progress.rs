//! Terminal progress output for tile downloads.

use std::sync::atomic::{AtomicBool, Ordering};

use console::Term;
use gapdecoder::batch::{BatchProgress, ProgressObserver};

/// Prints the download percentage on a single, continuously rewritten line.
///
/// The line is terminated when the batch finishes or aborts, so later
/// output starts on a fresh line.
pub struct ConsoleProgress {
    term: Term,
    line_open: AtomicBool,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            line_open: AtomicBool::new(false),
        }
    }

    /// Whether a progress line is waiting for its newline.
    #[cfg(test)]
    fn line_open(&self) -> bool {
        self.line_open.load(Ordering::SeqCst)
    }

    fn close_line(&self) {
        if self.line_open.swap(false, Ordering::SeqCst) {
            // Progress output is best-effort
            let _ = self.term.write_line("");
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a progress line, e.g. `"\r42.9%"`.
fn progress_line(progress: BatchProgress) -> String {
    format!("\r{:.1}%", progress.percent())
}

impl ProgressObserver for ConsoleProgress {
    fn on_progress(&self, progress: BatchProgress) {
        self.line_open.store(true, Ordering::SeqCst);
        let _ = self.term.write_str(&progress_line(progress));
    }

    fn on_finish(&self, _total: usize) {
        self.close_line();
    }

    fn on_abort(&self, _completed: usize, _total: usize) {
        self.close_line();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line_format() {
        let line = progress_line(BatchProgress {
            completed: 3,
            total: 7,
        });
        assert_eq!(line, "\r42.9%");
    }

    #[test]
    fn test_progress_line_complete() {
        let line = progress_line(BatchProgress {
            completed: 12,
            total: 12,
        });
        assert_eq!(line, "\r100.0%");
    }

    #[test]
    fn test_abort_closes_progress_line() {
        let progress = ConsoleProgress::new();
        assert!(!progress.line_open());

        progress.on_progress(BatchProgress {
            completed: 1,
            total: 4,
        });
        assert!(progress.line_open());

        progress.on_abort(1, 4);
        assert!(!progress.line_open());
    }

    #[test]
    fn test_finish_closes_progress_line() {
        let progress = ConsoleProgress::new();
        progress.on_progress(BatchProgress {
            completed: 2,
            total: 2,
        });
        progress.on_finish(2);
        assert!(!progress.line_open());
    }
}
