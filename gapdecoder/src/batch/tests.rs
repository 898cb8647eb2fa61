use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, Instant};

#[tokio::test(start_paused = true)]
async fn test_results_follow_input_order() {
    let coordinator = BatchCoordinator::new();
    let finish_order = Arc::new(Mutex::new(Vec::new()));

    // Later tasks finish first.
    let tasks: Vec<_> = (0..5u64)
        .map(|i| {
            let finish_order = Arc::clone(&finish_order);
            async move {
                sleep(Duration::from_millis(100 * (5 - i))).await;
                finish_order.lock().unwrap().push(i);
                Ok::<_, String>(i * 10)
            }
        })
        .collect();

    let results = coordinator.run_all(tasks).await.unwrap();

    assert_eq!(results, vec![0, 10, 20, 30, 40]);
    assert_eq!(*finish_order.lock().unwrap(), vec![4, 3, 2, 1, 0]);
}

#[tokio::test]
async fn test_empty_batch_succeeds() {
    let finished = Arc::new(AtomicUsize::new(usize::MAX));
    let observed = Arc::clone(&finished);

    struct Finish(Arc<AtomicUsize>);
    impl ProgressObserver for Finish {
        fn on_progress(&self, _progress: BatchProgress) {
            panic!("no progress expected for empty batch");
        }
        fn on_finish(&self, total: usize) {
            self.0.store(total, Ordering::SeqCst);
        }
    }

    let coordinator = BatchCoordinator::new().with_observer(Arc::new(Finish(observed)));
    let tasks: Vec<std::future::Ready<Result<u8, String>>> = Vec::new();

    let results = coordinator.run_all(tasks).await.unwrap();
    assert!(results.is_empty());
    assert_eq!(finished.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_progress_counts_each_completion() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let observer = move |p: BatchProgress| sink.lock().unwrap().push((p.completed, p.total));

    let coordinator = BatchCoordinator::new().with_observer(Arc::new(observer));
    let tasks: Vec<_> = (0..4u64)
        .map(|i| async move {
            sleep(Duration::from_millis(10 * i)).await;
            Ok::<_, String>(())
        })
        .collect();

    coordinator.run_all(tasks).await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
}

#[tokio::test(start_paused = true)]
async fn test_first_failure_aborts_batch() {
    let coordinator = BatchCoordinator::new();
    let finished = Arc::new(AtomicUsize::new(0));
    let start = Instant::now();

    let tasks: Vec<_> = (0..4u64)
        .map(|i| {
            let finished = Arc::clone(&finished);
            async move {
                if i == 2 {
                    sleep(Duration::from_millis(5)).await;
                    return Err(format!("tile {i} failed"));
                }
                sleep(Duration::from_secs(60)).await;
                finished.fetch_add(1, Ordering::SeqCst);
                Ok(i)
            }
        })
        .collect();

    let err = coordinator.run_all(tasks).await.unwrap_err();

    assert_eq!(err, "tile 2 failed");
    assert!(start.elapsed() < Duration::from_secs(1));
    assert_eq!(finished.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_failure_reports_abort_instead_of_finish() {
    #[derive(Default)]
    struct Outcome {
        aborted: Mutex<Option<(usize, usize)>>,
        finished: AtomicUsize,
    }
    impl ProgressObserver for Outcome {
        fn on_progress(&self, _progress: BatchProgress) {}
        fn on_finish(&self, _total: usize) {
            self.finished.fetch_add(1, Ordering::SeqCst);
        }
        fn on_abort(&self, completed: usize, total: usize) {
            *self.aborted.lock().unwrap() = Some((completed, total));
        }
    }

    let outcome = Arc::new(Outcome::default());
    let coordinator =
        BatchCoordinator::new().with_observer(Arc::clone(&outcome) as SharedObserver);

    let tasks: Vec<_> = (0..3u64)
        .map(|i| async move {
            sleep(Duration::from_millis(10 * (i + 1))).await;
            if i == 2 {
                Err("tile 2 failed".to_string())
            } else {
                Ok(i)
            }
        })
        .collect();

    assert!(coordinator.run_all(tasks).await.is_err());
    assert_eq!(*outcome.aborted.lock().unwrap(), Some((2, 3)));
    assert_eq!(outcome.finished.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_concurrency_cap_is_respected() {
    let coordinator = BatchCoordinator::new().with_concurrency(2);
    let running = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let tasks: Vec<_> = (0..6)
        .map(|_| {
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            async move {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                sleep(Duration::from_millis(50)).await;
                running.fetch_sub(1, Ordering::SeqCst);
                Ok::<_, String>(())
            }
        })
        .collect();

    let start = Instant::now();
    coordinator.run_all(tasks).await.unwrap();

    assert_eq!(peak.load(Ordering::SeqCst), 2);
    assert!(start.elapsed() >= Duration::from_millis(150));
}

#[tokio::test(start_paused = true)]
async fn test_unbounded_runs_everything_at_once() {
    let coordinator = BatchCoordinator::default();
    let running = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            async move {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                sleep(Duration::from_millis(50)).await;
                running.fetch_sub(1, Ordering::SeqCst);
                Ok::<_, String>(())
            }
        })
        .collect();

    coordinator.run_all(tasks).await.unwrap();
    assert_eq!(peak.load(Ordering::SeqCst), 16);
}
