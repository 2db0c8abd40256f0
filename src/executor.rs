//! Bounded-concurrency batch execution for independent transfer tasks.

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

/// Run `task` over every item with at most `cap` in flight at once.
///
/// Each item's outcome is collected in place — a failed item never aborts
/// its siblings. Side effects complete in whatever order the scheduler
/// yields, but the returned vector pairs every item with its result in
/// submission order so callers can report deterministically.
pub async fn run_bounded<T, R, E, F, Fut>(
    items: Vec<T>,
    cap: usize,
    task: F,
) -> Vec<(T, Result<R, E>)>
where
    T: Clone,
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let semaphore = Arc::new(Semaphore::new(cap.max(1)));
    let task = &task;
    let tasks: Vec<_> = items
        .into_iter()
        .map(|item| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                // The semaphore is never closed, so acquire cannot fail.
                let _permit = semaphore.acquire().await.expect("semaphore closed");
                let result = task(item.clone()).await;
                (item, result)
            }
        })
        .collect();
    join_all(tasks).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn never_exceeds_worker_cap() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let items: Vec<usize> = (0..20).collect();
        let results = run_bounded(items, 5, |i| {
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok::<usize, ()>(i)
            }
        })
        .await;

        assert_eq!(results.len(), 20);
        assert!(results.iter().all(|(_, r)| r.is_ok()));
        assert!(peak.load(Ordering::SeqCst) <= 5, "peak {peak:?}");
    }

    #[tokio::test]
    async fn failures_do_not_abort_siblings() {
        let items: Vec<usize> = (0..10).collect();
        let results = run_bounded(items, 3, |i| async move {
            if i % 2 == 0 {
                Err(format!("item {i} failed"))
            } else {
                Ok(i * 10)
            }
        })
        .await;

        let succeeded: Vec<usize> = results
            .iter()
            .filter_map(|(_, r)| r.as_ref().ok().copied())
            .collect();
        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        assert_eq!(succeeded, vec![10, 30, 50, 70, 90]);
        assert_eq!(failed, 5);
    }

    #[tokio::test]
    async fn results_keep_submission_order() {
        let items = vec!["c.wav", "a.wav", "b.wav"];
        let results = run_bounded(items, 2, |name| async move { Ok::<_, ()>(name) }).await;
        let names: Vec<&str> = results.iter().map(|(item, _)| *item).collect();
        assert_eq!(names, vec!["c.wav", "a.wav", "b.wav"]);
    }

    #[tokio::test]
    async fn zero_cap_is_clamped_to_one() {
        let results = run_bounded(vec![1, 2, 3], 0, |i| async move { Ok::<_, ()>(i) }).await;
        assert_eq!(results.len(), 3);
    }
}
