//! Cancellable one-shot and repeating timers on the tokio runtime.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// A spawned timer task. Cancelled on [`cancel`](Self::cancel) or drop.
#[derive(Debug)]
pub struct CancellableTimer {
    task: Option<JoinHandle<()>>,
}

impl CancellableTimer {
    /// Run `f` once after `delay`.
    pub fn after(delay: Duration, f: impl FnOnce() + Send + 'static) -> Self {
        let task = tokio::spawn(async move {
            time::sleep(delay).await;
            f();
        });
        Self { task: Some(task) }
    }

    /// Run `f` every `period`, first after one full period.
    pub fn every(period: Duration, mut f: impl FnMut() + Send + 'static) -> Self {
        let task = tokio::spawn(async move {
            let mut ticks = time::interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                f();
            }
        });
        Self { task: Some(task) }
    }

    /// Stop the timer. A callback that has not started yet never runs.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// True until the timer is cancelled or a one-shot has fired.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for CancellableTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_after_fires_once() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let timer = CancellableTimer::after(Duration::from_secs(2), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        time::sleep(Duration::from_millis(1_999)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!timer.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_callback() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let mut timer = CancellableTimer::after(Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        timer.cancel();
        assert!(!timer.is_active());
        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_repeats_until_dropped() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let timer = CancellableTimer::every(Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 3);

        drop(timer);
        time::sleep(Duration::from_secs(3)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 3);
    }
}
