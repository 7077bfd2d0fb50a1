//! Auto-advancing slide carousel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::timer::CancellableTimer;

/// Default time each slide stays up.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Slide index over `len` slides, advancing on a timer.
///
/// Manual navigation cancels the pending tick and restarts the interval,
/// so a slide the shopper picked stays up for a full period.
#[derive(Debug)]
pub struct Carousel {
    len: usize,
    interval: Duration,
    index: Arc<watch::Sender<usize>>,
    timer: Option<CancellableTimer>,
}

impl Carousel {
    pub fn new(len: usize, interval: Duration) -> Self {
        let (index, _) = watch::channel(0);
        Self {
            len,
            interval,
            index: Arc::new(index),
            timer: None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        *self.index.borrow()
    }

    /// Receiver that observes slide changes.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.index.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(CancellableTimer::is_active)
    }

    /// Start auto-advancing. Does nothing with fewer than two slides.
    pub fn start(&mut self) {
        if self.len < 2 {
            return;
        }
        let len = self.len;
        let index = Arc::clone(&self.index);
        self.timer = Some(CancellableTimer::every(self.interval, move || {
            index.send_modify(|i| *i = (*i + 1) % len);
        }));
    }

    pub fn stop(&mut self) {
        self.timer = None;
    }

    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        let target = (self.current() + 1) % self.len;
        self.jump(target);
    }

    pub fn prev(&mut self) {
        if self.len == 0 {
            return;
        }
        let target = (self.current() + self.len - 1) % self.len;
        self.jump(target);
    }

    /// Show slide `index`. Returns `false` if it is out of range.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.jump(index);
        true
    }

    fn jump(&mut self, target: usize) {
        self.index.send_replace(target);
        if self.timer.take().is_some() {
            self.start();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_advance_wraps() {
        let mut carousel = Carousel::new(3, ms(1_000));
        carousel.start();

        sleep(ms(1_001)).await;
        assert_eq!(carousel.current(), 1);
        sleep(ms(2_000)).await;
        assert_eq!(carousel.current(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_navigation_resets_pending_tick() {
        let mut carousel = Carousel::new(4, ms(1_000));
        carousel.start();

        sleep(ms(600)).await;
        carousel.next();
        assert_eq!(carousel.current(), 1);

        // The original tick at 1000ms was cancelled.
        sleep(ms(600)).await;
        assert_eq!(carousel.current(), 1);

        // The restarted interval fires at 1600ms.
        sleep(ms(401)).await;
        assert_eq!(carousel.current(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_navigation_when_stopped() {
        let mut carousel = Carousel::new(3, ms(1_000));
        carousel.prev();
        assert_eq!(carousel.current(), 2);
        assert!(carousel.go_to(1));
        assert!(!carousel.go_to(3));
        assert!(!carousel.is_running());

        sleep(ms(5_000)).await;
        assert_eq!(carousel.current(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_slide_never_runs() {
        let mut carousel = Carousel::new(1, ms(1_000));
        carousel.start();
        assert!(!carousel.is_running());
        carousel.next();
        assert_eq!(carousel.current(), 0);
    }
}
