//! Transient notifications with auto-dismiss.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::timer::CancellableTimer;

/// How long a toast stays up unless closed.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
}

type Shown = Arc<Mutex<Vec<Toast>>>;

fn lock(shown: &Shown) -> MutexGuard<'_, Vec<Toast>> {
    shown.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Stack of visible toasts, oldest first.
#[derive(Debug)]
pub struct Toaster {
    shown: Shown,
    timers: HashMap<ToastId, CancellableTimer>,
    duration: Duration,
    next_id: u64,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl Toaster {
    pub fn new(duration: Duration) -> Self {
        Self {
            shown: Arc::default(),
            timers: HashMap::new(),
            duration,
            next_id: 0,
        }
    }

    /// Show a toast that dismisses itself after the configured duration.
    pub fn show(&mut self, kind: ToastKind, message: impl Into<String>) -> ToastId {
        self.timers.retain(|_, timer| timer.is_active());

        let id = ToastId(self.next_id);
        self.next_id += 1;
        lock(&self.shown).push(Toast {
            id,
            kind,
            message: message.into(),
        });

        let shown = Arc::clone(&self.shown);
        let timer = CancellableTimer::after(self.duration, move || {
            lock(&shown).retain(|t| t.id != id);
        });
        self.timers.insert(id, timer);
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> ToastId {
        self.show(ToastKind::Success, message)
    }

    pub fn info(&mut self, message: impl Into<String>) -> ToastId {
        self.show(ToastKind::Info, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> ToastId {
        self.show(ToastKind::Error, message)
    }

    /// Dismiss a toast now and cancel its timer. Returns `false` if it was
    /// already gone.
    pub fn close(&mut self, id: ToastId) -> bool {
        if let Some(mut timer) = self.timers.remove(&id) {
            timer.cancel();
        }
        let mut shown = lock(&self.shown);
        let before = shown.len();
        shown.retain(|t| t.id != id);
        shown.len() != before
    }

    pub fn visible(&self) -> Vec<Toast> {
        lock(&self.shown).clone()
    }

    /// Whether `id` still has a pending auto-dismiss.
    pub fn is_pending(&self, id: ToastId) -> bool {
        self.timers.get(&id).is_some_and(CancellableTimer::is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss() {
        let mut toaster = Toaster::new(Duration::from_secs(3));
        toaster.success("Added to bag");
        sleep(Duration::from_secs(1)).await;
        toaster.info("Saved to wishlist");

        assert_eq!(toaster.visible().len(), 2);
        sleep(Duration::from_millis(2_001)).await;

        let left: Vec<String> = toaster.visible().into_iter().map(|t| t.message).collect();
        assert_eq!(left, vec!["Saved to wishlist"]);

        sleep(Duration::from_secs(1)).await;
        assert!(toaster.visible().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_timer() {
        let mut toaster = Toaster::new(Duration::from_secs(3));
        let id = toaster.error("Checkout failed");
        assert!(toaster.is_pending(id));

        assert!(toaster.close(id));
        assert!(!toaster.is_pending(id));
        assert!(!toaster.close(id));
        assert!(toaster.visible().is_empty());
    }
}
