//! Cancellable one-shot debounce timer.
//!
//! Schedule on input change, cancel on a subsequent change or teardown,
//! fire exactly once after the quiet period. Cancellation covers only the
//! quiet period: a future that has already started running is never
//! interrupted mid-flight, it runs to completion.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// A one-shot timer that runs a future after a quiet period.
pub struct Debouncer {
    delay: Duration,
    cancelled: Option<Arc<AtomicBool>>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            cancelled: None,
        }
    }

    /// Arm the timer with `future`, cancelling any pending one.
    ///
    /// The future runs once, `delay` after this call, unless `schedule` or
    /// [`cancel`](Self::cancel) is called again before the delay elapses.
    /// Once the future has started, neither call stops it.
    pub fn schedule<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let cancelled = Arc::new(AtomicBool::new(false));
        self.cancelled = Some(Arc::clone(&cancelled));
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if cancelled.load(Ordering::Acquire) {
                return;
            }
            future.await;
        });
    }

    /// Cancel the pending timer, if any.
    ///
    /// A no-op for a future that is already running.
    pub fn cancel(&mut self) {
        if let Some(flag) = self.cancelled.take() {
            flag.store(true, Ordering::Release);
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        let counter = Arc::clone(&fired);
        debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        settle().await;

        tokio::time::advance(Duration::from_millis(499)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::advance(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // Does not fire again
        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_the_pending_future() {
        let fired = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        for label in ["first", "second", "third"] {
            let log = Arc::clone(&fired);
            debouncer.schedule(async move {
                log.lock().unwrap_or_else(std::sync::PoisonError::into_inner).push(label);
            });
            settle().await;
            tokio::time::advance(Duration::from_millis(100)).await;
            settle().await;
        }

        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;

        let log = fired.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        assert_eq!(*log, ["third"]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_firing() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        let counter = Arc::clone(&fired);
        debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        settle().await;
        debouncer.cancel();

        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_firing_does_not_interrupt_the_running_future() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        let counter = Arc::clone(&fired);
        debouncer.schedule(async move {
            tokio::time::sleep(Duration::from_secs(10)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        });
        settle().await;

        // Quiet period elapses; the future is now mid-await
        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        debouncer.cancel();

        tokio::time::advance(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_timer() {
        let fired = Arc::new(AtomicUsize::new(0));
        {
            let mut debouncer = Debouncer::new(Duration::from_millis(500));
            let counter = Arc::clone(&fired);
            debouncer.schedule(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            settle().await;
        }

        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
