//! Cancellable reset-on-input timer
//!
//! Each `schedule` replaces the pending value and restarts the quiet period;
//! only the value that survives a full quiet period is delivered. Values carry
//! a sequence number and [`Settled::recv`] drops any that a later `schedule`
//! or `cancel` superseded, including ones the timer already sent.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Debouncer delivering settled values on a channel
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<(u64, T)>,
    latest: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

/// Receiving end of a [`Debouncer`]
#[derive(Debug)]
pub struct Settled<T> {
    rx: mpsc::UnboundedReceiver<(u64, T)>,
    latest: Arc<AtomicU64>,
}

impl<T> Settled<T> {
    /// Next value that is still current; cancel safe
    pub async fn recv(&mut self) -> Option<T> {
        while let Some((seq, value)) = self.rx.recv().await {
            if self.is_current(seq) {
                return Some(value);
            }
            trace!("Dropping superseded debounced value");
        }
        None
    }

    /// Non-blocking variant of [`Settled::recv`]
    pub fn try_recv(&mut self) -> Option<T> {
        while let Ok((seq, value)) = self.rx.try_recv() {
            if self.is_current(seq) {
                return Some(value);
            }
        }
        None
    }

    fn is_current(&self, seq: u64) -> bool {
        seq == self.latest.load(Ordering::SeqCst)
    }
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its settled values arrive on
    pub fn new(delay: Duration) -> (Self, Settled<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let latest = Arc::new(AtomicU64::new(0));
        (
            Self {
                delay,
                tx,
                latest: Arc::clone(&latest),
                pending: None,
            },
            Settled { rx, latest },
        )
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value with `value` and restart the timer
    pub fn schedule(&mut self, value: T) {
        if self.cancel() {
            trace!("Debounce timer reset");
        }

        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send((seq, value));
        }));
    }

    /// Drop the pending value, if any; returns whether one was pending
    ///
    /// A value the timer already sent but nobody received is dropped too.
    pub fn cancel(&mut self) -> bool {
        self.latest.fetch_add(1, Ordering::SeqCst);
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_delay() {
        let (debouncer, _rx) = Debouncer::<String>::new(Duration::from_millis(150));
        assert_eq!(debouncer.delay(), Duration::from_millis(150));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_value_fires() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(150));

        debouncer.schedule("T");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule("Th");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule("The");

        assert_eq!(rx.recv().await, Some("The"));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_quiet_period() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(150));
        let start = tokio::time::Instant::now();

        debouncer.schedule(1);
        assert_eq!(rx.recv().await, Some(1));
        assert!(start.elapsed() >= Duration::from_millis(150));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(150));

        debouncer.schedule(1);
        assert!(debouncer.is_pending());
        assert!(debouncer.cancel());
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(rx.try_recv().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sent_but_unread_value_is_superseded() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(150));

        // Timer fires and sends before anyone reads
        debouncer.schedule(1);
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.schedule(2);

        assert_eq!(rx.recv().await, Some(2));
        assert!(rx.try_recv().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_sent_value() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(150));

        debouncer.schedule(1);
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.cancel();

        assert!(rx.try_recv().is_none());
    }
}
