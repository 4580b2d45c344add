// SPDX-License-Identifier: MPL-2.0
//! Delayed delivery that restarts on every call.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Sends a message once input has been quiet for `delay`.
///
/// At most one timer is pending. Scheduling again aborts the pending timer,
/// so only the most recent message is ever delivered.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    sender: UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, sender: UnboundedSender<T>) -> Self {
        Self {
            delay,
            sender,
            pending: None,
        }
    }

    /// Cancels any pending timer and starts a new one for `message`.
    pub fn schedule(&mut self, message: T) {
        self.cancel();
        let delay = self.delay;
        let sender = self.sender.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone only during shutdown.
            let _ = sender.send(message);
        }));
    }

    /// Aborts the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    #[must_use]
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
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn only_last_message_is_delivered() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(500), tx);

        debouncer.schedule(1);
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.schedule(2);
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(rx.try_recv().is_err(), "nothing fires before the quiet period");

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(rx.try_recv().ok(), Some(2));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_message() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(100), tx);

        debouncer.schedule("x");
        assert!(debouncer.is_pending());
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(rx.try_recv().is_err());
        assert!(!debouncer.is_pending());
    }
}
