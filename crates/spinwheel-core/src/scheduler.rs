use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::resolver::SpinTicket;

/// Delivers a ticket back to the control loop once its delay has elapsed.
///
/// Scheduling replaces whatever was pending before; only the latest ticket
/// is ever delivered.
pub trait Scheduler {
    fn schedule(&mut self, ticket: SpinTicket);

    /// Drop the pending delivery, if any.
    fn cancel(&mut self);

    fn is_pending(&self) -> bool;
}

/// One-shot tokio timer that sends the ticket over a channel when it fires.
///
/// `T` is the message type of the receiving loop; `wrap` lifts the ticket
/// into it.
pub struct TokioScheduler<T> {
    tx: UnboundedSender<T>,
    wrap: fn(SpinTicket) -> T,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> TokioScheduler<T> {
    pub fn new(tx: UnboundedSender<T>, wrap: fn(SpinTicket) -> T) -> Self {
        Self {
            tx,
            wrap,
            pending: None,
        }
    }
}

impl<T: Send + 'static> Scheduler for TokioScheduler<T> {
    fn schedule(&mut self, ticket: SpinTicket) {
        self.cancel();

        let tx = self.tx.clone();
        let message = (self.wrap)(ticket.clone());
        let delay = ticket.delay();
        debug!(
            "Resolution for spin {} scheduled in {:?}",
            ticket.generation(),
            delay
        );
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(message);
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for TokioScheduler<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

/// Holds the pending ticket until the test (or caller) fires it by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: Option<SpinTicket>,
    scheduled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending ticket as if its delay had elapsed.
    pub fn fire(&mut self) -> Option<SpinTicket> {
        self.pending.take()
    }

    /// How many times `schedule` has been called.
    pub fn scheduled(&self) -> usize {
        self.scheduled
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, ticket: SpinTicket) {
        self.scheduled += 1;
        self.pending = Some(ticket);
    }

    fn cancel(&mut self) {
        self.pending = None;
    }

    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::resolver::SpinResolver;
    use crate::wheel::WheelConfig;

    #[derive(Debug)]
    enum Message {
        Resolve(SpinTicket),
    }

    fn ticket() -> SpinTicket {
        let mut resolver = SpinResolver::seeded(WheelConfig::default(), 1).unwrap();
        resolver.spin().unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx, Message::Resolve);
        let ticket = ticket();
        scheduler.schedule(ticket.clone());
        assert!(scheduler.is_pending());

        tokio::time::sleep(Duration::from_millis(4900)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;
        let Message::Resolve(delivered) = rx.recv().await.unwrap();
        assert_eq!(delivered, ticket);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_delivery() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx, Message::Resolve);
        scheduler.schedule(ticket());
        scheduler.cancel();
        assert!(!scheduler.is_pending());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_pending() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx, Message::Resolve);
        let mut resolver = SpinResolver::seeded(WheelConfig::default(), 1).unwrap();
        let first = resolver.spin().unwrap();
        resolver.cancel();
        let second = resolver.spin().unwrap();

        scheduler.schedule(first);
        scheduler.schedule(second.clone());

        tokio::time::sleep(Duration::from_secs(6)).await;
        let Message::Resolve(delivered) = rx.recv().await.unwrap();
        assert_eq!(delivered, second);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_manual_scheduler() {
        let mut scheduler = ManualScheduler::new();
        assert!(scheduler.fire().is_none());

        let ticket = ticket();
        scheduler.schedule(ticket.clone());
        assert!(scheduler.is_pending());
        assert_eq!(scheduler.scheduled(), 1);
        assert_eq!(scheduler.fire(), Some(ticket));
        assert!(!scheduler.is_pending());
    }
}
