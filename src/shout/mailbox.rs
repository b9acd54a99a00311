use super::Shout;
use tokio::sync::Mutex;
use tokio::sync::Semaphore;
use tokio::sync::mpsc::Receiver;
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::channel;
use tokio::sync::mpsc::error::TrySendError;

/// Outcome of handing a shout to the mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Queued,
    TooLong,
    Full,
}

/// Bounded FIFO of shouts awaiting a poller.
///
/// Each shout is handed to exactly one poller and never replayed. Polling
/// never waits for a shout to arrive.
#[derive(Debug)]
pub struct Mailbox {
    limit: usize,
    tx: Sender<Shout>,
    rx: Mutex<Receiver<Shout>>,
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new(crate::MAILBOX_CAPACITY, crate::SHOUT_LIMIT)
    }
}

impl Mailbox {
    /// Largest capacity a mailbox can be built with.
    pub const MAX_CAPACITY: usize = Semaphore::MAX_PERMITS;

    /// `capacity` is clamped to `1..=MAX_CAPACITY`.
    pub fn new(capacity: usize, limit: usize) -> Self {
        let (tx, rx) = channel::<Shout>(capacity.clamp(1, Self::MAX_CAPACITY));
        Self {
            limit,
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Enqueues `shout`, waiting for room while the mailbox is full.
    pub async fn publish(&self, shout: Shout) -> anyhow::Result<Delivery> {
        if shout.len() > self.limit {
            return Ok(Delivery::TooLong);
        }
        self.tx
            .send(shout)
            .await
            .map(|_| Delivery::Queued)
            .map_err(|_| anyhow::anyhow!("mailbox closed"))
    }

    /// Enqueues `shout` without waiting; reports `Full` when there is no room.
    pub fn offer(&self, shout: Shout) -> anyhow::Result<Delivery> {
        if shout.len() > self.limit {
            return Ok(Delivery::TooLong);
        }
        match self.tx.try_send(shout) {
            Ok(()) => Ok(Delivery::Queued),
            Err(TrySendError::Full(_)) => Ok(Delivery::Full),
            Err(TrySendError::Closed(_)) => Err(anyhow::anyhow!("mailbox closed")),
        }
    }

    /// Oldest queued shout, if any.
    pub async fn poll(&self) -> Option<Shout> {
        self.rx.lock().await.try_recv().ok()
    }

    /// Shouts currently queued.
    pub fn len(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Entry;
    use std::sync::Arc;
    use std::time::Duration;

    fn shout(message: &str) -> Shout {
        Shout::new("ann", Entry::stored(1, 1), message)
    }

    #[tokio::test]
    async fn first_in_first_out() {
        let mailbox = Mailbox::default();
        for message in ["A", "B", "C"] {
            assert_eq!(mailbox.publish(shout(message)).await.unwrap(), Delivery::Queued);
        }
        assert_eq!(mailbox.len(), 3);
        assert_eq!(mailbox.poll().await.unwrap().message(), "A");
        assert_eq!(mailbox.poll().await.unwrap().message(), "B");
        assert_eq!(mailbox.poll().await.unwrap().message(), "C");
        assert!(mailbox.poll().await.is_none());
    }

    #[tokio::test]
    async fn rejects_long_messages() {
        let mailbox = Mailbox::default();
        let long = "x".repeat(101);
        let edge = "x".repeat(100);
        assert_eq!(mailbox.publish(shout(&long)).await.unwrap(), Delivery::TooLong);
        assert_eq!(mailbox.offer(shout(&long)).unwrap(), Delivery::TooLong);
        assert!(mailbox.is_empty());
        assert_eq!(mailbox.publish(shout(&edge)).await.unwrap(), Delivery::Queued);
    }

    #[tokio::test]
    async fn counts_characters_not_bytes() {
        let mailbox = Mailbox::default();
        let wide = "é".repeat(100);
        assert_eq!(mailbox.offer(shout(&wide)).unwrap(), Delivery::Queued);
    }

    #[tokio::test]
    async fn oversized_capacity_is_clamped() {
        let mailbox = Mailbox::new(usize::MAX, 100);
        assert_eq!(mailbox.offer(shout("A")).unwrap(), Delivery::Queued);
        assert_eq!(mailbox.poll().await.unwrap().message(), "A");
    }

    #[tokio::test]
    async fn offer_reports_full() {
        let mailbox = Mailbox::new(2, 100);
        assert_eq!(mailbox.offer(shout("A")).unwrap(), Delivery::Queued);
        assert_eq!(mailbox.offer(shout("B")).unwrap(), Delivery::Queued);
        assert_eq!(mailbox.offer(shout("C")).unwrap(), Delivery::Full);
        assert_eq!(mailbox.poll().await.unwrap().message(), "A");
        assert_eq!(mailbox.offer(shout("D")).unwrap(), Delivery::Queued);
    }

    #[tokio::test]
    async fn publish_waits_for_room() {
        let mailbox = Arc::new(Mailbox::new(1, 100));
        mailbox.publish(shout("A")).await.unwrap();
        let waiting = {
            let mailbox = mailbox.clone();
            tokio::spawn(async move { mailbox.publish(shout("B")).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiting.is_finished());
        assert_eq!(mailbox.poll().await.unwrap().message(), "A");
        let delivered = tokio::time::timeout(Duration::from_secs(1), waiting)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(delivered, Delivery::Queued);
        assert_eq!(mailbox.poll().await.unwrap().message(), "B");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn each_shout_delivered_once() {
        let mailbox = Arc::new(Mailbox::default());
        for i in 0..50 {
            mailbox.offer(shout(&i.to_string())).unwrap();
        }
        let pollers = (0..8)
            .map(|_| {
                let mailbox = mailbox.clone();
                tokio::spawn(async move {
                    let mut seen = Vec::new();
                    while let Some(shout) = mailbox.poll().await {
                        seen.push(shout.message().to_string());
                    }
                    seen
                })
            })
            .collect::<Vec<_>>();
        let mut seen = futures::future::join_all(pollers)
            .await
            .into_iter()
            .flat_map(|r| r.unwrap())
            .collect::<Vec<_>>();
        assert_eq!(seen.len(), 50);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 50);
    }
}
