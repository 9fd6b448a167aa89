//! Subscriber registry and fan-out.
//!
//! Each registered subscriber gets a bounded queue and its own delivery task,
//! so one slow or dead connection never holds up the publisher or the other
//! subscribers. `publish` only enqueues; it never awaits network I/O.

pub mod subscriber;

pub use subscriber::{ChannelSubscriber, Subscriber, WebSocketSubscriber};

use dashmap::DashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::HubConfig;
use crate::domain::Update;
use crate::error::DeliveryError;

/// Opaque handle returned by [`BroadcastHub::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberHandle(u64);

impl fmt::Display for SubscriberHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

struct Slot {
    queue: mpsc::Sender<Arc<Update>>,
    task: JoinHandle<()>,
}

struct HubInner {
    slots: DashMap<SubscriberHandle, Slot>,
    next_id: AtomicU64,
    delivered: AtomicU64,
    dropped: AtomicU64,
    queue_capacity: usize,
    send_timeout: Duration,
}

impl HubInner {
    /// Remove a failed subscriber. Returns false if it was already gone.
    fn drop_subscriber(&self, handle: SubscriberHandle, reason: &DeliveryError) -> bool {
        match self.slots.remove(&handle) {
            Some((_, slot)) => {
                slot.task.abort();
                self.dropped.fetch_add(1, Ordering::Relaxed);
                warn!("Dropping subscriber {}: {}", handle, reason);
                true
            }
            None => false,
        }
    }
}

/// Delivery counters since the hub was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HubStats {
    pub subscribers: usize,
    pub delivered: u64,
    pub dropped: u64,
}

/// Concurrency-safe set of live subscribers
#[derive(Clone)]
pub struct BroadcastHub {
    inner: Arc<HubInner>,
}

impl BroadcastHub {
    pub fn new(config: &HubConfig) -> Self {
        Self {
            inner: Arc::new(HubInner {
                slots: DashMap::new(),
                next_id: AtomicU64::new(1),
                delivered: AtomicU64::new(0),
                dropped: AtomicU64::new(0),
                queue_capacity: config.queue_capacity.max(1),
                send_timeout: config.send_timeout(),
            }),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&HubConfig::default())
    }

    /// Add a subscriber to the live set and start its delivery task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn register<S: Subscriber>(&self, subscriber: S) -> SubscriberHandle {
        let handle = SubscriberHandle(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let (queue, rx) = mpsc::channel(self.inner.queue_capacity);
        let label = subscriber.describe();

        let task = tokio::spawn(deliver_loop(
            Arc::downgrade(&self.inner),
            handle,
            Box::new(subscriber),
            rx,
            self.inner.send_timeout,
        ));
        self.inner.slots.insert(handle, Slot { queue, task });

        info!("Registered {} ({})", handle, label);
        handle
    }

    /// Remove a subscriber. Unknown or already removed handles are ignored.
    pub fn unregister(&self, handle: SubscriberHandle) -> bool {
        match self.inner.slots.remove(&handle) {
            Some((_, slot)) => {
                slot.task.abort();
                info!("Unregistered {}", handle);
                true
            }
            None => false,
        }
    }

    /// Queue `update` for every registered subscriber and return how many
    /// accepted it. Subscribers whose queue is full or closed are dropped.
    pub fn publish(&self, update: Update) -> usize {
        let update = Arc::new(update);
        let mut accepted = 0;
        let mut stale = Vec::new();

        // Removal happens after iteration so no shard lock is held while mutating
        for entry in self.inner.slots.iter() {
            match entry.value().queue.try_send(Arc::clone(&update)) {
                Ok(()) => accepted += 1,
                Err(TrySendError::Full(_)) => stale.push((*entry.key(), DeliveryError::QueueFull)),
                Err(TrySendError::Closed(_)) => stale.push((*entry.key(), DeliveryError::Closed)),
            }
        }

        for (handle, reason) in stale {
            self.inner.drop_subscriber(handle, &reason);
        }

        debug!(
            "Published update for match {} to {} subscribers",
            update.match_id(),
            accepted
        );
        accepted
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.slots.len()
    }

    pub fn is_registered(&self, handle: SubscriberHandle) -> bool {
        self.inner.slots.contains_key(&handle)
    }

    pub fn stats(&self) -> HubStats {
        HubStats {
            subscribers: self.subscriber_count(),
            delivered: self.inner.delivered.load(Ordering::Relaxed),
            dropped: self.inner.dropped.load(Ordering::Relaxed),
        }
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Drain one subscriber's queue in order, bounding every send.
async fn deliver_loop(
    hub: Weak<HubInner>,
    handle: SubscriberHandle,
    mut subscriber: Box<dyn Subscriber>,
    mut rx: mpsc::Receiver<Arc<Update>>,
    send_timeout: Duration,
) {
    while let Some(update) = rx.recv().await {
        let outcome = match tokio::time::timeout(send_timeout, subscriber.deliver(&update)).await
        {
            Ok(result) => result,
            Err(_) => Err(DeliveryError::Timeout {
                elapsed_ms: send_timeout.as_millis() as u64,
            }),
        };

        // Once the hub is gone the queue still drains; it closes when the slot's
        // sender is dropped.
        match (outcome, hub.upgrade()) {
            (Ok(()), Some(inner)) => {
                inner.delivered.fetch_add(1, Ordering::Relaxed);
            }
            (Ok(()), None) => {}
            (Err(err), Some(inner)) => {
                inner.drop_subscriber(handle, &err);
                return;
            }
            (Err(err), None) => {
                debug!("Subscriber {} failed after hub shutdown: {}", handle, err);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LiveMatch, MatchStats, MatchStatus};
    use async_trait::async_trait;

    fn update(id: &str) -> Update {
        Update::new(
            LiveMatch {
                id: id.to_string(),
                home_team: "Home".to_string(),
                away_team: "Away".to_string(),
                score: "0-0".to_string(),
                elapsed_minutes: 60,
                league: "Test".to_string(),
                status: MatchStatus::Live,
            },
            MatchStats::default(),
            &[],
        )
    }

    struct FailingSubscriber;

    #[async_trait]
    impl Subscriber for FailingSubscriber {
        async fn deliver(&mut self, _update: &Update) -> Result<(), DeliveryError> {
            Err(DeliveryError::Closed)
        }
    }

    struct StalledSubscriber;

    #[async_trait]
    impl Subscriber for StalledSubscriber {
        async fn deliver(&mut self, _update: &Update) -> Result<(), DeliveryError> {
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_register_and_unregister() {
        let hub = BroadcastHub::with_defaults();
        let (sub, _rx) = ChannelSubscriber::pair(4);
        let handle = hub.register(sub);
        assert!(hub.is_registered(handle));
        assert_eq!(hub.subscriber_count(), 1);

        assert!(hub.unregister(handle));
        assert!(!hub.unregister(handle));
        assert_eq!(hub.subscriber_count(), 0);
        assert_eq!(hub.publish(update("1")), 0);
    }

    #[tokio::test]
    async fn test_per_subscriber_fifo() {
        let hub = BroadcastHub::with_defaults();
        let (sub, mut rx) = ChannelSubscriber::pair(8);
        hub.register(sub);

        for id in ["a", "b", "c"] {
            hub.publish(update(id));
        }
        for id in ["a", "b", "c"] {
            assert_eq!(rx.recv().await.unwrap().match_id(), id);
        }
    }

    #[tokio::test]
    async fn test_failing_subscriber_is_removed() {
        let hub = BroadcastHub::with_defaults();
        let failing = hub.register(FailingSubscriber);
        let (sub, mut rx) = ChannelSubscriber::pair(4);
        let healthy = hub.register(sub);

        assert_eq!(hub.publish(update("1")), 2);
        assert_eq!(rx.recv().await.unwrap().match_id(), "1");
        settle().await;

        assert!(!hub.is_registered(failing));
        assert!(hub.is_registered(healthy));
        assert_eq!(hub.stats().dropped, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_subscriber_times_out() {
        let hub = BroadcastHub::new(&HubConfig {
            queue_capacity: 4,
            send_timeout_ms: 100,
        });
        let stalled = hub.register(StalledSubscriber);
        hub.publish(update("1"));
        settle().await;
        assert!(hub.is_registered(stalled));

        tokio::time::sleep(Duration::from_millis(150)).await;
        settle().await;
        assert!(!hub.is_registered(stalled));
    }

    #[tokio::test]
    async fn test_queued_updates_survive_hub_drop() {
        let hub = BroadcastHub::with_defaults();
        let (sub, mut rx) = ChannelSubscriber::pair(8);
        hub.register(sub);

        assert_eq!(hub.publish(update("1")), 1);
        assert_eq!(hub.publish(update("2")), 1);
        drop(hub);

        assert_eq!(rx.recv().await.unwrap().match_id(), "1");
        assert_eq!(rx.recv().await.unwrap().match_id(), "2");
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_full_queue_drops_subscriber() {
        let hub = BroadcastHub::new(&HubConfig {
            queue_capacity: 1,
            send_timeout_ms: 60_000,
        });
        let stalled = hub.register(StalledSubscriber);

        // First update is taken by the delivery task and blocks there,
        // second fills the queue, third overflows it.
        hub.publish(update("1"));
        settle().await;
        hub.publish(update("2"));
        assert_eq!(hub.publish(update("3")), 0);
        assert!(!hub.is_registered(stalled));
    }
}
