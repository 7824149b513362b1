//! # Event Publisher
//!
//! The bus itself: one tokio broadcast channel shared by every store.
//!
//! Each subscriber gets its own receiver and applies its filter on receipt,
//! so `publish` reports how many receivers the event reached, not how many
//! will accept it.

use crate::events::{DemoEvent, EventFilter, EventTopic};
use crate::subscriber::{EventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

/// Output port the stores publish through.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish `event`, returning the number of receivers it reached.
    async fn publish(&self, event: DemoEvent) -> usize;
}

/// Published-event counters, one per topic.
#[derive(Debug, Default)]
struct TopicCounters {
    qr: AtomicU64,
    security: AtomicU64,
    realtime: AtomicU64,
}

impl TopicCounters {
    fn slot(&self, topic: EventTopic) -> &AtomicU64 {
        match topic {
            EventTopic::Qr => &self.qr,
            EventTopic::Security => &self.security,
            EventTopic::Realtime => &self.realtime,
        }
    }
}

/// In-process broadcast bus.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<DemoEvent>,
    published: TopicCounters,
    capacity: usize,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus buffering up to `capacity` events per lagging subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            published: TopicCounters::default(),
            capacity,
        }
    }

    /// Subscribe to events matching `filter`.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, "New subscription created");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Subscribe as a `Stream`.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.subscribe(filter))
    }

    /// Live receivers, filtered or not.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Events published on `topic` since the bus was created.
    #[must_use]
    pub fn published(&self, topic: EventTopic) -> u64 {
        self.published.slot(topic).load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: DemoEvent) -> usize {
        let topic = event.topic();
        self.published.slot(topic).fetch_add(1, Ordering::Relaxed);

        // Sending with no receivers fails; stores publish before handlers exist.
        let receivers = self.sender.send(event).unwrap_or(0);
        debug!(topic = topic.label(), receivers, "Event published");
        receivers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> DemoEvent {
        DemoEvent::SecureModeChanged { enabled: true }
    }

    #[tokio::test]
    async fn test_publish_no_subscribers() {
        let bus = InMemoryEventBus::new();

        assert_eq!(bus.publish(event()).await, 0);
        assert_eq!(bus.published(EventTopic::Security), 1);
    }

    #[tokio::test]
    async fn test_publish_reaches_every_receiver() {
        let bus = InMemoryEventBus::new();
        let _all = bus.subscribe(EventFilter::all());
        let _realtime = bus.subscribe(EventFilter::topics(vec![EventTopic::Realtime]));

        // Filtering happens on receipt, so both receivers count.
        assert_eq!(bus.publish(event()).await, 2);
        assert_eq!(bus.subscriber_count(), 2);
    }

    #[tokio::test]
    async fn test_published_counts_by_topic() {
        let bus = InMemoryEventBus::new();

        bus.publish(event()).await;
        bus.publish(event()).await;
        bus.publish(DemoEvent::NotificationsCleared { removed: 3 })
            .await;

        assert_eq!(bus.published(EventTopic::Security), 2);
        assert_eq!(bus.published(EventTopic::Realtime), 1);
        assert_eq!(bus.published(EventTopic::Qr), 0);
    }

    #[test]
    fn test_capacity_is_at_least_one() {
        assert_eq!(InMemoryEventBus::with_capacity(100).capacity(), 100);
        assert_eq!(InMemoryEventBus::with_capacity(0).capacity(), 1);
        assert_eq!(InMemoryEventBus::default().capacity(), DEFAULT_CHANNEL_CAPACITY);
    }
}
