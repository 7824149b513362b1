//! # Event Subscriber
//!
//! Receiving side of the bus. A lagging subscriber skips the events it
//! missed and keeps going; only a dropped bus ends a subscription.

use crate::events::{DemoEvent, EventFilter};
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was dropped.
    #[error("Event bus closed")]
    Closed,
}

/// Filtered receiver handed out by `InMemoryEventBus::subscribe`.
pub struct Subscription {
    receiver: broadcast::Receiver<DemoEvent>,
    filter: EventFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<DemoEvent>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Next matching event, or `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<DemoEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Subscriber lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next buffered matching event without waiting. `Ok(None)` when
    /// nothing matching is buffered.
    pub fn try_recv(&mut self) -> Result<Option<DemoEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) | Err(broadcast::error::TryRecvError::Lagged(_)) => {}
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
            }
        }
    }

    /// Every matching event currently buffered, oldest first.
    pub fn drain(&mut self) -> Vec<DemoEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.try_recv() {
            events.push(event);
        }
        events
    }

    #[must_use]
    pub fn event_filter(&self) -> &EventFilter {
        &self.filter
    }
}

/// [`Subscription`] as a `tokio_stream::Stream`.
pub struct EventStream {
    inner: BroadcastStream<DemoEvent>,
    filter: EventFilter,
}

impl EventStream {
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        Self {
            inner: BroadcastStream::new(subscription.receiver),
            filter: subscription.filter,
        }
    }

    /// Named apart from `StreamExt::filter`, which would shadow it.
    #[must_use]
    pub fn event_filter(&self) -> &EventFilter {
        &self.filter
    }
}

impl Stream for EventStream {
    type Item = DemoEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(event))) if this.filter.matches(&event) => {
                    return Poll::Ready(Some(event));
                }
                Poll::Ready(Some(Ok(_))) => {}
                Poll::Ready(Some(Err(BroadcastStreamRecvError::Lagged(skipped)))) => {
                    debug!(skipped, "Stream lagged, events dropped");
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventTopic;
    use crate::publisher::InMemoryEventBus;
    use crate::EventPublisher;
    use shared_types::ConnectionStatus;
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    fn security_event() -> DemoEvent {
        DemoEvent::SecureModeChanged { enabled: false }
    }

    fn realtime_event() -> DemoEvent {
        DemoEvent::ConnectionStatusChanged {
            status: ConnectionStatus::Connected,
        }
    }

    #[tokio::test]
    async fn test_subscription_recv() {
        let bus = InMemoryEventBus::new();
        let mut sub = bus.subscribe(EventFilter::all());

        bus.publish(security_event()).await;

        let received = timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout")
            .expect("event");

        assert_eq!(received, security_event());
    }

    #[tokio::test]
    async fn test_subscription_filter() {
        let bus = InMemoryEventBus::new();
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Realtime]));

        bus.publish(security_event()).await;
        bus.publish(realtime_event()).await;

        let received = timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout")
            .expect("event");

        assert_eq!(received, realtime_event());
    }

    #[tokio::test]
    async fn test_dropped_subscription_releases_receiver() {
        let bus = InMemoryEventBus::new();

        {
            let _sub1 = bus.subscribe(EventFilter::all());
            let _sub2 = bus.subscribe(EventFilter::all());
            assert_eq!(bus.subscriber_count(), 2);
        }

        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_try_recv_empty() {
        let bus = InMemoryEventBus::new();
        let mut sub = bus.subscribe(EventFilter::all());

        assert!(matches!(sub.try_recv(), Ok(None)));
    }

    #[tokio::test]
    async fn test_drain_collects_buffered_events() {
        let bus = InMemoryEventBus::new();
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Security]));

        bus.publish(security_event()).await;
        bus.publish(realtime_event()).await;
        bus.publish(security_event()).await;

        assert_eq!(sub.drain(), vec![security_event(), security_event()]);
        assert!(sub.drain().is_empty());
    }

    #[tokio::test]
    async fn test_event_stream_filters() {
        let bus = InMemoryEventBus::new();
        let mut stream = bus.event_stream(EventFilter::topics(vec![EventTopic::Realtime]));
        assert_eq!(stream.event_filter().topics, vec![EventTopic::Realtime]);

        bus.publish(security_event()).await;
        bus.publish(realtime_event()).await;

        let received = timeout(Duration::from_millis(100), stream.next())
            .await
            .expect("timeout")
            .expect("event");
        assert_eq!(received, realtime_event());
    }

    #[tokio::test]
    async fn test_event_stream_ends_when_bus_dropped() {
        let bus = InMemoryEventBus::new();
        let mut stream = bus.event_stream(EventFilter::all());
        drop(bus);

        let next = timeout(Duration::from_millis(100), stream.next())
            .await
            .expect("timeout");
        assert!(next.is_none());
    }
}
