//! # Event Subscriber
//!
//! Defines the subscription side of the event bus.

use crate::events::{EventFilter, SupplyChainEvent};
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::Stream;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was closed.
    #[error("Event bus closed")]
    Closed,
}

/// A subscription handle for receiving events.
///
/// Dropping it releases the underlying broadcast receiver.
pub struct Subscription {
    /// The broadcast receiver.
    receiver: broadcast::Receiver<SupplyChainEvent>,

    /// Filter for this subscription.
    filter: EventFilter,

    /// Events skipped because this subscriber fell behind.
    lagged: u64,
}

impl Subscription {
    /// Create a new subscription.
    pub(crate) fn new(
        receiver: broadcast::Receiver<SupplyChainEvent>,
        filter: EventFilter,
    ) -> Self {
        Self {
            receiver,
            filter,
            lagged: 0,
        }
    }

    /// Receive the next event that matches the filter.
    ///
    /// # Returns
    ///
    /// - `Some(event)` - The next matching event
    /// - `None` - The channel was closed (bus dropped)
    pub async fn recv(&mut self) -> Option<SupplyChainEvent> {
        loop {
            let event = match self.receiver.recv().await {
                Ok(e) => e,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some events dropped");
                    self.lagged += count;
                    continue;
                }
            };

            if self.filter.matches(&event) {
                return Some(event);
            }
            // Event doesn't match filter, continue waiting
        }
    }

    /// Try to receive the next event without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(event))` - An event was available and matched
    /// - `Ok(None)` - No event available (would block)
    /// - `Err(SubscriptionError::Closed)` - The channel was closed
    pub fn try_recv(&mut self) -> Result<Option<SupplyChainEvent>, SubscriptionError> {
        loop {
            let event = match self.receiver.try_recv() {
                Ok(e) => e,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(count)) => {
                    self.lagged += count;
                    continue;
                }
            };

            if self.filter.matches(&event) {
                return Ok(Some(event));
            }
            // Event doesn't match filter, try again
        }
    }

    /// Total events this subscriber missed by falling behind.
    #[must_use]
    pub fn lagged(&self) -> u64 {
        self.lagged
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

/// A stream wrapper for subscriptions.
///
/// Implements `tokio_stream::Stream` for use with stream combinators.
pub struct EventStream {
    subscription: Subscription,
}

impl EventStream {
    /// Create a new event stream from a subscription.
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// Get the filter for this stream.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        self.subscription.filter()
    }
}

impl Stream for EventStream {
    type Item = SupplyChainEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // Use try_recv for non-blocking check
        match self.subscription.try_recv() {
            Ok(Some(event)) => Poll::Ready(Some(event)),
            Ok(None) => {
                // No event ready, need to wait
                // Register waker and return pending
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Err(SubscriptionError::Closed) => Poll::Ready(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventTopic;
    use crate::publisher::InMemoryEventBus;
    use crate::EventPublisher;
    use shared_types::Identity;
    use std::time::Duration;
    use tokio::time::timeout;

    fn contamination(product_id: u64) -> SupplyChainEvent {
        SupplyChainEvent::ContaminationReported {
            product_id,
            reporter: Identity([0x0C; 20]),
        }
    }

    fn transfer(product_id: u64) -> SupplyChainEvent {
        SupplyChainEvent::ProductTransferred {
            product_id,
            previous_owner: Identity([0x0A; 20]),
            new_owner: Identity([0x0B; 20]),
            new_location: "Warehouse1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_subscription_recv() {
        let bus = InMemoryEventBus::new();
        let mut sub = bus.subscribe(EventFilter::all());

        bus.publish(contamination(1)).await;

        let received = timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout")
            .expect("event");

        assert_eq!(received, contamination(1));
    }

    #[tokio::test]
    async fn test_subscription_filter() {
        let bus = InMemoryEventBus::new();

        // Recall consumer only cares about contamination
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Contamination]));

        // Transfer event (should be filtered)
        bus.publish(transfer(1)).await;
        // Contamination event (should be received)
        bus.publish(contamination(1)).await;

        let received = timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout")
            .expect("event");

        assert_eq!(received, contamination(1));
    }

    #[tokio::test]
    async fn test_events_arrive_in_publish_order() {
        let bus = InMemoryEventBus::new();
        let mut sub = bus.subscribe(EventFilter::all());

        for id in 1..=5 {
            bus.publish(transfer(id)).await;
        }

        for id in 1..=5 {
            let received = sub.try_recv().unwrap().unwrap();
            assert_eq!(received.product_id(), Some(id));
        }
    }

    #[tokio::test]
    async fn test_subscription_drop_cleanup() {
        let bus = InMemoryEventBus::new();

        {
            let _sub1 = bus.subscribe(EventFilter::all());
            let _sub2 = bus.subscribe(EventFilter::all());
            assert_eq!(bus.subscriber_count(), 2);
        }

        // After drop, count should be 0
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_try_recv_empty() {
        let bus = InMemoryEventBus::new();
        let mut sub = bus.subscribe(EventFilter::all());

        let result = sub.try_recv();
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_try_recv_closed() {
        let bus = InMemoryEventBus::new();
        let mut sub = bus.subscribe(EventFilter::all());
        drop(bus);

        assert_eq!(sub.try_recv(), Err(SubscriptionError::Closed));
    }

    #[test]
    fn test_event_stream_filter() {
        let bus = InMemoryEventBus::new();
        let filter = EventFilter::topics(vec![EventTopic::Products]);
        let stream = bus.event_stream(filter);

        assert_eq!(stream.filter().topics.len(), 1);
        assert_eq!(stream.filter().topics[0], EventTopic::Products);
    }

    #[tokio::test]
    async fn test_event_stream_yields_matching_events() {
        use tokio_stream::StreamExt;

        let bus = InMemoryEventBus::new();
        let mut stream = bus.event_stream(EventFilter::topics(vec![EventTopic::Contamination]));

        bus.emit(transfer(1));
        bus.emit(contamination(2));

        let received = timeout(Duration::from_millis(100), stream.next())
            .await
            .expect("timeout")
            .expect("event");
        assert_eq!(received, contamination(2));

        drop(bus);
        let closed = timeout(Duration::from_millis(100), stream.next())
            .await
            .expect("timeout");
        assert_eq!(closed, None);
    }

    #[test]
    fn test_lagged_events_are_counted() {
        let bus = InMemoryEventBus::with_capacity(2);
        let mut sub = bus.subscribe(EventFilter::all());

        for id in 1..=5 {
            bus.emit(contamination(id));
        }

        // Capacity 2: the three oldest are gone
        assert_eq!(sub.try_recv().unwrap(), Some(contamination(4)));
        assert_eq!(sub.lagged(), 3);
        assert_eq!(sub.try_recv().unwrap(), Some(contamination(5)));
        assert_eq!(sub.try_recv().unwrap(), None);
    }
}
