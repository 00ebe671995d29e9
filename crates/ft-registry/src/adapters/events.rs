//! `EventSink` implementations.

use crate::ports::outbound::EventSink;
use parking_lot::Mutex;
use shared_bus::{InMemoryEventBus, SupplyChainEvent};
use std::sync::Arc;

/// Publishes every event to the shared in-memory bus.
#[derive(Clone)]
pub struct BusEventSink {
    bus: Arc<InMemoryEventBus>,
}

impl BusEventSink {
    pub fn new(bus: Arc<InMemoryEventBus>) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &Arc<InMemoryEventBus> {
        &self.bus
    }
}

impl EventSink for BusEventSink {
    fn emit(&self, event: SupplyChainEvent) {
        self.bus.emit(event);
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<SupplyChainEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<SupplyChainEvent> {
        self.events.lock().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<SupplyChainEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: SupplyChainEvent) {
        self.events.lock().push(event);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: SupplyChainEvent) {}
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn emit(&self, event: SupplyChainEvent) {
        (**self).emit(event);
    }
}
