//! # Event Relay
//!
//! Subscribes to every registry event and turns it into a log line and a
//! metric update. A contamination report is logged at WARN: it is the recall
//! trigger.

use ft_telemetry::{
    component_span, log_event, log_participant_event, log_product_event, metric_inc,
    time_histogram,
    CONTAMINATION_REPORTS, EVENT_BUS_MESSAGES_LAGGED, EVENT_BUS_MESSAGES_RELAYED,
    EVENT_RELAY_DURATION, PARTICIPANTS_REGISTERED, PRODUCTS_REGISTERED, PRODUCT_TRANSFERS,
};
use shared_bus::{EventFilter, InMemoryEventBus, Subscription, SupplyChainEvent};
use tokio::sync::watch;
use tracing::debug;

/// Relays bus events to logs and metrics until shutdown or bus close.
pub struct EventRelay {
    subscription: Subscription,
    lagged_reported: u64,
    relayed: u64,
}

impl EventRelay {
    /// Subscribe to all topics on `bus`.
    pub fn new(bus: &InMemoryEventBus) -> Self {
        Self {
            subscription: bus.subscribe(EventFilter::all()),
            lagged_reported: 0,
            relayed: 0,
        }
    }

    /// Run the relay loop. Returns the number of events relayed.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> u64 {
        log_event!(info, "relay", "Event relay started");

        loop {
            tokio::select! {
                event = self.subscription.recv() => match event {
                    Some(event) => self.handle(&event),
                    None => {
                        log_event!(info, "relay", "Event bus closed");
                        break;
                    }
                },
                _ = shutdown.changed() => {
                    // Drain what is already buffered before stopping
                    while let Ok(Some(event)) = self.subscription.try_recv() {
                        self.handle(&event);
                    }
                    log_event!(info, "relay", "Shutdown signal received", relayed = self.relayed);
                    break;
                }
            }
        }

        self.relayed
    }

    /// Log one event and update the counters it drives.
    pub fn handle(&mut self, event: &SupplyChainEvent) {
        let _timer = time_histogram!(EVENT_RELAY_DURATION);
        let _span = component_span!("relay_event", component = "relay", kind = event.kind()).entered();
        self.report_lag();

        match event {
            SupplyChainEvent::ParticipantRegistered {
                identity,
                name,
                role,
            } => {
                metric_inc!(PARTICIPANTS_REGISTERED);
                log_participant_event!(
                    info,
                    "directory",
                    "Participant registered",
                    identity,
                    name = name.as_str(),
                    role = role.as_str()
                );
            }
            SupplyChainEvent::ProductRegistered {
                product_id,
                name,
                farmer,
            } => {
                metric_inc!(PRODUCTS_REGISTERED);
                log_product_event!(
                    info,
                    "registry",
                    "Product registered",
                    *product_id,
                    name = name.as_str(),
                    farmer = %farmer
                );
            }
            SupplyChainEvent::ProductTransferred {
                product_id,
                previous_owner,
                new_owner,
                new_location,
            } => {
                metric_inc!(PRODUCT_TRANSFERS);
                log_product_event!(
                    info,
                    "ledger",
                    "Product transferred",
                    *product_id,
                    from = %previous_owner,
                    to = %new_owner,
                    location = new_location.as_str()
                );
            }
            SupplyChainEvent::ContaminationReported {
                product_id,
                reporter,
            } => {
                metric_inc!(CONTAMINATION_REPORTS);
                log_product_event!(
                    warn,
                    "guard",
                    "Contamination reported, product must be recalled",
                    *product_id,
                    reporter = %reporter
                );
            }
        }

        metric_inc!(
            EVENT_BUS_MESSAGES_RELAYED,
            &[event.topic().as_str(), event.kind()]
        );
        if let Ok(json) = serde_json::to_string(event) {
            debug!("EVENT_FLOW_JSON {}", json);
        }
        self.relayed += 1;
    }

    fn report_lag(&mut self) {
        let lagged = self.subscription.lagged();
        if lagged > self.lagged_reported {
            let missed = lagged - self.lagged_reported;
            EVENT_BUS_MESSAGES_LAGGED.inc_by(missed as f64);
            log_event!(warn, "relay", "Relay fell behind the event bus", missed = missed);
            self.lagged_reported = lagged;
        }
    }
}
