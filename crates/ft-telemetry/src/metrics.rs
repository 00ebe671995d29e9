//! Prometheus metrics for the FoodTrace registry.
//!
//! All metrics follow the naming convention: `ft_<component>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., transfers_total)
//! - **Gauge**: Value that can go up or down (e.g., products)
//! - **Histogram**: Distribution of values (e.g., event relay latency)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, GaugeVec, Histogram, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // PARTICIPANT DIRECTORY
    // =========================================================================

    /// Participants registered (including re-registrations)
    pub static ref PARTICIPANTS_REGISTERED: Counter = Counter::new(
        "ft_directory_participants_registered_total",
        "Total participant registrations accepted"
    ).expect("metric creation failed");

    // =========================================================================
    // PRODUCT REGISTRY
    // =========================================================================

    /// Products registered
    pub static ref PRODUCTS_REGISTERED: Counter = Counter::new(
        "ft_registry_products_registered_total",
        "Total products registered"
    ).expect("metric creation failed");

    /// Highest product id issued so far
    pub static ref PRODUCT_COUNT: Gauge = Gauge::new(
        "ft_registry_products",
        "Number of products in the registry"
    ).expect("metric creation failed");

    /// Ownership transfers
    pub static ref PRODUCT_TRANSFERS: Counter = Counter::new(
        "ft_registry_transfers_total",
        "Total ownership transfers committed"
    ).expect("metric creation failed");

    // =========================================================================
    // CONTAMINATION GUARD
    // =========================================================================

    /// Contamination reports (each one is a recall trigger)
    pub static ref CONTAMINATION_REPORTS: Counter = Counter::new(
        "ft_guard_contamination_reports_total",
        "Total products flagged as contaminated"
    ).expect("metric creation failed");

    // =========================================================================
    // REJECTIONS
    // =========================================================================

    /// Rejected operations by error kind, mirrored from the registry
    pub static ref OPERATIONS_REJECTED: GaugeVec = GaugeVec::new(
        Opts::new("ft_registry_operations_rejected", "Rejected operations by error kind"),
        &["kind"]  // kind: unauthorized/not_found/invalid_input/...
    ).expect("metric creation failed");

    // =========================================================================
    // EVENT BUS
    // =========================================================================

    /// Events relayed off the bus
    pub static ref EVENT_BUS_MESSAGES_RELAYED: CounterVec = CounterVec::new(
        Opts::new("ft_eventbus_messages_relayed_total", "Events relayed from the bus"),
        &["topic", "kind"]
    ).expect("metric creation failed");

    /// Events lost because the relay lagged behind the bus
    pub static ref EVENT_BUS_MESSAGES_LAGGED: Counter = Counter::new(
        "ft_eventbus_messages_lagged_total",
        "Events dropped because the relay fell behind"
    ).expect("metric creation failed");

    /// Time spent relaying one event
    pub static ref EVENT_RELAY_DURATION: Histogram = Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "ft_eventbus_relay_duration_seconds",
            "Time spent relaying one event"
        ).buckets(exponential_buckets(0.00001, 2.0, 15).expect("bucket layout"))
    ).expect("metric creation failed");
}

/// Handle for the registered metrics
pub struct MetricsHandle {
    registry: Arc<Registry>,
}

impl MetricsHandle {
    /// The registry the metrics were registered with.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; already-registered collectors are skipped.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Directory
        Box::new(PARTICIPANTS_REGISTERED.clone()),
        // Registry
        Box::new(PRODUCTS_REGISTERED.clone()),
        Box::new(PRODUCT_COUNT.clone()),
        Box::new(PRODUCT_TRANSFERS.clone()),
        // Guard
        Box::new(CONTAMINATION_REPORTS.clone()),
        // Rejections
        Box::new(OPERATIONS_REJECTED.clone()),
        // Event Bus
        Box::new(EVENT_BUS_MESSAGES_RELAYED.clone()),
        Box::new(EVENT_BUS_MESSAGES_LAGGED.clone()),
        Box::new(EVENT_RELAY_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_metrics_twice() {
        assert!(register_metrics().is_ok());
        assert!(register_metrics().is_ok());
    }

    #[test]
    fn test_counter_increment() {
        PRODUCT_TRANSFERS.inc();
        assert!(PRODUCT_TRANSFERS.get() >= 1.0);
    }

    #[test]
    fn test_gauge_set() {
        OPERATIONS_REJECTED.with_label_values(&["already_flagged"]).set(3.0);
        assert_eq!(
            OPERATIONS_REJECTED
                .with_label_values(&["already_flagged"])
                .get(),
            3.0
        );
    }

    #[test]
    fn test_encode_contains_registered_names() {
        register_metrics().unwrap();
        CONTAMINATION_REPORTS.inc();
        let text = encode_metrics().unwrap();
        assert!(text.contains("ft_guard_contamination_reports_total"));
    }

    #[test]
    fn test_histogram_timer() {
        let _timer = HistogramTimer::new(&EVENT_RELAY_DURATION);
        // Timer observes on drop
    }
}
