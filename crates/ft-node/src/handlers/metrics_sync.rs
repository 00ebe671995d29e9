//! # Metrics Sync
//!
//! Rejected operations emit no event, so the relay never sees them. This
//! task copies the registry's own counters into the exporter on a timer.

use crate::container::NodeRegistry;
use ft_registry::{ErrorKind, RegistryMetrics, SupplyChainApi};
use ft_telemetry::{OPERATIONS_REJECTED, PRODUCT_COUNT};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Copy registry counters into the Prometheus gauges.
pub fn mirror_registry_metrics(metrics: &RegistryMetrics, product_count: u64) {
    for kind in ErrorKind::ALL {
        OPERATIONS_REJECTED
            .with_label_values(&[kind.as_str()])
            .set(metrics.rejected(kind) as f64);
    }
    PRODUCT_COUNT.set(product_count as f64);
}

/// Periodically mirrors registry counters until shutdown.
pub struct MetricsSyncHandler {
    registry: Arc<NodeRegistry>,
    interval: Duration,
}

impl MetricsSyncHandler {
    pub fn new(registry: Arc<NodeRegistry>, interval: Duration) -> Self {
        Self { registry, interval }
    }

    /// Mirror once now.
    pub fn sync(&self) {
        match self.registry.product_count() {
            Ok(count) => {
                mirror_registry_metrics(self.registry.metrics(), count);
                debug!(component = "metrics", products = count, "Registry metrics mirrored");
            }
            Err(e) => warn!(component = "metrics", error = %e, "Failed to read product count"),
        }
    }

    /// Run the sync loop.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(component = "metrics", interval = ?self.interval, "Metrics sync started");
        let mut ticker = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.sync(),
                _ = shutdown.changed() => {
                    self.sync();
                    info!(component = "metrics", "Shutdown signal received");
                    break;
                }
            }
        }
    }
}
