//! # Event Handlers
//!
//! Background tasks the node runs next to the registry.

pub mod metrics_sync;
pub mod relay;

pub use metrics_sync::{mirror_registry_metrics, MetricsSyncHandler};
pub use relay::EventRelay;
