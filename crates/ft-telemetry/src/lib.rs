//! # FoodTrace Telemetry
//!
//! Logging and metrics for the FoodTrace registry.
//!
//! ## Components
//!
//! - **Logs**: `tracing` subscriber with `EnvFilter`, pretty or JSON output
//! - **Metrics**: Prometheus collectors in a private registry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ft_telemetry::{TelemetryConfig, init_telemetry};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(config).expect("Failed to init telemetry");
//!
//!     // Logs and metrics are now being collected
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FT_SERVICE_NAME` | `foodtrace` | Service name in logs |
//! | `FT_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `FT_JSON_LOGS` | `false` | JSON output (defaults on inside containers) |
//! | `FT_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `FT_ENVIRONMENT` | `dev` | Deployment environment label |

mod config;
mod logging;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, CONTAMINATION_REPORTS,
    EVENT_BUS_MESSAGES_LAGGED, EVENT_BUS_MESSAGES_RELAYED, EVENT_RELAY_DURATION,
    OPERATIONS_REJECTED, PARTICIPANTS_REGISTERED, PRODUCTS_REGISTERED, PRODUCT_COUNT,
    PRODUCT_TRANSFERS,
};
pub use tracing_setup::{build_env_filter, TracingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Initialize metrics first so startup logs can already be counted
    let metrics_handle = register_metrics()?;

    let tracing_guard = tracing_setup::init_tracing(&config)?;

    Ok(TelemetryGuard {
        _tracing: tracing_guard,
        metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _tracing: TracingGuard,
    metrics: MetricsHandle,
}

impl TelemetryGuard {
    /// Handle to the registered metrics.
    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Convenience macro for creating a span with component context.
///
/// # Example
///
/// ```rust,ignore
/// use ft_telemetry::component_span;
///
/// fn transfer() {
///     let _span = component_span!("transfer_product", component = "registry", product_id = 7);
/// }
/// ```
#[macro_export]
macro_rules! component_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
