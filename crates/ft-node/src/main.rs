//! # FoodTrace Node
//!
//! Runs a supply-chain registry until interrupted.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging and metrics (`FT_LOG_LEVEL`, `FT_JSON_LOGS`, ...)
//! 2. Load configuration (`FT_ADMIN_IDENTITY`, `FT_DATA_PATH`, ...)
//! 3. Open the store and start the registry
//! 4. Start the event relay and metrics sync
//! 5. Wait for Ctrl+C, then drain and stop

use anyhow::{Context, Result};
use ft_node::{NodeConfig, NodeRuntime};
use ft_registry::SupplyChainApi;
use ft_telemetry::{init_telemetry, TelemetryConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::for_component("node"))
        .context("Failed to initialize telemetry")?;

    let config = NodeConfig::from_env().context("Invalid node configuration")?;

    let mut runtime = NodeRuntime::new(config).context("Failed to start registry")?;
    runtime.start();

    let registry = runtime.registry();
    info!("===========================================");
    info!("  FoodTrace Node v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");
    info!(
        admin = %registry.admin(),
        products = registry.product_count()?,
        "Node is running. Press Ctrl+C to stop."
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    runtime.shutdown().await;
    Ok(())
}
