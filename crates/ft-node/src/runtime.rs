//! # Node Runtime
//!
//! Starts the background tasks and coordinates their shutdown.

use crate::container::{ContainerError, NodeConfig, NodeRegistry, RegistryContainer};
use crate::handlers::{EventRelay, MetricsSyncHandler};
use shared_bus::InMemoryEventBus;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running node: registry plus relay and metrics tasks.
pub struct NodeRuntime {
    container: RegistryContainer,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    relay_task: Option<JoinHandle<u64>>,
    metrics_task: Option<JoinHandle<()>>,
}

impl NodeRuntime {
    /// Build the container. Nothing runs until [`NodeRuntime::start`].
    pub fn new(config: NodeConfig) -> Result<Self, ContainerError> {
        info!("Creating FoodTrace node runtime");
        let container = RegistryContainer::new(config)?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            container,
            shutdown_tx,
            shutdown_rx,
            relay_task: None,
            metrics_task: None,
        })
    }

    /// Spawn the event relay and metrics sync tasks.
    ///
    /// The relay subscribes before this returns, so no event committed after
    /// `start` is missed.
    pub fn start(&mut self) {
        let relay = EventRelay::new(&self.container.bus);
        self.relay_task = Some(tokio::spawn(relay.run(self.shutdown_rx.clone())));

        let sync = MetricsSyncHandler::new(
            Arc::clone(&self.container.registry),
            self.container.config.bus.metrics_sync_interval,
        );
        self.metrics_task = Some(tokio::spawn(sync.run(self.shutdown_rx.clone())));

        info!("Node runtime started");
    }

    /// The registry, for callers driving the API.
    pub fn registry(&self) -> Arc<NodeRegistry> {
        Arc::clone(&self.container.registry)
    }

    /// The event bus the registry publishes to.
    pub fn bus(&self) -> Arc<InMemoryEventBus> {
        Arc::clone(&self.container.bus)
    }

    pub fn config(&self) -> &NodeConfig {
        &self.container.config
    }

    /// Stop the background tasks and wait for them.
    ///
    /// Returns the number of events the relay handled.
    pub async fn shutdown(mut self) -> u64 {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let mut relayed = 0;
        if let Some(task) = self.relay_task.take() {
            match task.await {
                Ok(count) => relayed = count,
                Err(e) => error!("Event relay task failed: {}", e),
            }
        }
        if let Some(task) = self.metrics_task.take() {
            if let Err(e) = task.await {
                error!("Metrics sync task failed: {}", e);
            }
        }

        info!(relayed, "Shutdown complete");
        relayed
    }
}
