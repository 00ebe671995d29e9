//! # Registry Container
//!
//! Holds the registry, its store and the event bus with their lifetimes tied
//! together, built from a [`NodeConfig`].

pub mod config;

pub use config::{BusConfig, ConfigError, NodeConfig, StorageConfig};

use crate::adapters::NodeStore;
use ft_registry::{
    BusEventSink, RegistryDependencies, RegistryError, RegistryService, SystemTimeSource,
};
use shared_bus::InMemoryEventBus;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// The registry as the node runs it.
pub type NodeRegistry = RegistryService<NodeStore, SystemTimeSource, BusEventSink>;

/// Errors while assembling the node.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The store could not be opened.
    #[error("Failed to open store: {0}")]
    Store(#[from] ft_registry::KVStoreError),

    /// The registry refused the store (admin mismatch, corrupt metadata).
    #[error("Failed to initialize registry: {0}")]
    Registry(#[from] RegistryError),
}

/// Shared handles to everything the node runs.
pub struct RegistryContainer {
    pub config: NodeConfig,
    pub bus: Arc<InMemoryEventBus>,
    pub registry: Arc<NodeRegistry>,
}

impl RegistryContainer {
    /// Open the store, create the bus and start the registry over both.
    pub fn new(config: NodeConfig) -> Result<Self, ContainerError> {
        let store = NodeStore::open(config.storage.data_path.as_deref())?;
        let backend = store.backend();
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus.capacity));

        let registry = RegistryService::new(
            RegistryDependencies {
                kv_store: store,
                time_source: SystemTimeSource,
                event_sink: BusEventSink::new(Arc::clone(&bus)),
            },
            config.registry.clone(),
        )?;

        info!(
            admin = %config.registry.admin,
            backend,
            bus_capacity = config.bus.capacity,
            reregistration = %config.registry.reregistration,
            "Registry container ready"
        );

        Ok(Self {
            config,
            bus,
            registry: Arc::new(registry),
        })
    }
}
