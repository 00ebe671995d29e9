//! # Registry Service
//!
//! The application service implementing [`SupplyChainApi`].
//!
//! ## Write Path
//!
//! Every state-changing operation runs under the store's write lock:
//!
//! 1. Read the records it needs through a [`store::LedgerView`]
//! 2. Run the access and safety checks; any failure returns before step 3
//! 3. Stage every key it changes into one [`store::StagedWrites`] batch
//! 4. Commit the batch with `atomic_batch_write`
//! 5. Emit the event, still under the lock, so events follow commit order
//!
//! Readers take the read lock and never see a half-applied batch.

mod api;
mod contamination;
mod directory;
mod products;
mod store;

use crate::adapters::{InMemoryKVStore, NoopEventSink, SystemTimeSource};
use crate::domain::access::AccessControl;
use crate::domain::errors::RegistryError;
use crate::domain::metrics::RegistryMetrics;
use crate::domain::value_objects::RegistryConfig;
use crate::ports::outbound::{EventSink, KeyValueStore, TimeSource};
use parking_lot::RwLock;
use store::{LedgerView, StagedWrites};
use tracing::{info, warn};

/// Dependencies for [`RegistryService`].
pub struct RegistryDependencies<KV, TS, ES> {
    pub kv_store: KV,
    pub time_source: TS,
    pub event_sink: ES,
}

/// The supply-chain registry.
///
/// Owns its store; the admin and the product counter live in that store, so
/// two services never share state unless they share a store file.
pub struct RegistryService<KV, TS, ES>
where
    KV: KeyValueStore,
    TS: TimeSource,
    ES: EventSink,
{
    /// Key-value store, single writer.
    pub(crate) store: RwLock<KV>,
    /// Clock for operations that do not take `now` from the caller.
    pub(crate) time_source: TS,
    /// Receives one event per committed change.
    pub(crate) events: ES,
    /// Admin check, fixed at construction.
    pub(crate) access: AccessControl,
    pub(crate) config: RegistryConfig,
    pub(crate) metrics: RegistryMetrics,
}

impl<KV, TS, ES> RegistryService<KV, TS, ES>
where
    KV: KeyValueStore,
    TS: TimeSource,
    ES: EventSink,
{
    /// Create a registry over the given store.
    ///
    /// A fresh store records `config.admin` as its admin. A store that
    /// already has one must match, otherwise this fails `AdminMismatch`.
    pub fn new(
        deps: RegistryDependencies<KV, TS, ES>,
        config: RegistryConfig,
    ) -> Result<Self, RegistryError> {
        let mut kv_store = deps.kv_store;

        let stored_admin = LedgerView::new(&kv_store).admin()?;
        match stored_admin {
            Some(stored) if stored != config.admin => {
                return Err(RegistryError::AdminMismatch {
                    stored,
                    configured: config.admin,
                });
            }
            Some(_) => {
                let view = LedgerView::new(&kv_store);
                info!(
                    admin = %config.admin,
                    products = view.product_count()?,
                    "Opened existing registry"
                );
            }
            None => {
                if config.admin.is_zero() {
                    return Err(RegistryError::InvalidIdentity);
                }
                let mut writes = StagedWrites::new();
                writes.put_admin(&config.admin)?;
                writes.put_product_count(0)?;
                kv_store.atomic_batch_write(writes.into_operations())?;
                info!(admin = %config.admin, "Initialized new registry");
            }
        }

        Ok(Self {
            store: RwLock::new(kv_store),
            time_source: deps.time_source,
            events: deps.event_sink,
            access: AccessControl::new(config.admin),
            config,
            metrics: RegistryMetrics::new(),
        })
    }

    /// Configuration this registry was created with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Operation counters.
    pub fn metrics(&self) -> &RegistryMetrics {
        &self.metrics
    }

    /// The event sink.
    pub fn event_sink(&self) -> &ES {
        &self.events
    }

    /// Fails `EmptyField` or `FieldTooLong` for a bad free-text field.
    pub(crate) fn check_text(
        &self,
        field: &'static str,
        value: &str,
        required: bool,
    ) -> Result<(), RegistryError> {
        if required && value.is_empty() {
            return Err(RegistryError::EmptyField { field });
        }
        if value.len() > self.config.max_text_len {
            return Err(RegistryError::FieldTooLong {
                field,
                len: value.len(),
                max: self.config.max_text_len,
            });
        }
        Ok(())
    }

    /// Count and log the outcome of a write.
    pub(crate) fn observe<T>(
        &self,
        operation: &'static str,
        result: Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        if let Err(err) = &result {
            let kind = err.kind();
            self.metrics.record_rejected(kind);
            warn!(operation, kind = kind.as_str(), error = %err, "Operation rejected");
        }
        result
    }
}

impl RegistryService<InMemoryKVStore, SystemTimeSource, NoopEventSink> {
    /// Registry over a fresh in-memory store, wall-clock time and no events.
    pub fn new_in_memory(config: RegistryConfig) -> Result<Self, RegistryError> {
        Self::new(
            RegistryDependencies {
                kv_store: InMemoryKVStore::new(),
                time_source: SystemTimeSource,
                event_sink: NoopEventSink,
            },
            config,
        )
    }
}
