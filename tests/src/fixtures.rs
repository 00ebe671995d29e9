//! Shared participants and helpers for the suite.

use ft_registry::{
    InMemoryKVStore, ManualTimeSource, RegistryConfig, RegistryDependencies, RegistryService,
    SupplyChainApi,
};
use shared_types::{Identity, Role};
use std::sync::Arc;

pub const ADMIN: Identity = Identity([0xAD; 20]);
pub const FARMER: Identity = Identity([0x01; 20]);
pub const PROCESSOR: Identity = Identity([0x02; 20]);
pub const DISTRIBUTOR: Identity = Identity([0x03; 20]);
pub const RETAILER: Identity = Identity([0x04; 20]);
pub const STRANGER: Identity = Identity([0x99; 20]);

/// Registration time used by the fixtures.
pub const T0: u64 = 1_700_000_000;
/// One week after [`T0`].
pub const WEEK: u64 = 7 * 24 * 3_600;

/// The verified cast: one participant per supply-chain role.
pub const CAST: [(Identity, &str, Role); 4] = [
    (FARMER, "Green Acres", Role::Farmer),
    (PROCESSOR, "Packhouse", Role::Processor),
    (DISTRIBUTOR, "FreshFleet", Role::Distributor),
    (RETAILER, "Corner Grocer", Role::Retailer),
];

/// Register every member of [`CAST`].
pub fn register_cast<S: SupplyChainApi>(registry: &S) {
    for (identity, name, role) in CAST {
        registry
            .register_participant(ADMIN, identity, name, role)
            .expect("cast registration");
    }
}

/// In-memory registry with a manual clock at [`T0`] and the given sink.
pub fn registry_with_sink<ES: ft_registry::EventSink>(
    sink: ES,
) -> RegistryService<InMemoryKVStore, Arc<ManualTimeSource>, ES> {
    RegistryService::new(
        RegistryDependencies {
            kv_store: InMemoryKVStore::new(),
            time_source: Arc::new(ManualTimeSource::new(T0)),
            event_sink: sink,
        },
        RegistryConfig::new(ADMIN),
    )
    .expect("fresh registry")
}
