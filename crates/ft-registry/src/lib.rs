//! # FoodTrace Registry
//!
//! Records the lifecycle of food-product units as they move through a supply
//! chain: who registered them, who has held them, where they went, and
//! whether anyone has reported them contaminated.
//!
//! ## Components
//!
//! | Component | Responsibility |
//! |-----------|----------------|
//! | Participant directory | Verified identities and roles, admin-managed |
//! | Access control | Admin-only, verified-only and owner-only guard clauses |
//! | Product registry | Sequential ids, product records, audit trail |
//! | Ownership ledger | Append-only owner chain, farmer first |
//! | Contamination guard | Contaminated or expired products cannot move |
//!
//! ## Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Sequential ids | Ids run 1, 2, 3, ...; failed registrations consume none |
//! | Owner chain | `ownership.len() == transfers + 1` |
//! | One-way contamination | Once flagged, a product stays flagged |
//! | Safe transfer | Contaminated or expired products never change owner |
//! | Verified custody | Every owner was verified when ownership was assigned |
//! | Atomic writes | Each operation commits one batch or nothing |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pure domain logic (entities, access rules, safety rules)
//! - `ports/` - Port traits (inbound API, outbound SPI)
//! - `adapters/` - Store, clock and event sink implementations
//! - `service/` - Application service implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! use ft_registry::{RegistryConfig, RegistryService, SupplyChainApi};
//! use shared_types::Role;
//!
//! let registry = RegistryService::new_in_memory(RegistryConfig::new(admin))?;
//! registry.register_participant(admin, alice, "Alice", Role::Farmer)?;
//!
//! let id = registry.register_product(alice, "Apples", "Orchard", expiry, now)?;
//! registry.transfer_product(alice, id, bob, "Warehouse1", now)?;
//!
//! assert_eq!(registry.get_ownership_history(id)?, vec![alice, bob]);
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{
    BusEventSink, FileBackedKVStore, InMemoryKVStore, ManualTimeSource, NoopEventSink,
    RecordingEventSink, SystemTimeSource,
};
pub use domain::{
    AccessControl, ContaminationGuard, ErrorKind, FoodProduct, HistoryEntry, HistoryKind,
    KVStoreError, KeyPrefix, MetricsSnapshot, Participant, RegistryConfig, RegistryError,
    RegistryErrorPayload, RegistryMetrics, ReregistrationPolicy, DEFAULT_MAX_TEXT_LEN,
};
pub use ports::inbound::SupplyChainApi;
pub use ports::outbound::{BatchOperation, EventSink, KeyValueStore, ScanResult, TimeSource};
pub use service::{RegistryDependencies, RegistryService};
