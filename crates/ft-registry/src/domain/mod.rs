//! # Domain Layer
//!
//! Pure registry logic: entities, authorization and safety rules. Nothing
//! here performs I/O.

pub mod access;
pub mod entities;
pub mod errors;
pub mod guard;
pub mod metrics;
pub mod value_objects;

pub use access::AccessControl;
pub use entities::{FoodProduct, HistoryEntry, HistoryKind, Participant};
pub use errors::{ErrorKind, KVStoreError, RegistryError, RegistryErrorPayload};
pub use guard::ContaminationGuard;
pub use metrics::{MetricsSnapshot, RegistryMetrics};
pub use value_objects::{KeyPrefix, RegistryConfig, ReregistrationPolicy, DEFAULT_MAX_TEXT_LEN};
