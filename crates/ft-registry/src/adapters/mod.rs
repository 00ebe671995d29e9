//! # Adapters
//!
//! Implementations of the outbound ports.
//!
//! - `storage/` - `KeyValueStore` backends (in-memory, file-backed)
//! - `time.rs` - `TimeSource` implementations
//! - `events.rs` - `EventSink` implementations

pub mod events;
pub mod storage;
pub mod time;

pub use events::{BusEventSink, NoopEventSink, RecordingEventSink};
pub use storage::{FileBackedKVStore, InMemoryKVStore};
pub use time::{ManualTimeSource, SystemTimeSource};
