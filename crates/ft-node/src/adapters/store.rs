//! # Store Selection
//!
//! The registry is generic over its store; the node picks one at runtime
//! from configuration and hides the choice behind [`NodeStore`].

use ft_registry::{
    BatchOperation, FileBackedKVStore, InMemoryKVStore, KVStoreError, KeyValueStore, ScanResult,
};
use std::path::Path;
use tracing::info;

/// Either store backend, chosen by `FT_DATA_PATH`.
pub enum NodeStore {
    Memory(InMemoryKVStore),
    File(FileBackedKVStore),
}

impl NodeStore {
    /// File-backed when a path is configured, in-memory otherwise.
    pub fn open(data_path: Option<&Path>) -> Result<Self, KVStoreError> {
        match data_path {
            Some(path) => {
                info!(path = %path.display(), "Using file-backed store");
                Ok(NodeStore::File(FileBackedKVStore::open(path)?))
            }
            None => {
                info!("Using in-memory store; state is lost on exit");
                Ok(NodeStore::Memory(InMemoryKVStore::new()))
            }
        }
    }

    /// Backend label for logs.
    pub fn backend(&self) -> &'static str {
        match self {
            NodeStore::Memory(_) => "memory",
            NodeStore::File(_) => "file",
        }
    }
}

impl KeyValueStore for NodeStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        match self {
            NodeStore::Memory(store) => store.get(key),
            NodeStore::File(store) => store.get(key),
        }
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        match self {
            NodeStore::Memory(store) => store.put(key, value),
            NodeStore::File(store) => store.put(key, value),
        }
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        match self {
            NodeStore::Memory(store) => store.delete(key),
            NodeStore::File(store) => store.delete(key),
        }
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        match self {
            NodeStore::Memory(store) => store.atomic_batch_write(operations),
            NodeStore::File(store) => store.atomic_batch_write(operations),
        }
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        match self {
            NodeStore::Memory(store) => store.exists(key),
            NodeStore::File(store) => store.exists(key),
        }
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        match self {
            NodeStore::Memory(store) => store.prefix_scan(prefix),
            NodeStore::File(store) => store.prefix_scan(prefix),
        }
    }
}
