//! Typed access to the key-value store.
//!
//! [`LedgerView`] decodes records for reads; [`StagedWrites`] encodes the
//! records one operation changes into a single batch.

use crate::domain::entities::{FoodProduct, HistoryEntry, Participant};
use crate::domain::errors::RegistryError;
use crate::domain::value_objects::KeyPrefix;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{Identity, ProductId};

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, RegistryError> {
    Ok(bincode::serialize(value)?)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, RegistryError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Read-only typed view over a store.
pub(crate) struct LedgerView<'a, KV: KeyValueStore> {
    kv: &'a KV,
}

impl<'a, KV: KeyValueStore> LedgerView<'a, KV> {
    pub(crate) fn new(kv: &'a KV) -> Self {
        Self { kv }
    }

    fn get<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, RegistryError> {
        self.kv.get(key)?.map(|bytes| decode(&bytes)).transpose()
    }

    fn scan<T: DeserializeOwned>(&self, prefix: &[u8]) -> Result<Vec<T>, RegistryError> {
        self.kv
            .prefix_scan(prefix)?
            .iter()
            .map(|(_, bytes)| decode(bytes))
            .collect()
    }

    pub(crate) fn admin(&self) -> Result<Option<Identity>, RegistryError> {
        self.get(&KeyPrefix::admin_key())
    }

    pub(crate) fn product_count(&self) -> Result<u64, RegistryError> {
        Ok(self.get(&KeyPrefix::product_count_key())?.unwrap_or(0))
    }

    pub(crate) fn participant(
        &self,
        identity: &Identity,
    ) -> Result<Option<Participant>, RegistryError> {
        self.get(&KeyPrefix::participant_key(identity))
    }

    pub(crate) fn product(&self, product_id: ProductId) -> Result<Option<FoodProduct>, RegistryError> {
        self.get(&KeyPrefix::product_key(product_id))
    }

    /// The product record, or `ProductNotFound`.
    pub(crate) fn require_product(&self, product_id: ProductId) -> Result<FoodProduct, RegistryError> {
        self.product(product_id)?
            .ok_or(RegistryError::ProductNotFound { product_id })
    }

    /// History entries in sequence order.
    pub(crate) fn history(&self, product_id: ProductId) -> Result<Vec<HistoryEntry>, RegistryError> {
        self.scan(&KeyPrefix::history_prefix(product_id))
    }

    /// Owners in sequence order, farmer first.
    pub(crate) fn owners(&self, product_id: ProductId) -> Result<Vec<Identity>, RegistryError> {
        self.scan(&KeyPrefix::ownership_prefix(product_id))
    }
}

/// The batch one operation commits.
#[derive(Debug, Default)]
pub(crate) struct StagedWrites {
    operations: Vec<BatchOperation>,
}

impl StagedWrites {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn put<T: Serialize>(&mut self, key: Vec<u8>, value: &T) -> Result<(), RegistryError> {
        self.operations.push(BatchOperation::put(key, encode(value)?));
        Ok(())
    }

    pub(crate) fn put_admin(&mut self, admin: &Identity) -> Result<(), RegistryError> {
        self.put(KeyPrefix::admin_key(), admin)
    }

    pub(crate) fn put_product_count(&mut self, count: u64) -> Result<(), RegistryError> {
        self.put(KeyPrefix::product_count_key(), &count)
    }

    pub(crate) fn put_participant(&mut self, participant: &Participant) -> Result<(), RegistryError> {
        self.put(KeyPrefix::participant_key(&participant.identity), participant)
    }

    pub(crate) fn put_product(&mut self, product: &FoodProduct) -> Result<(), RegistryError> {
        self.put(KeyPrefix::product_key(product.id), product)
    }

    pub(crate) fn append_history(
        &mut self,
        product_id: ProductId,
        slot: u32,
        entry: &HistoryEntry,
    ) -> Result<(), RegistryError> {
        self.put(KeyPrefix::history_key(product_id, slot), entry)
    }

    pub(crate) fn append_owner(
        &mut self,
        product_id: ProductId,
        slot: u32,
        owner: &Identity,
    ) -> Result<(), RegistryError> {
        self.put(KeyPrefix::ownership_key(product_id, slot), owner)
    }

    pub(crate) fn into_operations(self) -> Vec<BatchOperation> {
        self.operations
    }
}
