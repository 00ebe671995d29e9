//! # Value Objects
//!
//! - [`RegistryConfig`]: per-instance configuration, admin included
//! - [`ReregistrationPolicy`]: what happens when a participant is registered twice
//! - [`KeyPrefix`]: key layout in the backing store

use serde::{Deserialize, Serialize};
use shared_types::{Identity, ProductId};
use std::fmt;
use std::str::FromStr;

/// Default maximum byte length for names, origins and locations: no limit.
pub const DEFAULT_MAX_TEXT_LEN: usize = usize::MAX;

/// How `register_participant` treats an identity that is already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReregistrationPolicy {
    /// Last write wins. Name and role may change; a role change is logged.
    #[default]
    Upsert,
    /// Fail with `AlreadyExists`.
    Reject,
}

impl FromStr for ReregistrationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upsert" => Ok(Self::Upsert),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown re-registration policy: {other:?}")),
        }
    }
}

impl fmt::Display for ReregistrationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upsert => f.write_str("upsert"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// Configuration for one registry instance.
///
/// The admin is fixed for the lifetime of the instance; there is no
/// rotation API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// The single identity allowed to register participants.
    pub admin: Identity,
    /// Re-registration behaviour.
    pub reregistration: ReregistrationPolicy,
    /// Maximum byte length of any free-text field. Unbounded unless set.
    pub max_text_len: usize,
}

impl RegistryConfig {
    /// Configuration with defaults for everything but the admin.
    pub fn new(admin: Identity) -> Self {
        Self {
            admin,
            reregistration: ReregistrationPolicy::default(),
            max_text_len: DEFAULT_MAX_TEXT_LEN,
        }
    }

    /// Override the re-registration policy.
    #[must_use]
    pub fn with_reregistration(mut self, policy: ReregistrationPolicy) -> Self {
        self.reregistration = policy;
        self
    }

    /// Override the free-text length limit.
    #[must_use]
    pub fn with_max_text_len(mut self, max_text_len: usize) -> Self {
        self.max_text_len = max_text_len;
        self
    }
}

/// Key prefixes for the key-value store.
///
/// Numeric suffixes are big-endian so prefix scans return entries in
/// sequence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Participant record: `p:{identity}` -> Participant
    Participant,
    /// Product record: `f:{id}` -> FoodProduct
    Product,
    /// History entry: `h:{id}{seq}` -> HistoryEntry
    History,
    /// Ownership entry: `o:{id}{seq}` -> Identity
    Ownership,
    /// Registry metadata: `m:{name}`
    Metadata,
}

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Participant => b"p:",
            KeyPrefix::Product => b"f:",
            KeyPrefix::History => b"h:",
            KeyPrefix::Ownership => b"o:",
            KeyPrefix::Metadata => b"m:",
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    pub fn participant_key(identity: &Identity) -> Vec<u8> {
        KeyPrefix::Participant.key(identity.as_bytes())
    }

    pub fn product_key(product_id: ProductId) -> Vec<u8> {
        KeyPrefix::Product.key(&product_id.to_be_bytes())
    }

    /// Prefix covering every history entry of one product.
    pub fn history_prefix(product_id: ProductId) -> Vec<u8> {
        KeyPrefix::History.key(&product_id.to_be_bytes())
    }

    pub fn history_key(product_id: ProductId, seq: u32) -> Vec<u8> {
        let mut key = Self::history_prefix(product_id);
        key.extend_from_slice(&seq.to_be_bytes());
        key
    }

    /// Prefix covering every ownership entry of one product.
    pub fn ownership_prefix(product_id: ProductId) -> Vec<u8> {
        KeyPrefix::Ownership.key(&product_id.to_be_bytes())
    }

    pub fn ownership_key(product_id: ProductId, seq: u32) -> Vec<u8> {
        let mut key = Self::ownership_prefix(product_id);
        key.extend_from_slice(&seq.to_be_bytes());
        key
    }

    pub fn product_count_key() -> Vec<u8> {
        KeyPrefix::Metadata.key(b"product_count")
    }

    pub fn admin_key() -> Vec<u8> {
        KeyPrefix::Metadata.key(b"admin")
    }
}
