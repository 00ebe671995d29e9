//! # Core Domain Entities
//!
//! Defines the identity and scalar types shared by the registry, the event
//! bus and the host runtime.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `Identity`, `Role`
//! - **Products**: `ProductId`
//! - **Time**: `Timestamp`

use crate::errors::{IdentityParseError, RoleParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Sequence number of a registered food product (1-based).
pub type ProductId = u64;

/// Opaque identity of a supply-chain actor or the registry admin.
///
/// Rendered as `0x`-prefixed lowercase hex. The zero address is reserved as
/// "no identity" and is rejected wherever a real participant is expected.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Identity(pub Address);

impl Identity {
    /// Byte length of an identity.
    pub const LEN: usize = 20;

    /// The reserved all-zero identity.
    pub const ZERO: Identity = Identity([0u8; 20]);

    /// Wrap raw address bytes.
    #[must_use]
    pub const fn new(bytes: Address) -> Self {
        Self(bytes)
    }

    /// Whether this is the reserved zero identity.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Raw address bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &Address {
        &self.0
    }

    /// Parse from hex, with or without a `0x` prefix.
    pub fn from_hex(input: &str) -> Result<Self, IdentityParseError> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let bytes = hex::decode(digits).map_err(|e| IdentityParseError::InvalidHex(e.to_string()))?;
        let address: Address = bytes
            .as_slice()
            .try_into()
            .map_err(|_| IdentityParseError::InvalidLength {
                expected: Self::LEN,
                actual: bytes.len(),
            })?;

        Ok(Self(address))
    }

    /// Lowercase hex with `0x` prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl From<Address> for Identity {
    fn from(bytes: Address) -> Self {
        Self(bytes)
    }
}

impl FromStr for Identity {
    type Err = IdentityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.to_hex())
    }
}

/// Supply-chain role of a participant.
///
/// Closed set; `Other` covers actors that fit none of the named stages.
/// Unrecognised role strings are rejected rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Farmer,
    Processor,
    Distributor,
    Retailer,
    Other,
}

impl Role {
    /// All roles in canonical order.
    pub const ALL: [Role; 5] = [
        Role::Farmer,
        Role::Processor,
        Role::Distributor,
        Role::Retailer,
        Role::Other,
    ];

    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Processor => "processor",
            Role::Distributor => "distributor",
            Role::Retailer => "retailer",
            Role::Other => "other",
        }
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RoleParseError(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
