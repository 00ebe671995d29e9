//! # Domain Errors
//!
//! Error types for the registry.
//!
//! Every variant maps to exactly one [`ErrorKind`]; the kind is what the
//! outer layer switches on, the variant carries the context for the
//! human-readable reason.

use serde::{Deserialize, Serialize};
use shared_types::{Identity, ProductId, Timestamp};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during registry operations.
///
/// A returned error always means no state was changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Caller is not the registry admin.
    #[error("Unauthorized: {caller} is not the registry admin")]
    NotAdmin { caller: Identity },

    /// Caller is not a verified participant.
    #[error("Unauthorized: {caller} is not a verified participant")]
    NotVerified { caller: Identity },

    /// Caller does not currently own the product.
    #[error("Unauthorized: {caller} is not the current owner of product {product_id}")]
    NotOwner {
        caller: Identity,
        product_id: ProductId,
    },

    /// No product with this id exists.
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: ProductId },

    /// The zero identity was supplied where a participant is required.
    #[error("Invalid identity: the zero address is not a participant")]
    InvalidIdentity,

    /// A required text field was empty.
    #[error("Invalid input: {field} must not be empty")]
    EmptyField { field: &'static str },

    /// A text field exceeded the configured maximum length.
    #[error("Invalid input: {field} is {len} bytes, maximum is {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Expiry was not strictly after the registration time.
    #[error("Invalid input: expiry {expiry_date} must be after registration time {now}")]
    InvalidExpiry {
        expiry_date: Timestamp,
        now: Timestamp,
    },

    /// Role string did not name a known role.
    #[error("Invalid input: unknown role {role:?}")]
    UnknownRole { role: String },

    /// Participant already registered and the policy forbids overwriting.
    #[error("Participant already registered: {identity}")]
    ParticipantExists { identity: Identity },

    /// Product has already been flagged as contaminated.
    #[error("Product {product_id} is already flagged as contaminated")]
    AlreadyFlagged { product_id: ProductId },

    /// Transfer recipient is not a verified participant.
    #[error("Invalid state: recipient {recipient} is not a verified participant")]
    UnverifiedRecipient { recipient: Identity },

    /// Contaminated products cannot change hands.
    #[error("Invalid state: product {product_id} is contaminated")]
    Contaminated { product_id: ProductId },

    /// Expired products cannot change hands.
    #[error("Invalid state: product {product_id} expired at {expiry_date} (now {now})")]
    Expired {
        product_id: ProductId,
        expiry_date: Timestamp,
        now: Timestamp,
    },

    /// Persisted store was initialized with a different admin.
    #[error("Admin mismatch: store belongs to {stored}, configured admin is {configured}")]
    AdminMismatch {
        stored: Identity,
        configured: Identity,
    },

    /// Key-value store failure.
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Stored bytes could not be encoded or decoded.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl RegistryError {
    /// Classify this error for the outer layer.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAdmin { .. } | Self::NotVerified { .. } | Self::NotOwner { .. } => {
                ErrorKind::Unauthorized
            }
            Self::ProductNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidIdentity
            | Self::EmptyField { .. }
            | Self::FieldTooLong { .. }
            | Self::InvalidExpiry { .. }
            | Self::UnknownRole { .. } => ErrorKind::InvalidInput,
            Self::ParticipantExists { .. } => ErrorKind::AlreadyExists,
            Self::AlreadyFlagged { .. } => ErrorKind::AlreadyFlagged,
            Self::UnverifiedRecipient { .. }
            | Self::Contaminated { .. }
            | Self::Expired { .. }
            | Self::AdminMismatch { .. } => ErrorKind::InvalidState,
            Self::Storage { .. } | Self::Serialization { .. } => ErrorKind::Storage,
        }
    }
}

impl From<shared_types::RoleParseError> for RegistryError {
    fn from(err: shared_types::RoleParseError) -> Self {
        Self::UnknownRole { role: err.0 }
    }
}

/// Error classification surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Caller lacks the required role, ownership or admin status.
    Unauthorized,
    /// Unknown product id.
    NotFound,
    /// Empty name, zero identity, malformed expiry, unknown role.
    InvalidInput,
    /// Duplicate contamination report.
    AlreadyFlagged,
    /// Re-registration rejected by policy.
    AlreadyExists,
    /// Transfer of a contaminated or expired product, or to an unverified owner.
    InvalidState,
    /// The store failed; nothing was committed.
    Storage,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::Unauthorized,
        ErrorKind::NotFound,
        ErrorKind::InvalidInput,
        ErrorKind::AlreadyFlagged,
        ErrorKind::AlreadyExists,
        ErrorKind::InvalidState,
        ErrorKind::Storage,
    ];

    /// Snake-case label for logs and metrics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::AlreadyFlagged => "already_flagged",
            Self::AlreadyExists => "already_exists",
            Self::InvalidState => "invalid_state",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

impl From<KVStoreError> for RegistryError {
    fn from(err: KVStoreError) -> Self {
        RegistryError::Storage {
            message: err.to_string(),
        }
    }
}

impl From<bincode::Error> for RegistryError {
    fn from(err: bincode::Error) -> Self {
        RegistryError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Serializable error for the outer service layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryErrorPayload {
    pub kind: ErrorKind,
    pub message: String,
    pub product_id: Option<ProductId>,
}

impl From<&RegistryError> for RegistryErrorPayload {
    fn from(err: &RegistryError) -> Self {
        let product_id = match err {
            RegistryError::NotOwner { product_id, .. }
            | RegistryError::ProductNotFound { product_id }
            | RegistryError::AlreadyFlagged { product_id }
            | RegistryError::Contaminated { product_id }
            | RegistryError::Expired { product_id, .. } => Some(*product_id),
            _ => None,
        };

        Self {
            kind: err.kind(),
            message: err.to_string(),
            product_id,
        }
    }
}

impl From<RegistryError> for RegistryErrorPayload {
    fn from(err: RegistryError) -> Self {
        Self::from(&err)
    }
}
