//! # Error Types
//!
//! Defines error types used across crates.

use thiserror::Error;

/// Errors raised when parsing an [`Identity`](crate::Identity) from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityParseError {
    /// The input contained non-hex characters.
    #[error("Invalid hex in identity: {0}")]
    InvalidHex(String),

    /// The decoded byte length was not 20.
    #[error("Invalid identity length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Error raised when a role name is not one of the recognised roles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown participant role: {0:?}")]
pub struct RoleParseError(pub String);
