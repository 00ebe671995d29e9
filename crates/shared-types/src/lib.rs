//! # Shared Types Crate
//!
//! This crate contains the identity and scalar types used across the
//! FoodTrace workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Opaque Identity**: Participants are addressed by a 20-byte
//!   [`Identity`]; the all-zero address is never a valid participant.
//! - **Caller-Supplied Time**: Timestamps are plain Unix seconds so the core
//!   stays deterministic under test.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
