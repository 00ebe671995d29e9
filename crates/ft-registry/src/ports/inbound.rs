//! # Inbound Ports (Driving Ports)
//!
//! The primary API of the registry. Hosts (a CLI, an RPC server, a test
//! harness) drive the registry exclusively through [`SupplyChainApi`].

use crate::domain::entities::{FoodProduct, HistoryEntry, Participant};
use crate::domain::errors::RegistryError;
use shared_types::{Identity, ProductId, Role, Timestamp};

/// Primary API for the supply-chain registry.
///
/// Every state-changing operation either commits completely and emits one
/// event, or returns an error and changes nothing.
pub trait SupplyChainApi {
    // =========================================================================
    // PARTICIPANT DIRECTORY
    // =========================================================================

    /// Register (or re-register) a participant as verified.
    ///
    /// ## Errors
    ///
    /// - `NotAdmin`: caller is not the admin
    /// - `InvalidIdentity`: identity is the zero address
    /// - `EmptyField` / `FieldTooLong`: bad name
    /// - `ParticipantExists`: already registered under `ReregistrationPolicy::Reject`
    fn register_participant(
        &self,
        caller: Identity,
        identity: Identity,
        name: &str,
        role: Role,
    ) -> Result<(), RegistryError>;

    /// Whether the identity is a verified participant. False when unknown.
    fn is_verified(&self, identity: Identity) -> Result<bool, RegistryError>;

    /// The participant record, if registered.
    fn get_participant(&self, identity: Identity) -> Result<Option<Participant>, RegistryError>;

    // =========================================================================
    // PRODUCT REGISTRY
    // =========================================================================

    /// Register a new product owned by the caller.
    ///
    /// Ids are assigned sequentially from 1 and only successful registrations
    /// consume one.
    ///
    /// ## Errors
    ///
    /// - `NotVerified`: caller is not a verified participant
    /// - `EmptyField` / `FieldTooLong`: bad name or origin
    /// - `InvalidExpiry`: `expiry_date <= now`
    fn register_product(
        &self,
        caller: Identity,
        name: &str,
        origin: &str,
        expiry_date: Timestamp,
        now: Timestamp,
    ) -> Result<ProductId, RegistryError>;

    /// Move a product to a new owner and location.
    ///
    /// ## Errors
    ///
    /// Checked in this order, first failure wins:
    ///
    /// - `ProductNotFound` / `NotOwner`: caller does not own an existing product
    /// - `InvalidIdentity`: new owner is the zero address
    /// - `UnverifiedRecipient`: new owner is not a verified participant
    /// - `Contaminated`: product has been flagged
    /// - `Expired`: `now >= expiry_date`
    fn transfer_product(
        &self,
        caller: Identity,
        product_id: ProductId,
        new_owner: Identity,
        new_location: &str,
        now: Timestamp,
    ) -> Result<(), RegistryError>;

    /// Rendered audit trail, oldest first.
    fn get_product_history(&self, product_id: ProductId) -> Result<Vec<String>, RegistryError>;

    /// Structured audit trail, oldest first.
    fn get_history_entries(&self, product_id: ProductId)
        -> Result<Vec<HistoryEntry>, RegistryError>;

    /// Every owner the product has had, farmer first.
    fn get_ownership_history(&self, product_id: ProductId)
        -> Result<Vec<Identity>, RegistryError>;

    /// Whether the product is neither contaminated nor expired at `now`.
    fn is_product_safe(&self, product_id: ProductId, now: Timestamp)
        -> Result<bool, RegistryError>;

    /// Snapshot of the product record.
    fn get_product(&self, product_id: ProductId) -> Result<FoodProduct, RegistryError>;

    /// Number of products registered; also the highest issued id.
    fn product_count(&self) -> Result<u64, RegistryError>;

    /// The admin identity fixed at initialization.
    fn admin(&self) -> Identity;

    // =========================================================================
    // CONTAMINATION GUARD
    // =========================================================================

    /// Flag a product as contaminated. Irreversible.
    ///
    /// ## Errors
    ///
    /// - `NotVerified`: caller is not a verified participant
    /// - `ProductNotFound`: unknown id
    /// - `AlreadyFlagged`: product was flagged before
    fn report_contamination(
        &self,
        caller: Identity,
        product_id: ProductId,
    ) -> Result<(), RegistryError>;
}
