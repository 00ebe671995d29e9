//! # Access Control
//!
//! Guard clauses evaluated against the calling identity before any
//! registry operation proceeds. They hold no state beyond the admin
//! identity and never touch the store: the caller looks up the records and
//! hands them in.

use crate::domain::entities::{FoodProduct, Participant};
use crate::domain::errors::RegistryError;
use shared_types::{Identity, ProductId};

/// Authorization predicates shared by every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessControl {
    admin: Identity,
}

impl AccessControl {
    pub fn new(admin: Identity) -> Self {
        Self { admin }
    }

    /// The admin identity fixed at initialization.
    pub fn admin(&self) -> Identity {
        self.admin
    }

    /// Fails `Unauthorized` unless `caller` is the admin.
    pub fn require_admin(&self, caller: Identity) -> Result<(), RegistryError> {
        if caller != self.admin {
            return Err(RegistryError::NotAdmin { caller });
        }
        Ok(())
    }

    /// Fails `Unauthorized` unless `record` is a verified participant.
    ///
    /// Returns the participant so callers can use the display name.
    pub fn require_verified_participant(
        caller: Identity,
        record: Option<Participant>,
    ) -> Result<Participant, RegistryError> {
        match record {
            Some(participant) if participant.verified => Ok(participant),
            _ => Err(RegistryError::NotVerified { caller }),
        }
    }

    /// Fails `NotFound` if the product does not exist, `Unauthorized` unless
    /// `caller` owns it.
    pub fn require_current_owner(
        caller: Identity,
        product_id: ProductId,
        product: Option<FoodProduct>,
    ) -> Result<FoodProduct, RegistryError> {
        let product = product.ok_or(RegistryError::ProductNotFound { product_id })?;
        if product.current_owner != caller {
            return Err(RegistryError::NotOwner { caller, product_id });
        }
        Ok(product)
    }
}
