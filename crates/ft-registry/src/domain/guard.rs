//! # Contamination Guard
//!
//! Enforces the safety invariant: a contaminated or expired product cannot
//! change hands. Contamination is an absorbing flag written only by
//! [`ContaminationGuard::flag`]; expiry is derived from the clock at call
//! time and never stored.

use crate::domain::entities::FoodProduct;
use crate::domain::errors::RegistryError;
use shared_types::Timestamp;

/// Safety rules for product transferability.
pub struct ContaminationGuard;

impl ContaminationGuard {
    /// Whether the product is neither contaminated nor expired at `now`.
    pub fn is_safe(product: &FoodProduct, now: Timestamp) -> bool {
        !product.is_contaminated && !product.is_expired(now)
    }

    /// Fails `InvalidState` if the product may not change hands at `now`.
    ///
    /// Contamination is checked before expiry.
    pub fn check_transferable(product: &FoodProduct, now: Timestamp) -> Result<(), RegistryError> {
        if product.is_contaminated {
            return Err(RegistryError::Contaminated {
                product_id: product.id,
            });
        }
        if product.is_expired(now) {
            return Err(RegistryError::Expired {
                product_id: product.id,
                expiry_date: product.expiry_date,
                now,
            });
        }
        Ok(())
    }

    /// Mark the product contaminated.
    ///
    /// Duplicate reports fail `AlreadyFlagged`. Returns the history slot for
    /// the report entry.
    pub fn flag(product: &mut FoodProduct) -> Result<u32, RegistryError> {
        if product.is_contaminated {
            return Err(RegistryError::AlreadyFlagged {
                product_id: product.id,
            });
        }
        Ok(product.flag_contaminated())
    }
}
