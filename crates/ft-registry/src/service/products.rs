//! # Product Registry and Ownership Ledger
//!
//! Product records, id sequencing and the per-product audit trail, plus the
//! append-only owner chain each transfer extends. Record, history entry and
//! owner entry always land in the same batch.

use super::*;
use crate::domain::entities::{FoodProduct, HistoryEntry};
use crate::domain::guard::ContaminationGuard;
use shared_bus::SupplyChainEvent;
use shared_types::{Identity, ProductId, Timestamp};

impl<KV, TS, ES> RegistryService<KV, TS, ES>
where
    KV: KeyValueStore,
    TS: TimeSource,
    ES: EventSink,
{
    pub(crate) fn commit_product_registration(
        &self,
        caller: Identity,
        name: &str,
        origin: &str,
        expiry_date: Timestamp,
        now: Timestamp,
    ) -> Result<ProductId, RegistryError> {
        let mut store = self.store.write();
        let view = LedgerView::new(&*store);

        let farmer = AccessControl::require_verified_participant(caller, view.participant(&caller)?)?;
        self.check_text("name", name, true)?;
        self.check_text("origin", origin, false)?;
        if expiry_date <= now {
            return Err(RegistryError::InvalidExpiry { expiry_date, now });
        }

        let product_id = view.product_count()? + 1;
        let product = FoodProduct::register(product_id, name, origin, caller, expiry_date, now);
        let entry = HistoryEntry::registered(now, &farmer, origin);

        let mut writes = StagedWrites::new();
        writes.put_product(&product)?;
        writes.append_history(product_id, 0, &entry)?;
        writes.append_owner(product_id, 0, &caller)?;
        writes.put_product_count(product_id)?;
        store.atomic_batch_write(writes.into_operations())?;

        self.metrics.record_product_registered();
        info!(product_id, name, farmer = %caller, expiry_date, "Product registered");
        self.events.emit(SupplyChainEvent::ProductRegistered {
            product_id,
            name: product.name,
            farmer: caller,
        });
        Ok(product_id)
    }

    pub(crate) fn commit_transfer(
        &self,
        caller: Identity,
        product_id: ProductId,
        new_owner: Identity,
        new_location: &str,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        let mut store = self.store.write();
        let view = LedgerView::new(&*store);

        let mut product =
            AccessControl::require_current_owner(caller, product_id, view.product(product_id)?)?;
        if product_id == 0 || product_id > view.product_count()? {
            return Err(RegistryError::ProductNotFound { product_id });
        }
        if new_owner.is_zero() {
            return Err(RegistryError::InvalidIdentity);
        }
        let recipient = view
            .participant(&new_owner)?
            .filter(|p| p.verified)
            .ok_or(RegistryError::UnverifiedRecipient {
                recipient: new_owner,
            })?;
        ContaminationGuard::check_transferable(&product, now)?;
        self.check_text("location", new_location, false)?;

        let sender_name = view
            .participant(&caller)?
            .map(|p| p.name)
            .unwrap_or_else(|| caller.to_string());

        let previous_owner = product.current_owner;
        let (owner_slot, history_slot) = product.apply_transfer(new_owner, new_location);
        let entry = HistoryEntry::transferred(now, caller, sender_name, &recipient, new_location);

        let mut writes = StagedWrites::new();
        writes.put_product(&product)?;
        writes.append_history(product_id, history_slot, &entry)?;
        writes.append_owner(product_id, owner_slot, &new_owner)?;
        store.atomic_batch_write(writes.into_operations())?;

        self.metrics.record_transfer();
        info!(
            product_id,
            from = %previous_owner,
            to = %new_owner,
            location = new_location,
            "Product transferred"
        );
        self.events.emit(SupplyChainEvent::ProductTransferred {
            product_id,
            previous_owner,
            new_owner,
            new_location: product.current_location,
        });
        Ok(())
    }
}
