//! # Supply Chain API Implementation
//!
//! Implements [`SupplyChainApi`]: writes go through the commit methods and
//! are observed for metrics, reads take the shared lock.

use super::*;
use crate::domain::entities::{FoodProduct, HistoryEntry, Participant};
use crate::domain::guard::ContaminationGuard;
use crate::ports::inbound::SupplyChainApi;
use shared_types::{Identity, ProductId, Role, Timestamp};
use tracing::debug;

impl<KV, TS, ES> SupplyChainApi for RegistryService<KV, TS, ES>
where
    KV: KeyValueStore,
    TS: TimeSource,
    ES: EventSink,
{
    fn register_participant(
        &self,
        caller: Identity,
        identity: Identity,
        name: &str,
        role: Role,
    ) -> Result<(), RegistryError> {
        self.observe(
            "register_participant",
            self.commit_participant(caller, identity, name, role),
        )
    }

    fn is_verified(&self, identity: Identity) -> Result<bool, RegistryError> {
        Ok(self.get_participant(identity)?.is_some_and(|p| p.verified))
    }

    fn get_participant(&self, identity: Identity) -> Result<Option<Participant>, RegistryError> {
        let store = self.store.read();
        LedgerView::new(&*store).participant(&identity)
    }

    fn register_product(
        &self,
        caller: Identity,
        name: &str,
        origin: &str,
        expiry_date: Timestamp,
        now: Timestamp,
    ) -> Result<ProductId, RegistryError> {
        self.observe(
            "register_product",
            self.commit_product_registration(caller, name, origin, expiry_date, now),
        )
    }

    fn transfer_product(
        &self,
        caller: Identity,
        product_id: ProductId,
        new_owner: Identity,
        new_location: &str,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        self.observe(
            "transfer_product",
            self.commit_transfer(caller, product_id, new_owner, new_location, now),
        )
    }

    fn get_product_history(&self, product_id: ProductId) -> Result<Vec<String>, RegistryError> {
        Ok(self
            .get_history_entries(product_id)?
            .iter()
            .map(HistoryEntry::render)
            .collect())
    }

    fn get_history_entries(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<HistoryEntry>, RegistryError> {
        let store = self.store.read();
        let view = LedgerView::new(&*store);
        view.require_product(product_id)?;
        let entries = view.history(product_id)?;
        debug!(product_id, entries = entries.len(), "History read");
        Ok(entries)
    }

    fn get_ownership_history(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Identity>, RegistryError> {
        let store = self.store.read();
        let view = LedgerView::new(&*store);
        view.require_product(product_id)?;
        view.owners(product_id)
    }

    fn is_product_safe(
        &self,
        product_id: ProductId,
        now: Timestamp,
    ) -> Result<bool, RegistryError> {
        let product = self.get_product(product_id)?;
        Ok(ContaminationGuard::is_safe(&product, now))
    }

    fn get_product(&self, product_id: ProductId) -> Result<FoodProduct, RegistryError> {
        let store = self.store.read();
        LedgerView::new(&*store).require_product(product_id)
    }

    fn product_count(&self) -> Result<u64, RegistryError> {
        let store = self.store.read();
        LedgerView::new(&*store).product_count()
    }

    fn admin(&self) -> Identity {
        self.access.admin()
    }

    fn report_contamination(
        &self,
        caller: Identity,
        product_id: ProductId,
    ) -> Result<(), RegistryError> {
        self.observe(
            "report_contamination",
            self.commit_contamination_report(caller, product_id),
        )
    }
}
