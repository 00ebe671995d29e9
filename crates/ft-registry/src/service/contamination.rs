//! # Contamination Reporting
//!
//! Any verified participant may flag any product. The flag is permanent and
//! the report is what downstream recall logic listens for.

use super::*;
use crate::domain::entities::HistoryEntry;
use crate::domain::guard::ContaminationGuard;
use shared_bus::SupplyChainEvent;
use shared_types::{Identity, ProductId};

impl<KV, TS, ES> RegistryService<KV, TS, ES>
where
    KV: KeyValueStore,
    TS: TimeSource,
    ES: EventSink,
{
    pub(crate) fn commit_contamination_report(
        &self,
        caller: Identity,
        product_id: ProductId,
    ) -> Result<(), RegistryError> {
        let mut store = self.store.write();
        let view = LedgerView::new(&*store);

        let reporter =
            AccessControl::require_verified_participant(caller, view.participant(&caller)?)?;
        let mut product = view.require_product(product_id)?;
        let history_slot = ContaminationGuard::flag(&mut product)?;
        let entry = HistoryEntry::contamination(self.time_source.now(), &reporter);

        let mut writes = StagedWrites::new();
        writes.put_product(&product)?;
        writes.append_history(product_id, history_slot, &entry)?;
        store.atomic_batch_write(writes.into_operations())?;

        self.metrics.record_contamination();
        warn!(
            product_id,
            reporter = %caller,
            owner = %product.current_owner,
            "Contamination reported"
        );
        self.events.emit(SupplyChainEvent::ContaminationReported {
            product_id,
            reporter: caller,
        });
        Ok(())
    }
}
