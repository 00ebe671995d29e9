//! # Participant Directory
//!
//! Verified identities and their roles. Every other authorization check
//! reads from here.

use super::*;
use crate::domain::entities::Participant;
use crate::domain::value_objects::ReregistrationPolicy;
use shared_bus::SupplyChainEvent;
use shared_types::{Identity, Role};
use tracing::debug;

impl<KV, TS, ES> RegistryService<KV, TS, ES>
where
    KV: KeyValueStore,
    TS: TimeSource,
    ES: EventSink,
{
    pub(crate) fn commit_participant(
        &self,
        caller: Identity,
        identity: Identity,
        name: &str,
        role: Role,
    ) -> Result<(), RegistryError> {
        self.access.require_admin(caller)?;
        if identity.is_zero() {
            return Err(RegistryError::InvalidIdentity);
        }
        self.check_text("name", name, true)?;

        let mut store = self.store.write();

        if let Some(existing) = LedgerView::new(&*store).participant(&identity)? {
            match self.config.reregistration {
                ReregistrationPolicy::Reject => {
                    return Err(RegistryError::ParticipantExists { identity });
                }
                ReregistrationPolicy::Upsert if existing.role != role => {
                    warn!(
                        %identity,
                        previous_role = %existing.role,
                        new_role = %role,
                        "Participant role changed on re-registration"
                    );
                }
                ReregistrationPolicy::Upsert => {
                    debug!(%identity, "Participant re-registered");
                }
            }
        }

        let participant = Participant::verified(identity, name, role);
        let mut writes = StagedWrites::new();
        writes.put_participant(&participant)?;
        store.atomic_batch_write(writes.into_operations())?;

        self.metrics.record_participant_registered();
        info!(%identity, name, %role, "Participant registered");
        self.events.emit(SupplyChainEvent::ParticipantRegistered {
            identity,
            name: participant.name,
            role,
        });
        Ok(())
    }
}
