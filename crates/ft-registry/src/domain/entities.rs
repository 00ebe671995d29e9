//! # Core Domain Entities
//!
//! - [`Participant`]: a verified supply-chain actor
//! - [`FoodProduct`]: the mutable record of one product unit
//! - [`HistoryEntry`]: one structured audit-trail record, rendered to text
//!   only at the boundary
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Expiry strictly after registration | `FoodProduct::register` |
//! | Contamination flag never resets | no setter exists; only `flag_contaminated` writes it |
//! | History and ownership are append-only | counters only grow; entries keyed by sequence |

use serde::{Deserialize, Serialize};
use shared_types::{Identity, ProductId, Role, Timestamp};
use std::fmt;

/// A registered supply-chain actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub identity: Identity,
    pub name: String,
    pub role: Role,
    /// Always true for records created through registration.
    pub verified: bool,
}

impl Participant {
    /// A freshly registered participant. Registration always verifies.
    pub fn verified(identity: Identity, name: impl Into<String>, role: Role) -> Self {
        Self {
            identity,
            name: name.into(),
            role,
            verified: true,
        }
    }
}

/// The stored record of one product unit.
///
/// The audit trail and the ownership chain live under their own keys; this
/// record tracks how many entries each holds so appends know their slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodProduct {
    pub id: ProductId,
    pub name: String,
    pub origin: String,
    pub farmer: Identity,
    /// Set to the registration time.
    pub harvest_date: Timestamp,
    pub current_location: String,
    pub current_owner: Identity,
    pub is_contaminated: bool,
    pub expiry_date: Timestamp,
    /// Number of history entries recorded.
    pub history_len: u32,
    /// Number of owners recorded, registering farmer included.
    pub owner_count: u32,
}

impl FoodProduct {
    /// Build the record for a new registration.
    ///
    /// The returned record already counts the registration history entry and
    /// the farmer as first owner; the caller stages both alongside it.
    pub fn register(
        id: ProductId,
        name: impl Into<String>,
        origin: impl Into<String>,
        farmer: Identity,
        expiry_date: Timestamp,
        now: Timestamp,
    ) -> Self {
        let origin = origin.into();
        Self {
            id,
            name: name.into(),
            current_location: origin.clone(),
            origin,
            farmer,
            harvest_date: now,
            current_owner: farmer,
            is_contaminated: false,
            expiry_date,
            history_len: 1,
            owner_count: 1,
        }
    }

    /// Whether `now` is at or past the expiry date.
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expiry_date
    }

    /// Move ownership; returns the slot for the new ownership entry and the
    /// slot for the new history entry.
    pub(crate) fn apply_transfer(
        &mut self,
        new_owner: Identity,
        new_location: impl Into<String>,
    ) -> (u32, u32) {
        self.current_owner = new_owner;
        self.current_location = new_location.into();
        let owner_slot = self.owner_count;
        let history_slot = self.history_len;
        self.owner_count += 1;
        self.history_len += 1;
        (owner_slot, history_slot)
    }

    /// Set the contamination flag; returns the slot for the new history entry.
    pub(crate) fn flag_contaminated(&mut self) -> u32 {
        self.is_contaminated = true;
        let history_slot = self.history_len;
        self.history_len += 1;
        history_slot
    }
}

/// What happened in a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryKind {
    /// Product registered at its origin.
    Registered { origin: String },
    /// Ownership moved to a new participant.
    Transferred {
        new_owner: Identity,
        new_owner_name: String,
        location: String,
    },
    /// Product flagged as contaminated.
    ContaminationReported,
}

/// One record in a product's audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: Timestamp,
    /// Participant whose action produced the entry.
    pub actor: Identity,
    /// Actor's display name at the time of the action.
    pub actor_name: String,
    pub kind: HistoryKind,
}

impl HistoryEntry {
    pub fn registered(
        timestamp: Timestamp,
        farmer: &Participant,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            actor: farmer.identity,
            actor_name: farmer.name.clone(),
            kind: HistoryKind::Registered {
                origin: origin.into(),
            },
        }
    }

    pub fn transferred(
        timestamp: Timestamp,
        from: Identity,
        from_name: impl Into<String>,
        to: &Participant,
        location: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            actor: from,
            actor_name: from_name.into(),
            kind: HistoryKind::Transferred {
                new_owner: to.identity,
                new_owner_name: to.name.clone(),
                location: location.into(),
            },
        }
    }

    pub fn contamination(timestamp: Timestamp, reporter: &Participant) -> Self {
        Self {
            timestamp,
            actor: reporter.identity,
            actor_name: reporter.name.clone(),
            kind: HistoryKind::ContaminationReported,
        }
    }

    /// Human-readable line for the audit log.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            HistoryKind::Registered { origin } => {
                write!(f, "Registered at {} by {}", origin, self.actor_name)
            }
            HistoryKind::Transferred {
                new_owner_name,
                location,
                ..
            } => write!(f, "Transferred to {} at {}", new_owner_name, location),
            HistoryKind::ContaminationReported => {
                write!(f, "Contamination reported by {}", self.actor_name)
            }
        }
    }
}
