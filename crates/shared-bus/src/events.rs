//! # Supply Chain Events
//!
//! Defines all event types that flow through the shared bus. Each
//! state-changing registry operation publishes exactly one of these after
//! its write has committed.

use serde::{Deserialize, Serialize};
use shared_types::{Identity, ProductId, Role};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplyChainEvent {
    // =========================================================================
    // PARTICIPANT DIRECTORY
    // =========================================================================
    /// A participant was registered (or re-registered) by the admin.
    ParticipantRegistered {
        /// Identity of the participant.
        identity: Identity,
        /// Display name.
        name: String,
        /// Assigned role.
        role: Role,
    },

    // =========================================================================
    // PRODUCT REGISTRY
    // =========================================================================
    /// A new product unit was registered by its farmer.
    ProductRegistered {
        /// Sequence id of the new product.
        product_id: ProductId,
        /// Product name.
        name: String,
        /// Registering farmer (first owner).
        farmer: Identity,
    },

    /// Ownership of a product changed hands.
    ProductTransferred {
        /// The transferred product.
        product_id: ProductId,
        /// Owner before the transfer.
        previous_owner: Identity,
        /// Owner after the transfer.
        new_owner: Identity,
        /// Location recorded with the transfer.
        new_location: String,
    },

    // =========================================================================
    // CONTAMINATION GUARD (recall trigger)
    // =========================================================================
    /// A product was flagged as contaminated. Downstream recall logic
    /// subscribes to this topic.
    ContaminationReported {
        /// The flagged product.
        product_id: ProductId,
        /// Participant who filed the report.
        reporter: Identity,
    },
}

impl SupplyChainEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::ParticipantRegistered { .. } => EventTopic::Participants,
            Self::ProductRegistered { .. } | Self::ProductTransferred { .. } => {
                EventTopic::Products
            }
            Self::ContaminationReported { .. } => EventTopic::Contamination,
        }
    }

    /// Short name of the event kind, used as a log and metric label.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ParticipantRegistered { .. } => "participant_registered",
            Self::ProductRegistered { .. } => "product_registered",
            Self::ProductTransferred { .. } => "product_transferred",
            Self::ContaminationReported { .. } => "contamination_reported",
        }
    }

    /// The product this event concerns, if any.
    #[must_use]
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            Self::ParticipantRegistered { .. } => None,
            Self::ProductRegistered { product_id, .. }
            | Self::ProductTransferred { product_id, .. }
            | Self::ContaminationReported { product_id, .. } => Some(*product_id),
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Participant directory events.
    Participants,
    /// Product registration and transfer events.
    Products,
    /// Contamination reports.
    Contamination,
    /// All events (no filtering).
    All,
}

impl EventTopic {
    /// Label used for metrics and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Participants => "participants",
            Self::Products => "products",
            Self::Contamination => "contamination",
            Self::All => "all",
        }
    }
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Products to include. Empty means all products; events that concern
    /// no product never match a non-empty product list.
    pub product_ids: Vec<ProductId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            product_ids: Vec::new(),
        }
    }

    /// Create a filter for events about specific products.
    #[must_use]
    pub fn for_products(product_ids: Vec<ProductId>) -> Self {
        Self {
            topics: Vec::new(),
            product_ids,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &SupplyChainEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let product_match = self.product_ids.is_empty()
            || event
                .product_id()
                .is_some_and(|id| self.product_ids.contains(&id));

        topic_match && product_match
    }
}
