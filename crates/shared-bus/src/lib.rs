//! # Shared Bus - Event Bus for Registry Notifications
//!
//! Every state-changing registry operation emits exactly one notification.
//! The bus fans those notifications out to whoever relays them onward
//! (logging, alerting, recall automation).
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────────┐
//! │   Registry   │                    │  Recall / Audit  │
//! │              │    publish()       │    consumers     │
//! │              │ ──────┐            │                  │
//! └──────────────┘       │            └──────────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! Events are delivered in publish order. Subscribers that fall behind the
//! channel capacity lose the oldest events and are told how many.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, SupplyChainEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
