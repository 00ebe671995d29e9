//! # Registry Metrics
//!
//! Lock-free counters kept by the service. The host mirrors them into its
//! exporter; the registry itself does not depend on one.

use crate::domain::errors::ErrorKind;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for committed and rejected registry operations.
#[derive(Debug, Default)]
pub struct RegistryMetrics {
    /// Participant registrations committed (re-registrations included)
    pub participants_registered: AtomicU64,
    /// Products registered
    pub products_registered: AtomicU64,
    /// Ownership transfers committed
    pub transfers: AtomicU64,
    /// Contamination reports committed
    pub contamination_reports: AtomicU64,
    rejected_unauthorized: AtomicU64,
    rejected_not_found: AtomicU64,
    rejected_invalid_input: AtomicU64,
    rejected_already_flagged: AtomicU64,
    rejected_already_exists: AtomicU64,
    rejected_invalid_state: AtomicU64,
    rejected_storage: AtomicU64,
}

impl RegistryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_participant_registered(&self) {
        self.participants_registered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_product_registered(&self) {
        self.products_registered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transfer(&self) {
        self.transfers.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_contamination(&self) {
        self.contamination_reports.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an operation that returned an error of the given kind.
    pub fn record_rejected(&self, kind: ErrorKind) {
        self.rejected_counter(kind).fetch_add(1, Ordering::Relaxed);
    }

    /// Rejections recorded for one kind.
    pub fn rejected(&self, kind: ErrorKind) -> u64 {
        self.rejected_counter(kind).load(Ordering::Relaxed)
    }

    fn rejected_counter(&self, kind: ErrorKind) -> &AtomicU64 {
        match kind {
            ErrorKind::Unauthorized => &self.rejected_unauthorized,
            ErrorKind::NotFound => &self.rejected_not_found,
            ErrorKind::InvalidInput => &self.rejected_invalid_input,
            ErrorKind::AlreadyFlagged => &self.rejected_already_flagged,
            ErrorKind::AlreadyExists => &self.rejected_already_exists,
            ErrorKind::InvalidState => &self.rejected_invalid_state,
            ErrorKind::Storage => &self.rejected_storage,
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            participants_registered: self.participants_registered.load(Ordering::Relaxed),
            products_registered: self.products_registered.load(Ordering::Relaxed),
            transfers: self.transfers.load(Ordering::Relaxed),
            contamination_reports: self.contamination_reports.load(Ordering::Relaxed),
            rejected: ErrorKind::ALL
                .iter()
                .map(|kind| (*kind, self.rejected(*kind)))
                .collect(),
        }
    }
}

/// Point-in-time copy of [`RegistryMetrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub participants_registered: u64,
    pub products_registered: u64,
    pub transfers: u64,
    pub contamination_reports: u64,
    /// Rejection count per error kind, in [`ErrorKind::ALL`] order.
    pub rejected: Vec<(ErrorKind, u64)>,
}

impl MetricsSnapshot {
    /// Total rejected operations across all kinds.
    pub fn rejected_total(&self) -> u64 {
        self.rejected.iter().map(|(_, count)| count).sum()
    }
}
