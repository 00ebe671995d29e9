//! # Adapters
//!
//! Port implementations the node selects at startup.

pub mod store;

pub use store::NodeStore;
