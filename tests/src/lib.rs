//! # FoodTrace Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks for the registry write path
//! │   └── registry.rs
//! │
//! └── integration/      # Cross-crate scenarios
//!     ├── flows.rs      # Registry → event bus → subscribers
//!     └── e2e_lifecycle.rs  # Full node: farm to shelf, recalls, restarts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ft-tests
//!
//! # By category
//! cargo test -p ft-tests integration::flows
//! cargo test -p ft-tests integration::e2e_lifecycle
//!
//! # Benchmarks
//! cargo bench -p ft-tests
//! ```

pub mod benchmarks;
pub mod fixtures;
pub mod integration;
