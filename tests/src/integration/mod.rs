//! # Integration Tests
//!
//! Cross-crate scenarios: the registry publishing to the shared bus, and the
//! node runtime hosting it.

pub mod e2e_lifecycle;
pub mod flows;
