//! # FoodTrace Benchmarks
//!
//! Criterion benchmarks for the registry hot paths and the file store.

pub mod registry;
pub mod storage;
