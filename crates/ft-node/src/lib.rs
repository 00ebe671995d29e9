//! # FoodTrace Node Library
//!
//! Hosts a registry in a long-running process. The main entry point is the
//! `main.rs` binary; the modules are public so integration tests can start
//! the same runtime in-process.
//!
//! - `container/` - Configuration and construction of registry, store and bus
//! - `adapters/` - Runtime store selection
//! - `handlers/` - Event relay and metrics sync tasks

pub mod adapters;
pub mod container;
pub mod handlers;
mod runtime;

pub use container::{ConfigError, ContainerError, NodeConfig, NodeRegistry, RegistryContainer};
pub use runtime::NodeRuntime;
