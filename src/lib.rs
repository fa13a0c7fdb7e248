//! fluxctl library
//!
//! Command dispatch and status reporting for Flux resources. The binary is a
//! thin wrapper; everything here can be driven against an
//! [`InMemoryStore`](store::InMemoryStore) in tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod kube;
pub mod models;
pub mod report;
pub mod resources;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{FluxError, Result};
pub use models::{Condition, ConditionStatus, FluxResourceKind, ReadySummary};
pub use resources::{
    descriptor_for, find_descriptor, get_all_commands, FluxAdapter, ResourceDescriptor,
    ResourceRef, RESOURCE_REGISTRY,
};
pub use store::{InMemoryStore, KubeStore, ResourceStore, Scope};
