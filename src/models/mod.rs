//! Flux model layer
//!
//! Structure:
//! - `flux_resource_kind.rs` - closed enum of supported kinds
//! - `condition.rs` - status conditions and the Ready summary
//! - `crds/` - typed custom resources, one module per controller

pub mod condition;
pub mod crds;
pub mod flux_resource_kind;

pub use condition::{Condition, ConditionStatus, ReadySummary};
pub use flux_resource_kind::FluxResourceKind;
