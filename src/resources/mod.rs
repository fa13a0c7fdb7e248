//! Resource adapters and the kind registry

mod adapter;
mod registry;

pub use adapter::{adapt, Adapter, FluxAdapter, ResourceRef};
pub use registry::{
    descriptor_for, find_descriptor, get_all_commands, ResourceDescriptor, RESOURCE_REGISTRY,
};
