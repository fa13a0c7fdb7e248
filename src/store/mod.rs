//! Remote object store boundary
//!
//! Commands only need three operations: list a kind in a scope, get one
//! object, and write one object back guarded by the version it was read at.
//! [`KubeStore`] talks to the API server; [`InMemoryStore`] keeps objects in
//! a versioned map.

mod kube;
mod memory;

pub use self::kube::KubeStore;
pub use self::memory::InMemoryStore;

use std::fmt;

use async_trait::async_trait;
use ::kube::core::DynamicObject;

use crate::error::Result;
use crate::resources::ResourceDescriptor;

/// Namespace selection for list and batch operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Namespace(String),
    AllNamespaces,
}

impl Scope {
    pub fn from_flags(namespace: &str, all_namespaces: bool) -> Self {
        if all_namespaces {
            Scope::AllNamespaces
        } else {
            Scope::Namespace(namespace.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Scope::AllNamespaces)
    }

    pub fn contains(&self, namespace: &str) -> bool {
        match self {
            Scope::Namespace(ns) => ns == namespace,
            Scope::AllNamespaces => true,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Namespace(ns) => write!(f, "{} namespace", ns),
            Scope::AllNamespaces => write!(f, "any namespace"),
        }
    }
}

/// Operations consumed from the remote object store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// List every object of a kind in the scope, in store order
    async fn list(
        &self,
        descriptor: &ResourceDescriptor,
        scope: &Scope,
    ) -> Result<Vec<DynamicObject>>;

    /// Get one object; a missing object is `FluxError::NotFound`
    async fn get(
        &self,
        descriptor: &ResourceDescriptor,
        namespace: &str,
        name: &str,
    ) -> Result<DynamicObject>;

    /// Replace an object. The write only succeeds if the stored version still
    /// equals `object.metadata.resource_version`; otherwise
    /// `FluxError::Conflict`.
    async fn update(
        &self,
        descriptor: &ResourceDescriptor,
        object: &DynamicObject,
    ) -> Result<DynamicObject>;
}
