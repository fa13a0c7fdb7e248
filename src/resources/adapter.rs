//! Uniform adapter over one fetched resource
//!
//! Commands never touch a kind's spec or status directly: they go through
//! [`FluxAdapter`], which every kind gets by implementing
//! [`FluxObject`](crate::models::crds::FluxObject).

use std::fmt;

use kube::core::DynamicObject;
use kube::ResourceExt;

use crate::error::{FluxError, Result};
use crate::models::crds::FluxObject;
use crate::models::{Condition, FluxResourceKind};

/// Identity of a resource: (kind, namespace, name)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub kind: FluxResourceKind,
    pub namespace: String,
    pub name: String,
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.kind, self.namespace, self.name)
    }
}

/// Capability set shared by every resource kind
pub trait FluxAdapter: fmt::Debug + Send + Sync {
    fn kind(&self) -> FluxResourceKind;

    fn name(&self) -> &str;

    fn namespace(&self) -> &str;

    /// Version the object had when it was fetched
    fn resource_version(&self) -> Option<String>;

    fn is_suspended(&self) -> bool;

    fn set_suspended(&mut self, suspended: bool);

    fn conditions(&self) -> &[Condition];

    /// Values for the kind-specific report columns
    fn status_columns(&self) -> Vec<String>;

    /// Convert the (possibly mutated) resource back into its wire form
    fn to_object(&self) -> Result<DynamicObject>;

    fn resource_ref(&self) -> ResourceRef {
        ResourceRef {
            kind: self.kind(),
            namespace: self.namespace().to_string(),
            name: self.name().to_string(),
        }
    }
}

/// Adapter holding exactly one typed resource of kind `K`
#[derive(Debug, Clone)]
pub struct Adapter<K: FluxObject> {
    object: K,
    namespace: String,
    name: String,
}

impl<K: FluxObject> Adapter<K> {
    /// Decode a fetched object. Missing identity or required spec fields fail
    /// with `MalformedResource`.
    pub fn from_object(obj: DynamicObject) -> Result<Self> {
        let name = obj
            .metadata
            .name
            .clone()
            .ok_or_else(|| {
                FluxError::malformed(K::KIND, "<unnamed>", "metadata.name is missing")
            })?;
        let namespace = obj
            .metadata
            .namespace
            .clone()
            .ok_or_else(|| {
                FluxError::malformed(K::KIND, &name, "metadata.namespace is missing")
            })?;

        if let Some(types) = &obj.types {
            if types.kind != K::KIND.as_str() {
                return Err(FluxError::malformed(
                    K::KIND,
                    &name,
                    format!("unexpected kind '{}'", types.kind),
                ));
            }
        }

        let value =
            serde_json::to_value(&obj).map_err(|e| FluxError::malformed(K::KIND, &name, e))?;
        let object: K =
            serde_json::from_value(value).map_err(|e| FluxError::malformed(K::KIND, &name, e))?;

        Ok(Self {
            object,
            namespace,
            name,
        })
    }
}

impl<K: FluxObject> FluxAdapter for Adapter<K> {
    fn kind(&self) -> FluxResourceKind {
        K::KIND
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn resource_version(&self) -> Option<String> {
        self.object.resource_version()
    }

    fn is_suspended(&self) -> bool {
        self.object.is_suspended()
    }

    fn set_suspended(&mut self, suspended: bool) {
        self.object.set_suspended(suspended);
    }

    fn conditions(&self) -> &[Condition] {
        self.object.conditions()
    }

    fn status_columns(&self) -> Vec<String> {
        self.object.status_columns()
    }

    fn to_object(&self) -> Result<DynamicObject> {
        let value = serde_json::to_value(&self.object)
            .map_err(|e| FluxError::malformed(K::KIND, &self.name, e))?;
        serde_json::from_value(value).map_err(|e| FluxError::malformed(K::KIND, &self.name, e))
    }
}

/// Build a boxed adapter for kind `K`; used as the registry's constructor
pub fn adapt<K: FluxObject>(obj: DynamicObject) -> Result<Box<dyn FluxAdapter>> {
    Ok(Box::new(Adapter::<K>::from_object(obj)?))
}
