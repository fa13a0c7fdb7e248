//! In-memory store
//!
//! Keeps objects in insertion order with a monotonically increasing
//! resourceVersion, and applies the same optimistic-concurrency rule as the
//! API server. Also exposes hooks to simulate a concurrent writer or a stalled
//! connection.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use kube::core::DynamicObject;

use super::{ResourceStore, Scope};
use crate::error::{FluxError, Result};
use crate::models::crds::FluxObject;
use crate::models::FluxResourceKind;
use crate::resources::{ResourceDescriptor, ResourceRef};

#[derive(Default)]
struct Inner {
    objects: Vec<(FluxResourceKind, DynamicObject)>,
    last_version: u64,
    updates: usize,
    /// Objects another writer modifies right before our next update
    contended: HashSet<ResourceRef>,
    /// Updates beyond this count never complete
    stall_after: Option<usize>,
    /// Lists never complete
    stall_lists: bool,
}

impl Inner {
    fn position(&self, kind: FluxResourceKind, namespace: &str, name: &str) -> Option<usize> {
        self.objects.iter().position(|(k, obj)| {
            *k == kind
                && obj.metadata.namespace.as_deref() == Some(namespace)
                && obj.metadata.name.as_deref() == Some(name)
        })
    }

    fn next_version(&mut self) -> String {
        self.last_version += 1;
        self.last_version.to_string()
    }
}

/// Versioned in-memory object store
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a typed resource, assigning it a fresh resourceVersion
    pub fn insert<K: FluxObject>(&self, resource: K) -> Result<()> {
        let name = kube::ResourceExt::name_any(&resource);
        let value =
            serde_json::to_value(&resource).map_err(|e| FluxError::malformed(K::KIND, &name, e))?;
        let object: DynamicObject =
            serde_json::from_value(value).map_err(|e| FluxError::malformed(K::KIND, &name, e))?;
        self.insert_object(K::KIND, object);
        Ok(())
    }

    /// Store a raw object as-is (apart from its resourceVersion), even if it
    /// would not decode as its kind
    pub fn insert_object(&self, kind: FluxResourceKind, mut object: DynamicObject) {
        let mut inner = self.lock();
        object.metadata.resource_version = Some(inner.next_version());
        let namespace = object.metadata.namespace.clone().unwrap_or_default();
        let name = object.metadata.name.clone().unwrap_or_default();
        match inner.position(kind, &namespace, &name) {
            Some(index) => inner.objects[index] = (kind, object),
            None => inner.objects.push((kind, object)),
        }
    }

    /// Simulate an external write: bump the stored version of an object
    pub fn touch(&self, kind: FluxResourceKind, namespace: &str, name: &str) -> bool {
        let mut inner = self.lock();
        match inner.position(kind, namespace, name) {
            Some(index) => {
                let version = inner.next_version();
                inner.objects[index].1.metadata.resource_version = Some(version);
                true
            }
            None => false,
        }
    }

    /// Have another writer modify the object just before our next update of it
    pub fn contend(&self, kind: FluxResourceKind, namespace: &str, name: &str) {
        self.lock().contended.insert(ResourceRef {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
    }

    /// Let `count` more updates through, then hang every following one
    pub fn stall_updates_after(&self, count: usize) {
        let mut inner = self.lock();
        inner.stall_after = Some(inner.updates + count);
    }

    /// Hang every following list call
    pub fn stall_lists(&self) {
        self.lock().stall_lists = true;
    }

    /// Number of successful writes
    pub fn update_count(&self) -> usize {
        self.lock().updates
    }

    pub fn object(
        &self,
        kind: FluxResourceKind,
        namespace: &str,
        name: &str,
    ) -> Option<DynamicObject> {
        let inner = self.lock();
        inner
            .position(kind, namespace, name)
            .map(|index| inner.objects[index].1.clone())
    }

    /// Decode a stored object as its typed kind
    pub fn typed<K: FluxObject>(&self, namespace: &str, name: &str) -> Option<K> {
        let object = self.object(K::KIND, namespace, name)?;
        serde_json::to_value(object)
            .ok()
            .and_then(|value| serde_json::from_value(value).ok())
    }
}

#[async_trait]
impl ResourceStore for InMemoryStore {
    async fn list(
        &self,
        descriptor: &ResourceDescriptor,
        scope: &Scope,
    ) -> Result<Vec<DynamicObject>> {
        let stalled = self.lock().stall_lists;
        if stalled {
            std::future::pending::<()>().await;
        }

        let inner = self.lock();
        Ok(inner
            .objects
            .iter()
            .filter(|(kind, obj)| {
                *kind == descriptor.kind
                    && scope.contains(obj.metadata.namespace.as_deref().unwrap_or_default())
            })
            .map(|(_, obj)| obj.clone())
            .collect())
    }

    async fn get(
        &self,
        descriptor: &ResourceDescriptor,
        namespace: &str,
        name: &str,
    ) -> Result<DynamicObject> {
        self.object(descriptor.kind, namespace, name)
            .ok_or_else(|| FluxError::NotFound {
                kind: descriptor.kind,
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }

    async fn update(
        &self,
        descriptor: &ResourceDescriptor,
        object: &DynamicObject,
    ) -> Result<DynamicObject> {
        let kind = descriptor.kind;
        let namespace = object.metadata.namespace.clone().unwrap_or_default();
        let name = object.metadata.name.clone().unwrap_or_default();

        let stalled = {
            let inner = self.lock();
            inner.stall_after.is_some_and(|limit| inner.updates >= limit)
        };
        if stalled {
            std::future::pending::<()>().await;
        }

        let mut inner = self.lock();
        let index = inner
            .position(kind, &namespace, &name)
            .ok_or_else(|| FluxError::NotFound {
                kind,
                namespace: namespace.clone(),
                name: name.clone(),
            })?;

        let identity = ResourceRef {
            kind,
            namespace: namespace.clone(),
            name: name.clone(),
        };
        if inner.contended.remove(&identity) {
            let version = inner.next_version();
            inner.objects[index].1.metadata.resource_version = Some(version);
        }

        if inner.objects[index].1.metadata.resource_version != object.metadata.resource_version {
            return Err(FluxError::Conflict {
                kind,
                namespace,
                name,
            });
        }

        let mut stored = object.clone();
        stored.metadata.resource_version = Some(inner.next_version());
        inner.objects[index].1 = stored.clone();
        inner.updates += 1;
        Ok(stored)
    }
}
