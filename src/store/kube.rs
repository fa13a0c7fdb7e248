//! Store backed by the Kubernetes API server

use async_trait::async_trait;
use kube::api::{ListParams, PostParams};
use kube::core::DynamicObject;
use kube::{Api, Client};

use super::{ResourceStore, Scope};
use crate::error::{FluxError, Result};
use crate::models::FluxResourceKind;
use crate::resources::ResourceDescriptor;

/// Store talking to the API server through kube-rs dynamic APIs
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn namespaced(&self, descriptor: &ResourceDescriptor, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &descriptor.api_resource())
    }
}

/// Translate a kube error for one named object into a domain error
fn map_object_error(
    operation: &'static str,
    kind: FluxResourceKind,
    namespace: &str,
    name: &str,
    error: kube::Error,
) -> FluxError {
    match error {
        kube::Error::Api(response) if response.code == 404 => FluxError::NotFound {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
        },
        kube::Error::Api(response) if response.code == 409 => FluxError::Conflict {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
        },
        other => FluxError::Store {
            operation,
            kind,
            source: Box::new(other),
        },
    }
}

#[async_trait]
impl ResourceStore for KubeStore {
    async fn list(
        &self,
        descriptor: &ResourceDescriptor,
        scope: &Scope,
    ) -> Result<Vec<DynamicObject>> {
        tracing::debug!("Listing {} in {}", descriptor.plural, scope);

        let api: Api<DynamicObject> = match scope {
            Scope::Namespace(ns) => self.namespaced(descriptor, ns),
            Scope::AllNamespaces => Api::all_with(self.client.clone(), &descriptor.api_resource()),
        };

        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|e| FluxError::Store {
                operation: "list",
                kind: descriptor.kind,
                source: Box::new(e),
            })?;

        tracing::debug!("Listed {} {}", list.items.len(), descriptor.plural);
        Ok(list.items)
    }

    async fn get(
        &self,
        descriptor: &ResourceDescriptor,
        namespace: &str,
        name: &str,
    ) -> Result<DynamicObject> {
        tracing::debug!("Getting {} {}/{}", descriptor.kind, namespace, name);

        self.namespaced(descriptor, namespace)
            .get(name)
            .await
            .map_err(|e| map_object_error("get", descriptor.kind, namespace, name, e))
    }

    async fn update(
        &self,
        descriptor: &ResourceDescriptor,
        object: &DynamicObject,
    ) -> Result<DynamicObject> {
        let namespace = object.metadata.namespace.clone().unwrap_or_default();
        let name = object.metadata.name.clone().unwrap_or_default();

        tracing::debug!(
            "Replacing {} {}/{} at resourceVersion {:?}",
            descriptor.kind,
            namespace,
            name,
            object.metadata.resource_version
        );

        // replace carries metadata.resourceVersion, so the API server rejects
        // the write with 409 if the object changed since it was read
        self.namespaced(descriptor, &namespace)
            .replace(&name, &PostParams::default(), object)
            .await
            .map_err(|e| map_object_error("update", descriptor.kind, &namespace, &name, e))
    }
}
