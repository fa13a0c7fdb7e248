//! Shared fixtures: minimal valid objects for every registered kind

#![allow(dead_code)]

use fluxctl::resources::descriptor_for;
use fluxctl::{FluxResourceKind, InMemoryStore};
use kube::core::DynamicObject;
use serde_json::{json, Value};

/// Minimal spec carrying every field the kind requires
pub fn minimal_spec(kind: FluxResourceKind) -> Value {
    let source_ref = json!({"kind": "GitRepository", "name": "flux-system"});
    match kind {
        FluxResourceKind::GitRepository => json!({
            "url": "https://github.com/stefanprodan/podinfo",
            "interval": "1m",
            "ref": {"branch": "master"}
        }),
        FluxResourceKind::OCIRepository => json!({
            "url": "oci://ghcr.io/stefanprodan/manifests/podinfo",
            "interval": "5m"
        }),
        FluxResourceKind::HelmRepository => json!({"url": "https://charts.bitnami.com/bitnami"}),
        FluxResourceKind::Bucket => json!({
            "bucketName": "podinfo",
            "endpoint": "minio.minio.svc:9000",
            "interval": "5m"
        }),
        FluxResourceKind::HelmChart => json!({
            "chart": "podinfo",
            "sourceRef": {"kind": "HelmRepository", "name": "podinfo"},
            "interval": "5m"
        }),
        FluxResourceKind::Kustomization => json!({
            "interval": "10m",
            "sourceRef": source_ref,
            "prune": true,
            "path": "./clusters/prod"
        }),
        FluxResourceKind::HelmRelease => json!({
            "interval": "5m",
            "chart": {"spec": {"chart": "podinfo", "version": "6.x"}}
        }),
        FluxResourceKind::ImageRepository => json!({
            "image": "ghcr.io/stefanprodan/podinfo",
            "interval": "5m"
        }),
        FluxResourceKind::ImageUpdateAutomation => json!({
            "interval": "30m",
            "sourceRef": source_ref
        }),
        FluxResourceKind::Alert => json!({
            "providerRef": {"name": "slack"},
            "eventSources": [{"kind": "Kustomization", "name": "*"}]
        }),
        FluxResourceKind::Provider => json!({"type": "slack", "channel": "general"}),
        FluxResourceKind::Receiver => json!({
            "type": "github",
            "resources": [{"kind": "GitRepository", "name": "flux-system"}],
            "secretRef": {"name": "webhook-token"}
        }),
    }
}

/// Builder for a fixture object
pub struct Fixture {
    kind: FluxResourceKind,
    namespace: String,
    name: String,
    suspended: Option<bool>,
    conditions: Vec<Value>,
    status: serde_json::Map<String, Value>,
}

impl Fixture {
    pub fn new(kind: FluxResourceKind, namespace: &str, name: &str) -> Self {
        Self {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
            suspended: None,
            conditions: Vec::new(),
            status: serde_json::Map::new(),
        }
    }

    pub fn suspended(mut self, suspended: bool) -> Self {
        self.suspended = Some(suspended);
        self
    }

    pub fn condition(mut self, type_: &str, status: &str, message: &str) -> Self {
        self.conditions.push(json!({
            "type": type_,
            "status": status,
            "reason": "Test",
            "message": message,
            "lastTransitionTime": "2025-01-01T00:00:00Z"
        }));
        self
    }

    pub fn ready(self, status: &str, message: &str) -> Self {
        self.condition("Ready", status, message)
    }

    pub fn status_field(mut self, key: &str, value: Value) -> Self {
        self.status.insert(key.to_string(), value);
        self
    }

    pub fn to_value(&self) -> Value {
        let api_resource = descriptor_for(self.kind).api_resource();
        let mut spec = minimal_spec(self.kind);
        if let Some(suspended) = self.suspended {
            spec["suspend"] = json!(suspended);
        }
        let mut status = self.status.clone();
        status.insert("conditions".to_string(), json!(self.conditions));
        json!({
            "apiVersion": api_resource.api_version,
            "kind": api_resource.kind,
            "metadata": {
                "name": self.name,
                "namespace": self.namespace,
                "labels": {"app.kubernetes.io/part-of": "flux"},
                "annotations": {"example.com/owner": "platform"}
            },
            "spec": spec,
            "status": status,
        })
    }

    pub fn build(&self) -> DynamicObject {
        serde_json::from_value(self.to_value()).expect("fixture is a valid object")
    }

    pub fn insert_into(&self, store: &InMemoryStore) {
        store.insert_object(self.kind, self.build());
    }
}
