//! Typed Flux custom resources
//!
//! Each controller's kinds live in their own module. Only the fields the CLI
//! reads or writes are typed; everything else is kept in `extra` maps so a
//! fetched object survives a read-modify-write round trip unchanged.
//!
//! Every kind implements [`FluxObject`] against its own spec/status layout.

mod helm;
mod image;
mod kustomize;
mod notification;
mod source;

pub use helm::{HelmRelease, HelmReleaseSpec, HelmReleaseStatus};
pub use image::{
    ImageRepository, ImageRepositorySpec, ImageRepositoryStatus, ImageUpdateAutomation,
    ImageUpdateAutomationSpec, ImageUpdateAutomationStatus, ScanResult,
};
pub use kustomize::{Kustomization, KustomizationSpec, KustomizationStatus};
pub use notification::{
    Alert, AlertSpec, NotificationStatus, Provider, ProviderSpec, Receiver, ReceiverSpec,
    ReceiverStatus,
};
pub use source::{
    Bucket, BucketSpec, GitRepository, GitRepositorySpec, HelmChart, HelmChartSpec,
    HelmRepository, HelmRepositorySpec, OCIRepository, OCIRepositorySpec, SourceStatus,
};

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::FluxResourceKind;

/// Fields not modelled by the typed structs, preserved verbatim
pub type Extra = BTreeMap<String, serde_json::Value>;

/// Per-kind access to the fields every command relies on
pub trait FluxObject:
    kube::Resource<DynamicType = ()>
    + Serialize
    + DeserializeOwned
    + Clone
    + std::fmt::Debug
    + Send
    + Sync
    + 'static
{
    const KIND: FluxResourceKind;

    fn is_suspended(&self) -> bool;

    fn set_suspended(&mut self, suspended: bool);

    fn conditions(&self) -> &[Condition];

    /// Values for the kind-specific report columns, in registry order
    fn status_columns(&self) -> Vec<String>;
}

/// Reference to another object, possibly in another namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossNamespaceObjectReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Reference to an object in the same namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalObjectReference {
    pub name: String,
}

/// Artifact produced by a source controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(default)]
    pub revision: String,
    #[serde(flatten)]
    pub extra: Extra,
}
