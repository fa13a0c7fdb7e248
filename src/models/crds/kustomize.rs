//! Kustomize Controller resources

use kube::CustomResource;
use serde::{Deserialize, Serialize};

use super::{CrossNamespaceObjectReference, Extra, FluxObject};
use crate::models::condition::Condition;
use crate::models::FluxResourceKind;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[kube(
    group = "kustomize.toolkit.fluxcd.io",
    version = "v1",
    kind = "Kustomization",
    plural = "kustomizations",
    namespaced,
    status = "KustomizationStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct KustomizationSpec {
    pub interval: String,
    pub source_ref: CrossNamespaceObjectReference,
    pub prune: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub suspend: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KustomizationStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_applied_revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempted_revision: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl FluxObject for Kustomization {
    const KIND: FluxResourceKind = FluxResourceKind::Kustomization;

    fn is_suspended(&self) -> bool {
        self.spec.suspend
    }

    fn set_suspended(&mut self, suspended: bool) {
        self.spec.suspend = suspended;
    }

    fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .map(|s| s.conditions.as_slice())
            .unwrap_or(&[])
    }

    fn status_columns(&self) -> Vec<String> {
        vec![
            self.status
                .as_ref()
                .and_then(|s| s.last_applied_revision.clone())
                .unwrap_or_default(),
        ]
    }
}
