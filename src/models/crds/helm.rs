//! Helm Controller resources

use kube::CustomResource;
use serde::{Deserialize, Serialize};

use super::{Extra, FluxObject};
use crate::models::condition::Condition;
use crate::models::FluxResourceKind;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[kube(
    group = "helm.toolkit.fluxcd.io",
    version = "v2",
    kind = "HelmRelease",
    plural = "helmreleases",
    namespaced,
    status = "HelmReleaseStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct HelmReleaseSpec {
    pub interval: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_name: Option<String>,
    #[serde(default)]
    pub suspend: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HelmReleaseStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_applied_revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempted_revision: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl FluxObject for HelmRelease {
    const KIND: FluxResourceKind = FluxResourceKind::HelmRelease;

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
        // Releases that never installed only carry an attempted revision
        let revision = self.status.as_ref().and_then(|s| {
            s.last_applied_revision
                .clone()
                .or_else(|| s.last_attempted_revision.clone())
        });
        vec![revision.unwrap_or_default()]
    }
}
