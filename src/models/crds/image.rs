//! Image Reflector and Image Automation Controller resources

use chrono::{DateTime, Utc};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

use super::{CrossNamespaceObjectReference, Extra, FluxObject};
use crate::models::condition::Condition;
use crate::models::FluxResourceKind;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[kube(
    group = "image.toolkit.fluxcd.io",
    version = "v1",
    kind = "ImageRepository",
    plural = "imagerepositories",
    namespaced,
    status = "ImageRepositoryStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ImageRepositorySpec {
    pub image: String,
    pub interval: String,
    #[serde(default)]
    pub suspend: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Outcome of the latest registry scan
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    #[serde(default)]
    pub tag_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_time: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageRepositoryStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_scan_result: Option<ScanResult>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl FluxObject for ImageRepository {
    const KIND: FluxResourceKind = FluxResourceKind::ImageRepository;

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
        let scan = self
            .status
            .as_ref()
            .and_then(|s| s.last_scan_result.as_ref());
        match scan {
            Some(scan) => vec![
                scan.scan_time.map(format_time).unwrap_or_default(),
                scan.tag_count.to_string(),
            ],
            None => vec![String::new(), String::new()],
        }
    }
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[kube(
    group = "image.toolkit.fluxcd.io",
    version = "v1",
    kind = "ImageUpdateAutomation",
    plural = "imageupdateautomations",
    namespaced,
    status = "ImageUpdateAutomationStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpdateAutomationSpec {
    pub interval: String,
    pub source_ref: CrossNamespaceObjectReference,
    #[serde(default)]
    pub suspend: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpdateAutomationStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_automation_run_time: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl FluxObject for ImageUpdateAutomation {
    const KIND: FluxResourceKind = FluxResourceKind::ImageUpdateAutomation;

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
                .and_then(|s| s.last_automation_run_time)
                .map(format_time)
                .unwrap_or_default(),
        ]
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
