//! Notification Controller resources

use kube::CustomResource;
use serde::{Deserialize, Serialize};

use super::{CrossNamespaceObjectReference, Extra, FluxObject, LocalObjectReference};
use crate::models::condition::Condition;
use crate::models::FluxResourceKind;

/// Status shared by alerts and providers
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[kube(
    group = "notification.toolkit.fluxcd.io",
    version = "v1beta2",
    kind = "Alert",
    plural = "alerts",
    namespaced,
    status = "NotificationStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct AlertSpec {
    pub provider_ref: LocalObjectReference,
    pub event_sources: Vec<CrossNamespaceObjectReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_severity: Option<String>,
    #[serde(default)]
    pub suspend: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[kube(
    group = "notification.toolkit.fluxcd.io",
    version = "v1beta2",
    kind = "Provider",
    plural = "providers",
    namespaced,
    status = "NotificationStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSpec {
    #[serde(rename = "type")]
    pub provider_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default)]
    pub suspend: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[kube(
    group = "notification.toolkit.fluxcd.io",
    version = "v1",
    kind = "Receiver",
    plural = "receivers",
    namespaced,
    status = "ReceiverStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverSpec {
    #[serde(rename = "type")]
    pub receiver_type: String,
    pub resources: Vec<CrossNamespaceObjectReference>,
    pub secret_ref: LocalObjectReference,
    #[serde(default)]
    pub suspend: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_path: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl FluxObject for Alert {
    const KIND: FluxResourceKind = FluxResourceKind::Alert;

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
        Vec::new()
    }
}

impl FluxObject for Provider {
    const KIND: FluxResourceKind = FluxResourceKind::Provider;

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
        Vec::new()
    }
}

impl FluxObject for Receiver {
    const KIND: FluxResourceKind = FluxResourceKind::Receiver;

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
        Vec::new()
    }
}
