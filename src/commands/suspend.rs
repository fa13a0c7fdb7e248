//! `suspend` / `resume`: fetch, flip `spec.suspend`, write back
//!
//! Each resource is read once and written once. The write carries the version
//! that was read, so a concurrent change surfaces as `Conflict` instead of
//! being overwritten. Nothing is retried.

use kube::core::DynamicObject;

use super::Deadline;
use crate::error::{FluxError, Result};
use crate::models::FluxResourceKind;
use crate::resources::{FluxAdapter, ResourceDescriptor, ResourceRef};
use crate::store::{ResourceStore, Scope};

/// Which way to flip the suspend flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspendAction {
    Suspend,
    Resume,
}

impl SuspendAction {
    /// Value `spec.suspend` ends up with
    pub fn suspended(&self) -> bool {
        matches!(self, SuspendAction::Suspend)
    }

    pub fn verb(&self) -> &'static str {
        match self {
            SuspendAction::Suspend => "suspend",
            SuspendAction::Resume => "resume",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            SuspendAction::Suspend => "suspended",
            SuspendAction::Resume => "resumed",
        }
    }
}

/// A resource that was written back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub resource: ResourceRef,
    /// False when the flag already had the requested value
    pub changed: bool,
}

/// Per-resource outcomes of a list-scope suspend or resume
#[derive(Debug)]
pub struct BatchReport {
    pub plural: &'static str,
    pub scope: Scope,
    pub succeeded: Vec<Mutation>,
    pub failed: Vec<(ResourceRef, FluxError)>,
    /// Resources never attempted because the deadline expired first
    pub skipped: Vec<ResourceRef>,
}

impl BatchReport {
    fn new(plural: &'static str, scope: Scope) -> Self {
        Self {
            plural,
            scope,
            succeeded: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len() + self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Aggregate error if any resource was not updated
    pub fn failure(&self) -> Option<FluxError> {
        let failed = self.failed.len() + self.skipped.len();
        (failed > 0).then(|| FluxError::PartialFailure {
            failed,
            total: self.total(),
        })
    }
}

/// Suspend or resume resources of one kind
#[derive(Debug)]
pub struct SuspendCommand {
    descriptor: &'static ResourceDescriptor,
    action: SuspendAction,
}

impl SuspendCommand {
    pub fn new(descriptor: &'static ResourceDescriptor, action: SuspendAction) -> Self {
        Self { descriptor, action }
    }

    /// Act on one named resource
    pub async fn run(
        &self,
        store: &dyn ResourceStore,
        deadline: &Deadline,
        namespace: &str,
        name: &str,
    ) -> Result<Mutation> {
        let obj = deadline
            .run(store.get(self.descriptor, namespace, name))
            .await?;
        let adapter = self.descriptor.adapt(obj)?;
        self.apply(store, deadline, adapter).await
    }

    /// Act on every resource of the kind in `scope`, one at a time in list
    /// order. Earlier writes stay in place when a later one fails.
    pub async fn run_all(
        &self,
        store: &dyn ResourceStore,
        deadline: &Deadline,
        scope: &Scope,
    ) -> Result<BatchReport> {
        let objects = deadline.run(store.list(self.descriptor, scope)).await?;
        let mut report = BatchReport::new(self.descriptor.plural, scope.clone());

        let mut pending = objects.into_iter();
        while let Some(obj) = pending.next() {
            let identity = identity_of(self.descriptor.kind, &obj);

            let result = match self.descriptor.adapt(obj) {
                Ok(adapter) => self.apply(store, deadline, adapter).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(mutation) => report.succeeded.push(mutation),
                Err(e) if e.is_timeout() => {
                    tracing::warn!("Deadline expired while updating {}", identity);
                    report.failed.push((identity, e));
                    let kind = self.descriptor.kind;
                    report
                        .skipped
                        .extend(pending.by_ref().map(|obj| identity_of(kind, &obj)));
                    break;
                }
                Err(e) => {
                    tracing::warn!("Failed to {} {}: {}", self.action.verb(), identity, e);
                    report.failed.push((identity, e));
                }
            }
        }

        Ok(report)
    }

    async fn apply(
        &self,
        store: &dyn ResourceStore,
        deadline: &Deadline,
        mut adapter: Box<dyn FluxAdapter>,
    ) -> Result<Mutation> {
        let target = self.action.suspended();
        let changed = adapter.is_suspended() != target;
        adapter.set_suspended(target);

        // Written back even when unchanged, so the version check still runs
        let object = adapter.to_object()?;
        deadline.run(store.update(self.descriptor, &object)).await?;

        let resource = adapter.resource_ref();
        tracing::info!("Successfully {} {}", self.action.past_tense(), resource);
        Ok(Mutation { resource, changed })
    }
}

fn identity_of(kind: FluxResourceKind, obj: &DynamicObject) -> ResourceRef {
    ResourceRef {
        kind,
        namespace: obj.metadata.namespace.clone().unwrap_or_default(),
        name: obj
            .metadata
            .name
            .clone()
            .unwrap_or_else(|| "<unnamed>".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::descriptor_for;
    use crate::store::MockResourceStore;
    use std::time::Duration;

    #[test]
    fn test_action_properties() {
        assert!(SuspendAction::Suspend.suspended());
        assert!(!SuspendAction::Resume.suspended());
        assert_eq!(SuspendAction::Suspend.verb(), "suspend");
        assert_eq!(SuspendAction::Resume.past_tense(), "resumed");
    }

    #[tokio::test]
    async fn test_missing_resource_is_never_written() {
        let mut store = MockResourceStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|descriptor, namespace, name| {
                Err(FluxError::NotFound {
                    kind: descriptor.kind,
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                })
            });
        store.expect_update().times(0);

        let command = SuspendCommand::new(
            descriptor_for(FluxResourceKind::Kustomization),
            SuspendAction::Suspend,
        );
        let deadline = Deadline::after(Duration::from_secs(5));
        let err = command
            .run(&store, &deadline, "flux-system", "app-a")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_malformed_resource_is_never_written() {
        let mut store = MockResourceStore::new();
        store.expect_get().times(1).returning(|_, _, _| {
            Ok(serde_json::from_value(serde_json::json!({
                "apiVersion": "kustomize.toolkit.fluxcd.io/v1",
                "kind": "Kustomization",
                "metadata": {"name": "app-a", "namespace": "flux-system"},
                "spec": {"interval": "5m"}
            }))
            .unwrap())
        });
        store.expect_update().times(0);

        let command = SuspendCommand::new(
            descriptor_for(FluxResourceKind::Kustomization),
            SuspendAction::Resume,
        );
        let deadline = Deadline::after(Duration::from_secs(5));
        let err = command
            .run(&store, &deadline, "flux-system", "app-a")
            .await
            .unwrap_err();
        assert!(matches!(err, FluxError::MalformedResource { .. }));
    }

    #[test]
    fn test_batch_report_failure() {
        let mut report = BatchReport::new("alerts", Scope::AllNamespaces);
        assert!(report.is_empty());
        assert!(report.failure().is_none());

        let resource = ResourceRef {
            kind: FluxResourceKind::Alert,
            namespace: "flux-system".to_string(),
            name: "a".to_string(),
        };
        report.succeeded.push(Mutation {
            resource: resource.clone(),
            changed: true,
        });
        assert!(report.failure().is_none());

        report.skipped.push(resource);
        let failure = report.failure().unwrap();
        assert!(matches!(
            failure,
            FluxError::PartialFailure {
                failed: 1,
                total: 2
            }
        ));
    }
}
