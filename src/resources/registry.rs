//! Resource registry
//!
//! The single closed table of every kind the CLI can address. The command
//! tree, name resolution and the store all read from here, so adding a kind
//! is one new entry (plus its typed model in `models::crds`).

use kube::core::{ApiResource, DynamicObject};

use super::adapter::{adapt, FluxAdapter};
use crate::error::Result;
use crate::models::crds::{
    Alert, Bucket, GitRepository, HelmChart, HelmRelease, HelmRepository, ImageRepository,
    ImageUpdateAutomation, Kustomization, OCIRepository, Provider, Receiver,
};
use crate::models::FluxResourceKind;

/// Static metadata identifying one resource kind
pub struct ResourceDescriptor {
    pub kind: FluxResourceKind,
    /// Singular command name, used by `suspend` and `resume`
    pub command: &'static str,
    /// Plural command name, used by `get`
    pub plural: &'static str,
    pub aliases: &'static [&'static str],
    /// Headers of the kind-specific report columns
    pub status_columns: &'static [&'static str],
    api_resource: fn() -> ApiResource,
    adapter: fn(DynamicObject) -> Result<Box<dyn FluxAdapter>>,
}

impl ResourceDescriptor {
    /// Group/version/plural used to address the kind on the API server
    pub fn api_resource(&self) -> ApiResource {
        (self.api_resource)()
    }

    /// Wrap a fetched object in this kind's adapter
    pub fn adapt(&self, obj: DynamicObject) -> Result<Box<dyn FluxAdapter>> {
        (self.adapter)(obj)
    }

    /// Every name this kind answers to
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        [self.command, self.plural]
            .into_iter()
            .chain(self.aliases.iter().copied())
    }

    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.names().any(|n| n == name)
    }
}

impl std::fmt::Debug for ResourceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceDescriptor")
            .field("kind", &self.kind)
            .field("command", &self.command)
            .field("plural", &self.plural)
            .field("aliases", &self.aliases)
            .finish()
    }
}

fn erase<K: kube::Resource<DynamicType = ()>>() -> ApiResource {
    ApiResource::erase::<K>(&())
}

const REVISION: &[&str] = &["Revision"];

/// Registry of all supported Flux resources, in command tree order
pub static RESOURCE_REGISTRY: &[ResourceDescriptor] = &[
    // Source Controller resources
    ResourceDescriptor {
        kind: FluxResourceKind::GitRepository,
        command: "gitrepository",
        plural: "gitrepositories",
        aliases: &["gitrepo", "git"],
        status_columns: REVISION,
        api_resource: erase::<GitRepository>,
        adapter: adapt::<GitRepository>,
    },
    ResourceDescriptor {
        kind: FluxResourceKind::OCIRepository,
        command: "ocirepository",
        plural: "ocirepositories",
        aliases: &["oci"],
        status_columns: REVISION,
        api_resource: erase::<OCIRepository>,
        adapter: adapt::<OCIRepository>,
    },
    ResourceDescriptor {
        kind: FluxResourceKind::HelmRepository,
        command: "helmrepository",
        plural: "helmrepositories",
        aliases: &["helmrepo"],
        status_columns: REVISION,
        api_resource: erase::<HelmRepository>,
        adapter: adapt::<HelmRepository>,
    },
    ResourceDescriptor {
        kind: FluxResourceKind::Bucket,
        command: "bucket",
        plural: "buckets",
        aliases: &[],
        status_columns: REVISION,
        api_resource: erase::<Bucket>,
        adapter: adapt::<Bucket>,
    },
    ResourceDescriptor {
        kind: FluxResourceKind::HelmChart,
        command: "helmchart",
        plural: "helmcharts",
        aliases: &["chart"],
        status_columns: REVISION,
        api_resource: erase::<HelmChart>,
        adapter: adapt::<HelmChart>,
    },
    // Kustomize Controller resources
    ResourceDescriptor {
        kind: FluxResourceKind::Kustomization,
        command: "kustomization",
        plural: "kustomizations",
        aliases: &["ks"],
        status_columns: REVISION,
        api_resource: erase::<Kustomization>,
        adapter: adapt::<Kustomization>,
    },
    // Helm Controller resources
    ResourceDescriptor {
        kind: FluxResourceKind::HelmRelease,
        command: "helmrelease",
        plural: "helmreleases",
        aliases: &["hr"],
        status_columns: REVISION,
        api_resource: erase::<HelmRelease>,
        adapter: adapt::<HelmRelease>,
    },
    // Image Reflector / Automation Controller resources
    ResourceDescriptor {
        kind: FluxResourceKind::ImageRepository,
        command: "imagerepository",
        plural: "imagerepositories",
        aliases: &["imagerepo"],
        status_columns: &["Last Scan", "Tags"],
        api_resource: erase::<ImageRepository>,
        adapter: adapt::<ImageRepository>,
    },
    ResourceDescriptor {
        kind: FluxResourceKind::ImageUpdateAutomation,
        command: "imageupdateautomation",
        plural: "imageupdateautomations",
        aliases: &["iua"],
        status_columns: &["Last Run"],
        api_resource: erase::<ImageUpdateAutomation>,
        adapter: adapt::<ImageUpdateAutomation>,
    },
    // Notification Controller resources
    ResourceDescriptor {
        kind: FluxResourceKind::Alert,
        command: "alert",
        plural: "alerts",
        aliases: &[],
        status_columns: &[],
        api_resource: erase::<Alert>,
        adapter: adapt::<Alert>,
    },
    ResourceDescriptor {
        kind: FluxResourceKind::Provider,
        command: "provider",
        plural: "providers",
        aliases: &[],
        status_columns: &[],
        api_resource: erase::<Provider>,
        adapter: adapt::<Provider>,
    },
    ResourceDescriptor {
        kind: FluxResourceKind::Receiver,
        command: "receiver",
        plural: "receivers",
        aliases: &[],
        status_columns: &[],
        api_resource: erase::<Receiver>,
        adapter: adapt::<Receiver>,
    },
];

/// Descriptor of a kind. Every kind has exactly one entry.
pub fn descriptor_for(kind: FluxResourceKind) -> &'static ResourceDescriptor {
    RESOURCE_REGISTRY
        .iter()
        .find(|d| d.kind == kind)
        .unwrap_or_else(|| unreachable!("{kind} is missing from RESOURCE_REGISTRY"))
}

/// Resolve a command name or alias (case-insensitive)
pub fn find_descriptor(name: &str) -> Option<&'static ResourceDescriptor> {
    RESOURCE_REGISTRY.iter().find(|d| d.matches(name))
}

/// Kind name with every command name and alias that reaches it, in registry
/// order
pub fn get_all_commands() -> Vec<(&'static str, Vec<&'static str>)> {
    RESOURCE_REGISTRY
        .iter()
        .map(|d| (d.kind.as_str(), d.names().collect()))
        .collect()
}
