//! Resource registry tests
//!
//! Every kind must be reachable by its command names and must adapt a
//! well-formed object of its own kind.

mod common;

use std::collections::HashSet;

use common::Fixture;
use fluxctl::{find_descriptor, get_all_commands, FluxResourceKind, RESOURCE_REGISTRY};

#[test]
fn test_get_all_commands() {
    let commands = get_all_commands();
    assert_eq!(commands.len(), FluxResourceKind::all().len());

    let (_, names) = commands
        .iter()
        .find(|(kind, _)| *kind == "Kustomization")
        .expect("Kustomization should be in command registry");
    assert_eq!(names, &vec!["kustomization", "kustomizations", "ks"]);
}

#[test]
fn test_registry_order_groups_controllers() {
    let kinds: Vec<&str> = RESOURCE_REGISTRY.iter().map(|d| d.kind.as_str()).collect();
    assert_eq!(
        kinds,
        vec![
            "GitRepository",
            "OCIRepository",
            "HelmRepository",
            "Bucket",
            "HelmChart",
            "Kustomization",
            "HelmRelease",
            "ImageRepository",
            "ImageUpdateAutomation",
            "Alert",
            "Provider",
            "Receiver",
        ]
    );
}

#[test]
fn test_every_name_resolves_to_its_own_kind() {
    let mut seen = HashSet::new();
    for descriptor in RESOURCE_REGISTRY {
        for name in descriptor.names() {
            assert!(seen.insert(name), "'{}' registered twice", name);
            assert_eq!(
                find_descriptor(name).map(|d| d.kind),
                Some(descriptor.kind),
                "'{}' should resolve to {}",
                name,
                descriptor.kind
            );
            assert_eq!(
                find_descriptor(&name.to_uppercase()).map(|d| d.kind),
                Some(descriptor.kind)
            );
        }
    }
}

#[test]
fn test_api_resource_kind_matches_descriptor() {
    for descriptor in RESOURCE_REGISTRY {
        let api_resource = descriptor.api_resource();
        assert_eq!(api_resource.kind, descriptor.kind.as_str());
        assert_eq!(api_resource.plural, descriptor.plural);
        assert!(
            api_resource.group.ends_with(".toolkit.fluxcd.io"),
            "{} has unexpected group {}",
            descriptor.kind,
            api_resource.group
        );
    }
}

#[test]
fn test_every_descriptor_adapts_its_own_kind() {
    for descriptor in RESOURCE_REGISTRY {
        let obj = Fixture::new(descriptor.kind, "flux-system", "sample").build();
        let adapter = descriptor
            .adapt(obj)
            .unwrap_or_else(|e| panic!("{} fixture should adapt: {}", descriptor.kind, e));
        assert_eq!(adapter.kind(), descriptor.kind);
        assert_eq!(adapter.name(), "sample");
        assert_eq!(adapter.namespace(), "flux-system");
        assert_eq!(
            adapter.status_columns().len(),
            descriptor.status_columns.len(),
            "{} column count should match its header",
            descriptor.kind
        );
    }
}

#[test]
fn test_descriptor_rejects_other_kinds() {
    let kustomization = find_descriptor("ks").unwrap();
    let helm_release = Fixture::new(FluxResourceKind::HelmRelease, "flux-system", "podinfo")
        .build();
    let err = kustomization.adapt(helm_release).unwrap_err();
    assert!(matches!(err, fluxctl::FluxError::MalformedResource { .. }));
}

#[test]
fn test_unknown_names() {
    assert!(find_descriptor("deployment").is_none());
    assert!(find_descriptor("").is_none());
    assert!(find_descriptor("imagepolicy").is_none());
}
