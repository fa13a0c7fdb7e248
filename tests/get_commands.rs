//! `get` command tests against the in-memory store

mod common;

use std::time::Duration;

use common::Fixture;
use fluxctl::cli::{self, Cli, Invocation, Settings};
use fluxctl::commands::{Deadline, GetCommand, GetOutcome, StatusSelector};
use fluxctl::{descriptor_for, ConditionStatus, FluxResourceKind, InMemoryStore, Scope};
use serde_json::json;

fn deadline() -> Deadline {
    Deadline::after(Duration::from_secs(5))
}

fn flux_system() -> Scope {
    Scope::Namespace("flux-system".to_string())
}

/// The two-Kustomization example: one ready, one never reconciled
fn example_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    Fixture::new(FluxResourceKind::Kustomization, "flux-system", "app-a")
        .ready("True", "Applied revision: v1.2.0")
        .status_field("lastAppliedRevision", json!("v1.2.0"))
        .suspended(false)
        .insert_into(&store);
    Fixture::new(FluxResourceKind::Kustomization, "flux-system", "app-b")
        .suspended(true)
        .insert_into(&store);
    store
}

async fn run_get(store: &InMemoryStore, kind: FluxResourceKind, scope: Scope) -> GetOutcome {
    GetCommand::new(descriptor_for(kind), scope)
        .run(store, &deadline())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_example_renders_expected_rows() {
    let store = example_store();
    let GetOutcome::Table(table) = run_get(&store, FluxResourceKind::Kustomization, flux_system()).await
    else {
        panic!("expected a table");
    };

    assert_eq!(table.header(), ["Name", "Ready", "Message", "Revision", "Suspended"]);
    assert_eq!(
        table.rows(),
        [
            vec!["app-a", "True", "Applied revision: v1.2.0", "v1.2.0", "False"],
            vec!["app-b", "False", "waiting to be reconciled", "", "True"],
        ]
    );
}

#[tokio::test]
async fn test_empty_scope_is_not_an_error() {
    let store = example_store();
    let outcome = run_get(
        &store,
        FluxResourceKind::Kustomization,
        Scope::Namespace("apps".to_string()),
    )
    .await;
    match outcome {
        GetOutcome::Empty {
            plural,
            scope,
            selector,
        } => {
            assert_eq!(plural, "kustomizations");
            assert_eq!(scope.to_string(), "apps namespace");
            assert!(selector.is_none());
        }
        GetOutcome::Table(table) => panic!("expected no table, got {:?}", table),
    }

    // Other kinds in the same namespace are not listed
    let outcome = run_get(&store, FluxResourceKind::HelmRelease, flux_system()).await;
    assert!(matches!(outcome, GetOutcome::Empty { .. }));
}

#[tokio::test]
async fn test_rows_follow_fetch_order() {
    let store = InMemoryStore::new();
    let names = ["zeta", "alpha", "mu", "beta"];
    for name in names {
        Fixture::new(FluxResourceKind::GitRepository, "flux-system", name)
            .ready("True", "stored artifact")
            .insert_into(&store);
    }

    let GetOutcome::Table(table) = run_get(&store, FluxResourceKind::GitRepository, flux_system()).await
    else {
        panic!("expected a table");
    };
    assert_eq!(table.len(), names.len());
    let rendered: Vec<&str> = table.rows().iter().map(|r| r[0].as_str()).collect();
    assert_eq!(rendered, names);
}

#[tokio::test]
async fn test_all_namespaces_adds_namespace_column() {
    let store = example_store();
    Fixture::new(FluxResourceKind::Kustomization, "apps", "podinfo")
        .ready("False", "kustomize build failed")
        .insert_into(&store);

    let GetOutcome::Table(table) =
        run_get(&store, FluxResourceKind::Kustomization, Scope::AllNamespaces).await
    else {
        panic!("expected a table");
    };
    assert_eq!(table.header()[0], "Namespace");
    assert_eq!(table.len(), 3);
    assert_eq!(table.rows()[2][..3], ["apps", "podinfo", "False"]);
}

#[tokio::test]
async fn test_status_selector_filters_rows() {
    let store = example_store();
    let descriptor = descriptor_for(FluxResourceKind::Kustomization);

    let outcome = GetCommand::new(descriptor, flux_system())
        .with_selector(Some(StatusSelector {
            ready: ConditionStatus::False,
        }))
        .run(&store, &deadline())
        .await
        .unwrap();
    let GetOutcome::Table(table) = outcome else {
        panic!("expected a table");
    };
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0][0], "app-b");

    let outcome = GetCommand::new(descriptor, flux_system())
        .with_selector(Some("ready=unknown".parse().unwrap()))
        .run(&store, &deadline())
        .await
        .unwrap();
    let GetOutcome::Empty { selector, .. } = outcome else {
        panic!("expected no table");
    };
    assert_eq!(selector.map(|s| s.ready), Some(ConditionStatus::Unknown));

    // Nothing listed at all: the selector played no part
    let outcome = GetCommand::new(descriptor, Scope::Namespace("apps".to_string()))
        .with_selector(Some("ready=unknown".parse().unwrap()))
        .run(&store, &deadline())
        .await
        .unwrap();
    assert!(matches!(outcome, GetOutcome::Empty { selector: None, .. }));
}

#[tokio::test]
async fn test_stalled_list_times_out() {
    let store = example_store();
    store.stall_lists();

    let err = GetCommand::new(descriptor_for(FluxResourceKind::Kustomization), flux_system())
        .run(&store, &Deadline::after(Duration::from_millis(50)))
        .await
        .unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(store.update_count(), 0);
}

#[tokio::test]
async fn test_malformed_object_fails_the_listing() {
    let store = example_store();
    let mut value = Fixture::new(FluxResourceKind::Kustomization, "flux-system", "broken").to_value();
    value["spec"].as_object_mut().unwrap().remove("interval");
    store.insert_object(
        FluxResourceKind::Kustomization,
        serde_json::from_value(value).unwrap(),
    );

    let err = GetCommand::new(descriptor_for(FluxResourceKind::Kustomization), flux_system())
        .run(&store, &deadline())
        .await
        .unwrap_err();
    assert!(matches!(err, fluxctl::FluxError::MalformedResource { .. }));
}

async fn run_cli(store: &InMemoryStore, args: &[&str]) -> (anyhow::Result<()>, String, String) {
    let cli = Cli::try_parse_from(std::iter::once("fluxctl").chain(args.iter().copied())).unwrap();
    let Invocation::Resource(resource) = &cli.invocation else {
        panic!("expected a resource verb");
    };
    let settings = Settings::resolve(&cli.globals, &fluxctl::config::Config::default());
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = cli::execute(
        resource,
        &settings,
        store,
        &Deadline::after(settings.timeout),
        &mut out,
        &mut err,
    )
    .await;
    (
        result,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[tokio::test]
async fn test_cli_get_prints_table_on_stdout() {
    let store = example_store();
    let (result, out, err) = run_cli(&store, &["get", "ks"]).await;
    result.unwrap();
    assert!(err.is_empty());

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Revision"));
    assert!(lines[1].contains("app-a") && lines[1].contains("v1.2.0"));
    assert!(lines[2].contains("waiting to be reconciled"));
}

#[tokio::test]
async fn test_cli_get_empty_prints_notice_on_stderr() {
    let store = example_store();
    let (result, out, err) = run_cli(&store, &["get", "hr", "-n", "apps"]).await;
    result.unwrap();
    assert!(out.is_empty());
    assert_eq!(err, "✗ no helmreleases found in apps namespace\n");

    let (result, _, err) = run_cli(&store, &["get", "alerts", "-A"]).await;
    result.unwrap();
    assert_eq!(err, "✗ no alerts found in any namespace\n");
}

#[tokio::test]
async fn test_cli_get_filtered_out_notice_names_selector() {
    let store = example_store();
    let (result, out, err) =
        run_cli(&store, &["get", "ks", "--status-selector", "ready=unknown"]).await;
    result.unwrap();
    assert!(out.is_empty());
    assert_eq!(
        err,
        "✗ no kustomizations matching ready=unknown found in flux-system namespace\n"
    );
}

#[tokio::test]
async fn test_cli_get_timeout_fails_command() {
    let store = example_store();
    store.stall_lists();
    let (result, out, _) = run_cli(&store, &["get", "ks", "--timeout", "50ms"]).await;
    let err = result.unwrap_err();
    assert!(err
        .downcast_ref::<fluxctl::FluxError>()
        .is_some_and(|e| e.is_timeout()));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_cli_get_no_header() {
    let store = example_store();
    let (result, out, _) = run_cli(&store, &["get", "kustomizations", "--no-header"]).await;
    result.unwrap();
    assert_eq!(out.lines().count(), 2);
    assert!(!out.contains("Suspended"));
}
