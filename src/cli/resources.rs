//! Handlers for the resource verbs
//!
//! Tables go to `out`; notices, per-resource failures and progress go to
//! `err`. A command that did not fully succeed returns an error.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;

use super::{GlobalOptions, ResourceInvocation, Target};
use crate::commands::{
    BatchReport, Deadline, GetCommand, GetOutcome, Mutation, SuspendAction, SuspendCommand,
};
use crate::config::Config;
use crate::store::{ResourceStore, Scope};

/// Effective namespace, scope and timeout for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub namespace: String,
    pub all_namespaces: bool,
    pub timeout: Duration,
}

impl Settings {
    /// Flags win over config (which already carries env overrides)
    pub fn resolve(globals: &GlobalOptions, config: &Config) -> Self {
        Self {
            namespace: globals
                .namespace
                .clone()
                .unwrap_or_else(|| config.default_namespace.clone()),
            all_namespaces: globals.all_namespaces,
            timeout: globals
                .timeout
                .unwrap_or_else(|| Duration::from_secs(config.timeout_seconds)),
        }
    }

    pub fn scope(&self) -> Scope {
        Scope::from_flags(&self.namespace, self.all_namespaces)
    }
}

/// Run a resource verb against `store`, bounded by `deadline`
pub async fn execute(
    invocation: &ResourceInvocation,
    settings: &Settings,
    store: &dyn ResourceStore,
    deadline: &Deadline,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    match invocation {
        ResourceInvocation::Get {
            descriptor,
            no_header,
            selector,
        } => {
            let command = GetCommand::new(*descriptor, settings.scope()).with_selector(*selector);
            match command.run(store, deadline).await? {
                GetOutcome::Empty {
                    plural,
                    scope,
                    selector: None,
                } => {
                    writeln!(err, "✗ no {} found in {}", plural, scope)?;
                }
                GetOutcome::Empty {
                    plural,
                    scope,
                    selector: Some(selector),
                } => {
                    writeln!(err, "✗ no {} matching {} found in {}", plural, selector, scope)?;
                }
                GetOutcome::Table(table) => {
                    writeln!(out, "{}", table.render(*no_header))?;
                }
            }
        }
        ResourceInvocation::Suspend {
            descriptor,
            action,
            target,
        } => {
            let command = SuspendCommand::new(*descriptor, *action);
            match target {
                Target::Named(name) => {
                    writeln!(
                        err,
                        "► {} {} {} in {} namespace",
                        progressive(*action),
                        descriptor.command,
                        name,
                        settings.namespace
                    )?;
                    let mutation = command
                        .run(store, deadline, &settings.namespace, name)
                        .await?;
                    write_mutation(out, &mutation, *action)?;
                }
                Target::All => {
                    let report = command.run_all(store, deadline, &settings.scope()).await?;
                    write_batch(out, err, &report, *action)?;
                    if let Some(failure) = report.failure() {
                        return Err(failure.into());
                    }
                }
            }
        }
    }

    Ok(())
}

fn progressive(action: SuspendAction) -> &'static str {
    match action {
        SuspendAction::Suspend => "suspending",
        SuspendAction::Resume => "resuming",
    }
}

fn write_mutation(out: &mut impl Write, mutation: &Mutation, action: SuspendAction) -> Result<()> {
    if mutation.changed {
        writeln!(out, "✔ {} {}", mutation.resource, action.past_tense())?;
    } else {
        writeln!(
            out,
            "✔ {} {} (already {})",
            mutation.resource,
            action.past_tense(),
            action.past_tense()
        )?;
    }
    Ok(())
}

fn write_batch(
    out: &mut impl Write,
    err: &mut impl Write,
    report: &BatchReport,
    action: SuspendAction,
) -> Result<()> {
    if report.is_empty() {
        writeln!(err, "✗ no {} found in {}", report.plural, report.scope)?;
        return Ok(());
    }

    for mutation in &report.succeeded {
        write_mutation(out, mutation, action)?;
    }
    for (resource, error) in &report.failed {
        writeln!(err, "✗ {}: {}", resource, error)?;
    }
    for resource in &report.skipped {
        writeln!(err, "✗ {}: not attempted, deadline expired", resource)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_flags_override_config() {
        let config = Config {
            default_namespace: "apps".to_string(),
            timeout_seconds: 60,
            context: None,
        };

        let settings = Settings::resolve(&GlobalOptions::default(), &config);
        assert_eq!(settings.namespace, "apps");
        assert_eq!(settings.timeout, Duration::from_secs(60));
        assert_eq!(settings.scope(), Scope::Namespace("apps".to_string()));

        let globals = GlobalOptions {
            namespace: Some("infra".to_string()),
            all_namespaces: true,
            timeout: Some(Duration::from_secs(5)),
            ..GlobalOptions::default()
        };
        let settings = Settings::resolve(&globals, &config);
        assert_eq!(settings.namespace, "infra");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.scope(), Scope::AllNamespaces);
    }

    #[tokio::test]
    async fn test_oversized_config_timeout_does_not_overflow_deadline() {
        let config = Config {
            timeout_seconds: u64::MAX,
            ..Config::default()
        };
        let settings = Settings::resolve(&GlobalOptions::default(), &config);
        let deadline = Deadline::after(settings.timeout);
        assert!(deadline.remaining() > Duration::from_secs(3600));
    }
}
