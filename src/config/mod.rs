//! Configuration for fluxctl
//!
//! A single YAML file holding the defaults for namespace, timeout and kube
//! context, with environment variable overrides on top.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use defaults::{DEFAULT_NAMESPACE, DEFAULT_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS};
pub use loader::ConfigLoader;
pub use schema::Config;

/// Configuration keys accepted by `config get` and `config set`
pub const CONFIG_KEYS: &[&str] = &["defaultNamespace", "timeoutSeconds", "context"];

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unknown configuration key: {} (expected one of {})",
        key,
        CONFIG_KEYS.join(", ")
    )
}

/// Get a configuration value by key
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "defaultNamespace" => Ok(config.default_namespace.clone()),
        "timeoutSeconds" => Ok(config.timeout_seconds.to_string()),
        "context" => Ok(config.context.clone().unwrap_or_default()),
        _ => Err(unknown_key(key)),
    }
}

/// Set a configuration value by key. An empty `context` clears it.
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "defaultNamespace" => {
            if value.trim().is_empty() {
                anyhow::bail!("defaultNamespace must not be empty");
            }
            config.default_namespace = value.to_string();
        }
        "timeoutSeconds" => {
            let seconds: u64 = value
                .parse()
                .context("timeoutSeconds must be a whole number of seconds")?;
            if seconds == 0 {
                anyhow::bail!("timeoutSeconds must be greater than zero");
            }
            if seconds > MAX_TIMEOUT_SECONDS {
                anyhow::bail!("timeoutSeconds must be at most {}", MAX_TIMEOUT_SECONDS);
            }
            config.timeout_seconds = seconds;
        }
        "context" => {
            config.context = (!value.is_empty()).then(|| value.to_string());
        }
        _ => return Err(unknown_key(key)),
    }

    Ok(())
}
