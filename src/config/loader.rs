//! Configuration loading
//!
//! Precedence (highest to lowest): command-line flags (applied by the
//! caller), environment variables, the config file, built-in defaults.

use std::path::Path;

use anyhow::{Context, Result};

use super::{defaults, paths, schema::Config};

pub const ENV_NAMESPACE: &str = "FLUXCTL_NAMESPACE";
pub const ENV_TIMEOUT: &str = "FLUXCTL_TIMEOUT";
pub const ENV_CONTEXT: &str = "FLUXCTL_CONTEXT";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the root config file (if any) with environment overrides applied
    pub fn load() -> Result<Config> {
        let path = paths::root_config_path();
        let config = Self::load_path(&path)?;
        Self::check(&config).with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(Self::apply_env_overrides(config))
    }

    /// Load a config file, falling back to defaults when it does not exist
    pub fn load_path(path: &Path) -> Result<Config> {
        if path.exists() {
            Self::load_file(path)
        } else {
            Ok(Self::load_defaults())
        }
    }

    /// Load configuration from a file that must exist
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Strict validation of a config file: YAML syntax, unknown keys, value
    /// types and ranges
    pub fn validate(path: &Path) -> Result<()> {
        let config = Self::load_path(path)?;
        Self::check(&config).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Range checks serde cannot express
    pub fn check(config: &Config) -> Result<()> {
        if config.default_namespace.trim().is_empty() {
            anyhow::bail!("defaultNamespace must not be empty");
        }
        if config.timeout_seconds == 0 {
            anyhow::bail!("timeoutSeconds must be greater than zero");
        }
        if config.timeout_seconds > defaults::MAX_TIMEOUT_SECONDS {
            anyhow::bail!(
                "timeoutSeconds must be at most {}",
                defaults::MAX_TIMEOUT_SECONDS
            );
        }
        if config.context.as_deref().is_some_and(|c| c.trim().is_empty()) {
            anyhow::bail!("context must not be empty when set");
        }
        Ok(())
    }

    /// Apply FLUXCTL_* environment variable overrides
    pub fn apply_env_overrides(config: Config) -> Config {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
        if let Some(namespace) = lookup(ENV_NAMESPACE).filter(|v| !v.is_empty()) {
            config.default_namespace = namespace;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            match timeout.parse::<u64>() {
                Ok(seconds) if (1..=defaults::MAX_TIMEOUT_SECONDS).contains(&seconds) => {
                    config.timeout_seconds = seconds
                }
                _ => tracing::warn!("Ignoring invalid {}={:?}", ENV_TIMEOUT, timeout),
            }
        }

        if let Some(context) = lookup(ENV_CONTEXT).filter(|v| !v.is_empty()) {
            config.context = Some(context);
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}
