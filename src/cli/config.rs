//! `config` subcommand handlers

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;

use clap::builder::PossibleValuesParser;

use crate::config::{self, ConfigLoader, CONFIG_KEYS};

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key
        #[arg(value_parser = PossibleValuesParser::new(CONFIG_KEYS.iter().copied()))]
        key: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key
        #[arg(value_parser = PossibleValuesParser::new(CONFIG_KEYS.iter().copied()))]
        key: String,
        /// Configuration value; an empty context clears it
        value: String,
    },
    /// List all configuration
    List,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Handle configuration subcommands against the config file at `path`
pub fn handle_config_command(
    cmd: &ConfigSubcommand,
    path: &Path,
    out: &mut impl Write,
) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            // Effective values, including environment overrides
            let config = ConfigLoader::apply_env_overrides(
                ConfigLoader::load_path(path).context("Failed to load configuration")?,
            );

            if let Some(key) = key {
                let value = config::get_config_value(&config, key)?;
                writeln!(out, "{}", value)?;
            } else {
                let yaml =
                    serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
                write!(out, "{}", yaml)?;
            }
        }
        ConfigSubcommand::Set { key, value } => {
            let mut config =
                ConfigLoader::load_path(path).context("Failed to load configuration")?;

            config::set_config_value(&mut config, key, value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;

            ConfigLoader::save(&config, path).context("Failed to save configuration")?;
            writeln!(out, "Configuration saved")?;
        }
        ConfigSubcommand::List => {
            let config = ConfigLoader::apply_env_overrides(
                ConfigLoader::load_path(path).context("Failed to load configuration")?,
            );
            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            write!(out, "{}", yaml)?;
        }
        ConfigSubcommand::Path => {
            writeln!(out, "{}", path.display())?;
        }
        ConfigSubcommand::Validate => {
            ConfigLoader::validate(path).context("Configuration validation failed")?;
            writeln!(out, "Configuration is valid")?;
        }
    }

    Ok(())
}
