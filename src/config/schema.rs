//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde.

use serde::{Deserialize, Serialize};

use super::defaults::{DEFAULT_NAMESPACE, DEFAULT_TIMEOUT_SECONDS};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Namespace used when `-n` is not given
    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    /// Budget for one invocation's remote calls
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Kubeconfig context; the current context when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
            timeout_seconds: default_timeout_seconds(),
            context: None,
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}
