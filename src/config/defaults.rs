//! Default configuration values

use super::schema::Config;

pub const DEFAULT_NAMESPACE: &str = "flux-system";

/// Five minutes, the same default `flux` uses
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 300;

/// Upper bound for any invocation timeout: one day
pub const MAX_TIMEOUT_SECONDS: u64 = 24 * 60 * 60;

/// Get the default configuration
pub fn default_config() -> Config {
    Config::default()
}
