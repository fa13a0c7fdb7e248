//! Kubernetes client bootstrap
//!
//! Supports HTTP/HTTPS proxy configuration via the standard environment
//! variables (`HTTP_PROXY`, `HTTPS_PROXY`, `NO_PROXY`) through kube's
//! `http-proxy` and `socks5` features.

use anyhow::{Context, Result};
use kube::config::KubeConfigOptions;
use kube::{Client, Config};

/// Build a client for the API server
///
/// Without a context, uses the default loading strategy:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
///
/// With a context, loads that context from the kubeconfig.
pub async fn create_client(context: Option<&str>) -> Result<Client> {
    let config = match kubeconfig_options(context) {
        Some(options) => {
            let name = options.context.clone().unwrap_or_default();
            Config::from_kubeconfig(&options)
                .await
                .with_context(|| format!("Failed to load kubeconfig context '{}'", name))?
        }
        None => Config::infer()
            .await
            .context("Failed to infer Kubernetes configuration")?,
    };

    tracing::debug!("Connecting to {}", config.cluster_url);

    Client::try_from(config).context("Failed to create Kubernetes client")
}

/// Kubeconfig selection for an explicit context
fn kubeconfig_options(context: Option<&str>) -> Option<KubeConfigOptions> {
    context
        .filter(|c| !c.is_empty())
        .map(|c| KubeConfigOptions {
            context: Some(c.to_string()),
            ..Default::default()
        })
}
