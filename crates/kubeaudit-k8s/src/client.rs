//! Connection bootstrap and the kube-backed [`ClusterApi`]

use std::path::Path;

use anyhow::{Context, Result};
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::core::v1::Node;
use kube::Api;
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};

use crate::api::ClusterApi;

/// Kubernetes client wrapper
pub struct KubeClient {
    client: kube::Client,
}

impl KubeClient {
    /// Build a client from a kubeconfig file, using its current context.
    ///
    /// Without a path (no home directory to derive one from) the config is
    /// inferred from `KUBECONFIG` or the in-cluster service account.
    pub async fn connect(kubeconfig_path: Option<&Path>) -> Result<Self> {
        let config = match kubeconfig_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading kubeconfig");
                let kubeconfig = Kubeconfig::read_from(path).context(format!(
                    "Failed to read kubeconfig: {}",
                    path.display()
                ))?;

                kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                    .await
                    .context(format!(
                        "Failed to create config from kubeconfig: {}",
                        path.display()
                    ))?
            }
            None => kube::Config::infer()
                .await
                .context("Failed to infer kubernetes config. Is kubectl configured?")?,
        };

        tracing::debug!(cluster_url = %config.cluster_url, "connecting to cluster");

        let client = kube::Client::try_from(config).context("Failed to create client")?;

        Ok(Self { client })
    }
}

impl ClusterApi for KubeClient {
    async fn list_deployments(&self, namespace: &str) -> Result<Vec<Deployment>> {
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let list = deployments
            .list(&ListParams::default())
            .await
            .context(format!("Failed to list deployments in {}", namespace))?;

        Ok(list.items)
    }

    async fn list_stateful_sets(&self, namespace: &str) -> Result<Vec<StatefulSet>> {
        let stateful_sets: Api<StatefulSet> = Api::namespaced(self.client.clone(), namespace);
        let list = stateful_sets
            .list(&ListParams::default())
            .await
            .context(format!("Failed to list statefulsets in {}", namespace))?;

        Ok(list.items)
    }

    async fn server_version(&self) -> Result<String> {
        let info = self
            .client
            .apiserver_version()
            .await
            .context("Failed to get server version")?;

        Ok(info.git_version)
    }

    async fn list_nodes(&self, selector: Option<&str>) -> Result<Vec<Node>> {
        let nodes: Api<Node> = Api::all(self.client.clone());
        let params = match selector {
            Some(selector) => ListParams::default().labels(selector),
            None => ListParams::default(),
        };

        let list = nodes.list(&params).await.context(match selector {
            Some(selector) => format!("Failed to list nodes matching {}", selector),
            None => "Failed to list nodes".to_string(),
        })?;

        Ok(list.items)
    }

    async fn get_node(&self, name: &str) -> Result<Node> {
        let nodes: Api<Node> = Api::all(self.client.clone());
        nodes
            .get(name)
            .await
            .context(format!("Failed to get node '{}'", name))
    }
}
