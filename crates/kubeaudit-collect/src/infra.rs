use k8s_openapi::api::core::v1::Node;

use kubeaudit_k8s::{ClusterApi, ROLE_MASTER_SELECTOR, ROLE_NODE_SELECTOR};
use kubeaudit_types::{Infrastructure, NodeCounts, Platform};

use crate::platform::infer_platform;
use crate::warning::{CollectWarning, Collected, error_message};

/// Node label carrying the cloud region
pub const REGION_LABEL: &str = "failure-domain.beta.kubernetes.io/region";

/// Gathers cluster-wide facts: version, platform, region and node counts
///
/// Platform and region are read from a single node, the first one the API
/// server lists. Mixed clusters are reported as whatever that node looks like.
#[derive(Default)]
pub struct InfraCollector;

impl InfraCollector {
    pub fn new() -> Self {
        Self
    }

    pub async fn collect<C: ClusterApi>(&self, cluster: &C) -> Collected<Infrastructure> {
        let mut warnings = Vec::new();

        let version = match cluster.server_version().await {
            Ok(version) => version,
            Err(e) => {
                let message = error_message(&e);
                tracing::warn!(error = %message, "failed to get server version");
                warnings.push(CollectWarning::ServerVersion { message });
                String::new()
            }
        };

        let nodes = list_nodes(cluster, None, &mut warnings).await;
        let total = nodes.len();

        let Some(first) = nodes.into_iter().next() else {
            tracing::debug!("no nodes listed, platform unknown");
            let infra = Infrastructure {
                version,
                ..Default::default()
            };
            return Collected::new(infra, warnings);
        };

        let hostname = first.metadata.name.clone().unwrap_or_default();
        let node = match cluster.get_node(&hostname).await {
            Ok(node) => node,
            Err(e) => {
                let message = error_message(&e);
                tracing::warn!(
                    node = %hostname,
                    error = %message,
                    "failed to get node, using listed object"
                );
                warnings.push(CollectWarning::GetNode {
                    name: hostname.clone(),
                    message,
                });
                first
            }
        };

        let region = node_label(&node, REGION_LABEL);
        let platform = infer_platform(&hostname, &version);

        let (master, worker) = match platform {
            // GKE control plane nodes are never registered
            Platform::Gke => (0, total),
            Platform::Aws | Platform::Unknown => {
                let master = list_nodes(cluster, Some(ROLE_MASTER_SELECTOR), &mut warnings)
                    .await
                    .len();
                let worker = list_nodes(cluster, Some(ROLE_NODE_SELECTOR), &mut warnings)
                    .await
                    .len();
                (master, worker)
            }
        };

        tracing::debug!(
            %platform,
            %hostname,
            total,
            master,
            worker,
            "collected infrastructure"
        );

        let infra = Infrastructure {
            version,
            platform,
            region,
            nodes: NodeCounts {
                total,
                master,
                worker,
            },
        };

        Collected::new(infra, warnings)
    }
}

/// List nodes, counting a failure as an empty list
async fn list_nodes<C: ClusterApi>(
    cluster: &C,
    selector: Option<&str>,
    warnings: &mut Vec<CollectWarning>,
) -> Vec<Node> {
    match cluster.list_nodes(selector).await {
        Ok(nodes) => nodes,
        Err(e) => {
            let message = error_message(&e);
            tracing::warn!(
                selector = selector.unwrap_or(""),
                error = %message,
                "failed to list nodes"
            );
            warnings.push(CollectWarning::ListNodes {
                selector: selector.map(str::to_string),
                message,
            });
            Vec::new()
        }
    }
}

fn node_label(node: &Node, key: &str) -> Option<String> {
    node.metadata
        .labels
        .as_ref()
        .and_then(|labels| labels.get(key))
        .filter(|v| !v.is_empty())
        .cloned()
}
