use anyhow::Result;
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::core::v1::Node;

/// Label selector matching control-plane nodes
pub const ROLE_MASTER_SELECTOR: &str = "kubernetes.io/role=master";

/// Label selector matching worker nodes
pub const ROLE_NODE_SELECTOR: &str = "kubernetes.io/role=node";

/// Read-only view of the cluster used by the collectors
///
/// Every method maps to exactly one API request. Lists are not paginated,
/// so whatever the server returns for a single request is what gets audited.
#[allow(async_fn_in_trait)]
pub trait ClusterApi {
    /// List all Deployments in a namespace
    async fn list_deployments(&self, namespace: &str) -> Result<Vec<Deployment>>;

    /// List all StatefulSets in a namespace
    async fn list_stateful_sets(&self, namespace: &str) -> Result<Vec<StatefulSet>>;

    /// Git version reported by the API server (e.g. `v1.18.9-gke.1501`)
    async fn server_version(&self) -> Result<String>;

    /// List nodes, optionally filtered by a label selector
    async fn list_nodes(&self, selector: Option<&str>) -> Result<Vec<Node>>;

    /// Fetch a single node by name
    async fn get_node(&self, name: &str) -> Result<Node>;
}
