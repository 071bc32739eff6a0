//! In-memory cluster used by the collector tests

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use anyhow::{Result, anyhow};
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::core::v1::Node;
use kubeaudit_k8s::ClusterApi;
use serde_json::json;

/// Fake API server
///
/// Every request is recorded in `calls` as a short key (`deployments/<ns>`,
/// `statefulsets/<ns>`, `version`, `nodes`, `nodes?<selector>`,
/// `node/<name>`). Keys listed in `failing` return an error instead.
#[derive(Default)]
pub struct FakeCluster {
    pub deployments: HashMap<String, Vec<Deployment>>,
    pub stateful_sets: HashMap<String, Vec<StatefulSet>>,
    pub version: String,
    pub nodes: Vec<Node>,
    pub failing: HashSet<String>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_deployment(mut self, deployment: Deployment) -> Self {
        let ns = deployment.metadata.namespace.clone().unwrap_or_default();
        self.deployments.entry(ns).or_default().push(deployment);
        self
    }

    pub fn with_stateful_set(mut self, stateful_set: StatefulSet) -> Self {
        let ns = stateful_set.metadata.namespace.clone().unwrap_or_default();
        self.stateful_sets.entry(ns).or_default().push(stateful_set);
        self
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn failing(mut self, call: &str) -> Self {
        self.failing.insert(call.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.borrow_mut().push(call.clone());
        if self.failing.contains(&call) {
            return Err(anyhow!("injected failure for {}", call));
        }
        Ok(())
    }
}

impl ClusterApi for FakeCluster {
    async fn list_deployments(&self, namespace: &str) -> Result<Vec<Deployment>> {
        self.record(format!("deployments/{}", namespace))?;
        Ok(self.deployments.get(namespace).cloned().unwrap_or_default())
    }

    async fn list_stateful_sets(&self, namespace: &str) -> Result<Vec<StatefulSet>> {
        self.record(format!("statefulsets/{}", namespace))?;
        Ok(self
            .stateful_sets
            .get(namespace)
            .cloned()
            .unwrap_or_default())
    }

    async fn server_version(&self) -> Result<String> {
        self.record("version".to_string())?;
        Ok(self.version.clone())
    }

    async fn list_nodes(&self, selector: Option<&str>) -> Result<Vec<Node>> {
        let Some(selector) = selector else {
            self.record("nodes".to_string())?;
            return Ok(self.nodes.clone());
        };
        self.record(format!("nodes?{}", selector))?;

        let (key, value) = selector.split_once('=').unwrap_or((selector, ""));
        Ok(self
            .nodes
            .iter()
            .filter(|n| {
                n.metadata
                    .labels
                    .as_ref()
                    .and_then(|l| l.get(key))
                    .is_some_and(|v| v == value)
            })
            .cloned()
            .collect())
    }

    async fn get_node(&self, name: &str) -> Result<Node> {
        self.record(format!("node/{}", name))?;
        self.nodes
            .iter()
            .find(|n| n.metadata.name.as_deref() == Some(name))
            .cloned()
            .ok_or_else(|| anyhow!("node {} not found", name))
    }
}

/// Deployment fixture; `replicas: None` leaves `spec.replicas` unset
pub fn deployment(
    namespace: &str,
    name: &str,
    replicas: Option<i32>,
    labels: serde_json::Value,
    containers: &[(&str, &str)],
) -> Deployment {
    serde_json::from_value(workload_json(namespace, name, replicas, labels, containers))
        .expect("valid deployment fixture")
}

pub fn stateful_set(
    namespace: &str,
    name: &str,
    replicas: Option<i32>,
    labels: serde_json::Value,
    containers: &[(&str, &str)],
) -> StatefulSet {
    let mut value = workload_json(namespace, name, replicas, labels, containers);
    value["spec"]["serviceName"] = json!(name);
    serde_json::from_value(value).expect("valid statefulset fixture")
}

fn workload_json(
    namespace: &str,
    name: &str,
    replicas: Option<i32>,
    labels: serde_json::Value,
    containers: &[(&str, &str)],
) -> serde_json::Value {
    let containers: Vec<_> = containers
        .iter()
        .map(|(name, image)| json!({ "name": name, "image": image }))
        .collect();

    let mut spec = json!({
        "selector": { "matchLabels": { "app": name } },
        "template": {
            "metadata": { "labels": { "app": name } },
            "spec": { "containers": containers }
        }
    });
    if let Some(replicas) = replicas {
        spec["replicas"] = json!(replicas);
    }

    json!({
        "metadata": { "name": name, "namespace": namespace, "labels": labels },
        "spec": spec
    })
}

pub fn node(name: &str, labels: serde_json::Value) -> Node {
    serde_json::from_value(json!({
        "metadata": { "name": name, "labels": labels }
    }))
    .expect("valid node fixture")
}
