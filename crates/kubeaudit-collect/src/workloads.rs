use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::core::v1::PodTemplateSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use kubeaudit_k8s::ClusterApi;
use kubeaudit_types::{Image, Workload, WorkloadKind};

use crate::warning::{CollectWarning, Collected, error_message};

/// Namespaces audited when nothing else is configured
pub const DEFAULT_NAMESPACES: &[&str] = &[
    "kube-system",
    "monitoring",
    "logging",
    "backup",
    "claranet",
    "nginx-ingress",
];

/// Label holding the chart a workload was released from
pub const CHART_LABEL: &str = "chart";

/// Lists Deployments and StatefulSets across a fixed set of namespaces
pub struct WorkloadCollector {
    namespaces: Vec<String>,
}

impl WorkloadCollector {
    pub fn new(namespaces: Vec<String>) -> Self {
        Self { namespaces }
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    /// Collect every workload, namespace by namespace.
    ///
    /// Within a namespace Deployments come before StatefulSets, each in the
    /// order the API server returned them. A failed list counts as empty.
    pub async fn collect<C: ClusterApi>(&self, cluster: &C) -> Collected<Vec<Workload>> {
        let mut apps = Vec::new();
        let mut warnings = Vec::new();

        for namespace in &self.namespaces {
            match cluster.list_deployments(namespace).await {
                Ok(items) => apps.extend(
                    items
                        .into_iter()
                        .map(|d| deployment_to_workload(d, namespace)),
                ),
                Err(e) => warnings.push(list_failed(WorkloadKind::Deployment, namespace, &e)),
            }

            match cluster.list_stateful_sets(namespace).await {
                Ok(items) => apps.extend(
                    items
                        .into_iter()
                        .map(|s| stateful_set_to_workload(s, namespace)),
                ),
                Err(e) => warnings.push(list_failed(WorkloadKind::StatefulSet, namespace, &e)),
            }
        }

        tracing::debug!(
            namespaces = self.namespaces.len(),
            workloads = apps.len(),
            "collected workloads"
        );

        Collected::new(apps, warnings)
    }
}

fn list_failed(kind: WorkloadKind, namespace: &str, err: &anyhow::Error) -> CollectWarning {
    let message = error_message(err);
    tracing::warn!(%namespace, %kind, error = %message, "skipping workloads");
    CollectWarning::ListWorkloads {
        kind,
        namespace: namespace.to_string(),
        message,
    }
}

fn deployment_to_workload(deploy: Deployment, namespace: &str) -> Workload {
    let (replicas, template) = deploy
        .spec
        .map(|spec| (spec.replicas, Some(spec.template)))
        .unwrap_or_default();

    build_workload(deploy.metadata, namespace, replicas, template)
}

fn stateful_set_to_workload(sts: StatefulSet, namespace: &str) -> Workload {
    let (replicas, template) = sts
        .spec
        .map(|spec| (spec.replicas, Some(spec.template)))
        .unwrap_or_default();

    build_workload(sts.metadata, namespace, replicas, template)
}

fn build_workload(
    metadata: ObjectMeta,
    namespace: &str,
    replicas: Option<i32>,
    template: Option<PodTemplateSpec>,
) -> Workload {
    let chart = metadata
        .labels
        .and_then(|mut labels| labels.remove(CHART_LABEL))
        .filter(|c| !c.is_empty());

    let images = template
        .and_then(|t| t.spec)
        .map(|spec| {
            spec.containers
                .into_iter()
                .map(|c| Image::new(c.name, c.image.unwrap_or_default()))
                .collect()
        })
        .unwrap_or_default();

    Workload {
        name: metadata.name.unwrap_or_default(),
        namespace: namespace.to_string(),
        replica: replicas.unwrap_or(0),
        chart,
        images,
    }
}
