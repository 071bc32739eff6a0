//! Shared types for kubeaudit
//!
//! This crate contains the records that make up an audit report. They are
//! built once per run and serialized as a single JSON document.

use serde::{Deserialize, Serialize};

// ============================================================================
// Workload Types
// ============================================================================

/// One container of a workload's pod template
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub name: String,
    pub image: String,
}

impl Image {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }
}

/// A Deployment or StatefulSet found in an audited namespace
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub name: String,
    pub namespace: String,
    /// Desired replica count (0 when the spec leaves it unset)
    pub replica: i32,
    /// Value of the `chart` label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
    /// Containers in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
}

/// Kind of workload resource
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
}

impl WorkloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deployment => "deployment",
            Self::StatefulSet => "statefulset",
        }
    }
}

impl std::fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Infrastructure Types
// ============================================================================

/// Hosting platform guessed from node hostname and server version
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Aws,
    Gke,
    #[default]
    Unknown,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Gke => "gke",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeCounts {
    pub total: usize,
    pub master: usize,
    pub worker: usize,
}

/// Cluster-wide facts
///
/// `platform` and `region` come from the first node listed by the API server,
/// so they describe that node rather than the whole cluster.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Infrastructure {
    pub version: String,
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub nodes: NodeCounts,
}

// ============================================================================
// Report
// ============================================================================

/// The document written to stdout
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditReport {
    pub apps: Vec<Workload>,
    pub infra: Infrastructure,
}

impl AuditReport {
    pub fn new(apps: Vec<Workload>, infra: Infrastructure) -> Self {
        Self { apps, infra }
    }
}
