//! Collectors for kubeaudit
//!
//! This crate turns raw Kubernetes objects into audit records. Failed API
//! calls never abort a collection: they are logged and returned alongside the
//! result as [`CollectWarning`]s.

mod infra;
mod platform;
mod warning;
mod workloads;

#[cfg(test)]
mod fake;

pub use infra::{InfraCollector, REGION_LABEL};
pub use platform::infer_platform;
pub use warning::{CollectWarning, Collected};
pub use workloads::{CHART_LABEL, DEFAULT_NAMESPACES, WorkloadCollector};

// Re-export types used in our public API
pub use kubeaudit_types::{Image, Infrastructure, NodeCounts, Platform, Workload, WorkloadKind};
