//! Kubernetes client for kubeaudit
//!
//! This crate loads the kubeconfig, builds an authenticated client and
//! exposes the handful of read-only calls the collectors need through the
//! [`ClusterApi`] trait.

mod api;
mod client;
mod kubeconfig;

pub use api::{ClusterApi, ROLE_MASTER_SELECTOR, ROLE_NODE_SELECTOR};
pub use client::KubeClient;
pub use kubeconfig::{default_kubeconfig_path, resolve_kubeconfig_path};

// Re-export the resource types that appear in our public API
pub use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
pub use k8s_openapi::api::core::v1::Node;
