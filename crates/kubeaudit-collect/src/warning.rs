use thiserror::Error;

use kubeaudit_types::WorkloadKind;

/// A failed API call that the collectors skipped over
#[derive(Debug, Error)]
pub enum CollectWarning {
    #[error("failed to list {kind}s in namespace {namespace}: {message}")]
    ListWorkloads {
        kind: WorkloadKind,
        namespace: String,
        message: String,
    },

    #[error("failed to get server version: {message}")]
    ServerVersion { message: String },

    #[error("failed to list nodes{}: {message}", selector_suffix(.selector))]
    ListNodes {
        selector: Option<String>,
        message: String,
    },

    #[error("failed to get node {name}: {message}")]
    GetNode { name: String, message: String },
}

fn selector_suffix(selector: &Option<String>) -> String {
    selector
        .as_deref()
        .map(|s| format!(" matching {}", s))
        .unwrap_or_default()
}

/// Result of a collection pass plus whatever went wrong along the way
#[derive(Debug)]
pub struct Collected<T> {
    pub value: T,
    pub warnings: Vec<CollectWarning>,
}

impl<T> Collected<T> {
    pub fn new(value: T, warnings: Vec<CollectWarning>) -> Self {
        Self { value, warnings }
    }
}

/// Render an error with its full context chain on one line
pub(crate) fn error_message(err: &anyhow::Error) -> String {
    format!("{:#}", err)
}
