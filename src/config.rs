//! Audit configuration
//!
//! Namespaces come from, in order of precedence: `--namespace` flags, the
//! `--config` TOML file, then the built-in default list.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use kubeaudit_collect::DEFAULT_NAMESPACES;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Namespaces to audit, in output order
    #[serde(default = "default_namespaces")]
    pub namespaces: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            namespaces: default_namespaces(),
        }
    }
}

fn default_namespaces() -> Vec<String> {
    DEFAULT_NAMESPACES.iter().map(|s| s.to_string()).collect()
}

impl AuditConfig {
    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .context(format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config.normalized())
    }

    /// Apply precedence: CLI namespaces, then the file, then defaults
    pub fn resolve(cli_namespaces: Vec<String>, file: Option<AuditConfig>) -> Self {
        let cli = Self {
            namespaces: cli_namespaces,
        }
        .normalized();
        if !cli.namespaces.is_empty() {
            return cli;
        }
        match file {
            Some(file) if file.namespaces.is_empty() => {
                tracing::warn!("config file lists no namespaces, using the defaults");
                Self::default()
            }
            Some(file) => file,
            None => Self::default(),
        }
    }

    fn normalized(self) -> Self {
        let namespaces = self
            .namespaces
            .into_iter()
            .map(|ns| ns.trim().to_string())
            .filter(|ns| !ns.is_empty())
            .collect();
        Self { namespaces }
    }
}
