mod config;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use kubeaudit_collect::{InfraCollector, WorkloadCollector};
use kubeaudit_k8s::{KubeClient, resolve_kubeconfig_path};
use kubeaudit_types::AuditReport;

use crate::config::AuditConfig;

/// Kubeaudit - Print a JSON snapshot of Kubernetes workloads and cluster infrastructure
#[derive(Parser, Debug)]
#[command(name = "kubeaudit")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the kubeconfig file (defaults to ~/.kube/config)
    #[arg(long, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,

    /// Namespace to audit (repeatable or comma-separated, overrides the config file)
    #[arg(short = 'n', long = "namespace", value_name = "NAMESPACE", value_delimiter = ',')]
    namespaces: Vec<String>,

    /// TOML file listing the namespaces to audit
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr, stdout only carries the report
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&std::env::var("RUST_LOG").unwrap_or_default()))
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` directives, falling back to `warn` when none are given
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

async fn run(args: Args) -> Result<()> {
    let file_config = args
        .config
        .as_deref()
        .map(AuditConfig::load)
        .transpose()?;
    let config = AuditConfig::resolve(args.namespaces, file_config);

    let kubeconfig = resolve_kubeconfig_path(args.kubeconfig);
    let client = KubeClient::connect(kubeconfig.as_deref()).await?;

    let workloads = WorkloadCollector::new(config.namespaces);
    tracing::debug!(namespaces = ?workloads.namespaces(), "auditing namespaces");

    let apps = workloads.collect(&client).await;
    let infra = InfraCollector::new().collect(&client).await;
    let warnings = apps.warnings.len() + infra.warnings.len();

    let report = AuditReport::new(apps.value, infra.value);
    let json = serde_json::to_string(&report).context("Failed to serialize report")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json).context("Failed to write report")?;

    tracing::info!(
        workloads = report.apps.len(),
        platform = %report.infra.platform,
        warnings,
        "audit complete"
    );

    Ok(())
}
