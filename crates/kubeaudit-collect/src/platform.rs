use std::sync::LazyLock;

use regex::Regex;

use kubeaudit_types::Platform;

/// EC2 private DNS names, e.g. `ip-10-0-1-23.us-east-1.compute.internal`
static AWS_HOSTNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+\.(.+)\.compute\.internal").expect("valid regex"));

/// GKE server versions, e.g. `v1.18.9-gke.1501`
static GKE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+-gke\..+").expect("valid regex"));

/// Guess the hosting platform from a node hostname and the server version.
///
/// The hostname check takes precedence over the version check.
pub fn infer_platform(hostname: &str, version: &str) -> Platform {
    if AWS_HOSTNAME.is_match(hostname) {
        Platform::Aws
    } else if GKE_VERSION.is_match(version) {
        Platform::Gke
    } else {
        Platform::Unknown
    }
}
