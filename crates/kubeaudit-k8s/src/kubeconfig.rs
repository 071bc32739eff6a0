use std::env;
use std::path::PathBuf;

/// Default kubeconfig location: `<home>/.kube/config`
///
/// `home` is tried first, then `userprofile` (Windows). Empty values count as
/// unset.
pub fn default_kubeconfig_path(home: Option<&str>, userprofile: Option<&str>) -> Option<PathBuf> {
    let home = home
        .filter(|h| !h.is_empty())
        .or_else(|| userprofile.filter(|h| !h.is_empty()))?;
    Some(PathBuf::from(home).join(".kube").join("config"))
}

/// Pick the kubeconfig to load: an explicit path wins over the default
/// derived from `HOME` / `USERPROFILE`.
pub fn resolve_kubeconfig_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        let home = env::var("HOME").ok();
        let userprofile = env::var("USERPROFILE").ok();
        default_kubeconfig_path(home.as_deref(), userprofile.as_deref())
    })
}
