//! Path helpers for the launcher's workflow directories.
//!
//! The launcher normally exports the cache and data directories to the script.
//! When it does not (e.g. when a script is run by hand), the conventional
//! per-bundle locations under the platform cache and data roots are used instead.

use std::path::PathBuf;

/// Directory under the platform cache root the launcher keeps workflow caches in.
const LAUNCHER_CACHE_ROOT: &str = "com.runningwithcrayons.Alfred/Workflow Data";

/// Directory under the platform data root for persistent workflow data.
const LAUNCHER_DATA_ROOT: &str = "Alfred/Workflow Data";

/// Fallback directory name used when no bundle id is known.
const FALLBACK_DIR_NAME: &str = "scriptfilter";

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading tilde, or when no home directory is known, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use scriptfilter::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    match (path, dirs::home_dir()) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

/// Conventional cache directory for a workflow bundle
/// (`~/Library/Caches/com.runningwithcrayons.Alfred/Workflow Data/<bundle>` on macOS).
#[must_use]
pub fn default_cache_dir(bundle_id: Option<&str>) -> PathBuf {
    default_dir(dirs::cache_dir(), LAUNCHER_CACHE_ROOT, bundle_id)
}

/// Conventional data directory for a workflow bundle
/// (`~/Library/Application Support/Alfred/Workflow Data/<bundle>` on macOS).
#[must_use]
pub fn default_data_dir(bundle_id: Option<&str>) -> PathBuf {
    default_dir(dirs::data_dir(), LAUNCHER_DATA_ROOT, bundle_id)
}

fn default_dir(base: Option<PathBuf>, root: &str, bundle_id: Option<&str>) -> PathBuf {
    match (base, bundle_id) {
        (Some(base), Some(bundle_id)) => base.join(root).join(bundle_id),
        _ => std::env::temp_dir().join(bundle_id.unwrap_or(FALLBACK_DIR_NAME)),
    }
}
