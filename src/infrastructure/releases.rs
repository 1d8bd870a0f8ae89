//! Release lookup for "new version available" checks.
//!
//! [`GithubReleases`] asks the GitHub API for the latest release tag. The
//! [`UpdateChecker`] memoizes that tag in a [`Cache`] so the network is hit at most
//! once per cache TTL (one day by default), and compares it against the running
//! workflow version.

use crate::domain::error::{Result, ScriptFilterError};
use crate::storage::{Cache, FileCache};
use serde::Deserialize;
use std::cmp::Ordering;
use std::path::PathBuf;
use std::time::Duration;

/// How long a fetched release tag is trusted.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

const GITHUB_API: &str = "https://api.github.com";
const CACHE_KEY: &str = "latest-release";

/// Where the latest release comes from.
pub trait ReleaseSource {
    /// Tag name of the latest release, e.g. `v1.4.0`.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptFilterError::Update`] if the lookup fails.
    fn latest_tag(&self) -> Result<String>;

    /// Page a user can open to download the release.
    fn release_url(&self) -> String;
}

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Latest release of a GitHub repository.
#[derive(Debug, Clone)]
pub struct GithubReleases {
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GithubReleases {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, token: Option<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    fn api_url(&self) -> String {
        format!(
            "{GITHUB_API}/repos/{}/{}/releases/latest",
            self.owner, self.repo
        )
    }
}

impl ReleaseSource for GithubReleases {
    fn latest_tag(&self) -> Result<String> {
        let url = self.api_url();
        tracing::debug!(url = %url, authenticated = self.token.is_some(), "fetching latest release");

        let mut request = ureq::get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", concat!("scriptfilter/", env!("CARGO_PKG_VERSION")));
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let release: LatestRelease = request
            .call()
            .map_err(|e| ScriptFilterError::Update(format!("request to {url} failed: {e}")))?
            .into_body()
            .read_json()
            .map_err(|e| ScriptFilterError::Update(format!("unexpected release payload: {e}")))?;

        tracing::debug!(tag = %release.tag_name, "latest release fetched");
        Ok(release.tag_name)
    }

    fn release_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/releases/latest",
            self.owner, self.repo
        )
    }
}

/// Compares the running version against the latest release.
pub struct UpdateChecker {
    source: Box<dyn ReleaseSource>,
    cache: Option<Box<dyn Cache>>,
}

impl UpdateChecker {
    /// Checker without memoization; every call queries `source`.
    pub fn new(source: impl ReleaseSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: None,
        }
    }

    /// GitHub checker memoized in `cache_dir` for `ttl`.
    pub fn github(
        owner: &str,
        repo: &str,
        token: Option<String>,
        cache_dir: impl Into<PathBuf>,
        ttl: Duration,
    ) -> Self {
        Self::new(GithubReleases::new(owner, repo, token)).with_cache(FileCache::new(cache_dir, ttl))
    }

    #[must_use]
    pub fn with_cache(self, cache: impl Cache + 'static) -> Self {
        Self {
            cache: Some(Box::new(cache)),
            ..self
        }
    }

    #[must_use]
    pub fn release_url(&self) -> String {
        self.source.release_url()
    }

    /// Latest release tag, from the cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is not cached and the lookup fails.
    pub fn latest_version(&self) -> Result<String> {
        if let Some(cache) = &self.cache {
            if let Some(bytes) = cache.get(CACHE_KEY)? {
                if let Ok(tag) = String::from_utf8(bytes) {
                    tracing::debug!(tag = %tag, "using cached release tag");
                    return Ok(tag);
                }
            }
        }

        let tag = self.source.latest_tag()?;
        if let Some(cache) = &self.cache {
            cache.put(CACHE_KEY, tag.as_bytes())?;
        }
        Ok(tag)
    }

    /// The latest release tag if it is newer than `current`.
    ///
    /// # Errors
    ///
    /// Returns an error if the latest version cannot be determined.
    pub fn newer_version(&self, current: &str) -> Result<Option<String>> {
        let latest = self.latest_version()?;
        Ok(is_newer(&latest, current).then_some(latest))
    }

    /// Whether a release newer than `current` exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the latest version cannot be determined.
    pub fn has_new_version(&self, current: &str) -> Result<bool> {
        self.newer_version(current).map(|v| v.is_some())
    }
}

impl std::fmt::Debug for UpdateChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateChecker")
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

/// Numeric components of a version string: `v1.2.3-beta` → `[1, 2, 3]`.
fn version_parts(version: &str) -> Vec<u64> {
    let version = version.trim().trim_start_matches(['v', 'V']);
    let version = version.split(['-', '+']).next().unwrap_or_default();
    version
        .split('.')
        .map(|part| {
            part.chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
                .parse()
                .unwrap_or(0)
        })
        .collect()
}

/// Whether `latest` is a strictly higher version than `current`.
///
/// Missing components count as zero, so `1.2` equals `1.2.0`.
///
/// # Examples
///
/// ```
/// use scriptfilter::infrastructure::is_newer;
///
/// assert!(is_newer("v1.10.0", "1.9.3"));
/// assert!(!is_newer("1.2", "1.2.0"));
/// ```
#[must_use]
pub fn is_newer(latest: &str, current: &str) -> bool {
    let latest = version_parts(latest);
    let current = version_parts(current);
    let len = latest.len().max(current.len());

    for i in 0..len {
        let l = latest.get(i).copied().unwrap_or(0);
        let c = current.get(i).copied().unwrap_or(0);
        match l.cmp(&c) {
            Ordering::Greater => return true,
            Ordering::Less => return false,
            Ordering::Equal => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct CountingSource {
        tag: &'static str,
        calls: Rc<Cell<u32>>,
    }

    impl ReleaseSource for CountingSource {
        fn latest_tag(&self) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.tag.to_string())
        }

        fn release_url(&self) -> String {
            "https://example.com".to_string()
        }
    }

    #[test]
    fn version_comparison() {
        assert!(is_newer("2.0.0", "1.9.9"));
        assert!(is_newer("v1.0.1", "v1.0.0"));
        assert!(is_newer("1.0.0.1", "1.0"));
        assert!(!is_newer("1.0.0", "1.0.0"));
        assert!(!is_newer("0.9", "1.0"));
        assert!(!is_newer("1.0.0-beta", "1.0.0"));
    }

    #[test]
    fn github_urls() {
        let source = GithubReleases::new("octo", "tool", Some(String::new()));
        assert_eq!(source.api_url(), "https://api.github.com/repos/octo/tool/releases/latest");
        assert_eq!(source.release_url(), "https://github.com/octo/tool/releases/latest");
        assert!(source.token.is_none());
    }

    #[test]
    fn cached_tag_avoids_second_lookup() {
        let dir = TempDir::new().unwrap();
        let calls = Rc::new(Cell::new(0));
        let checker = UpdateChecker::new(CountingSource {
            tag: "v2.0.0",
            calls: Rc::clone(&calls),
        })
        .with_cache(FileCache::new(dir.path(), DEFAULT_CHECK_INTERVAL));

        assert!(checker.has_new_version("1.0.0").unwrap());
        assert_eq!(checker.newer_version("1.5.0").unwrap().as_deref(), Some("v2.0.0"));
        assert!(!checker.has_new_version("2.0.0").unwrap());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn uncached_checker_queries_every_time() {
        let calls = Rc::new(Cell::new(0));
        let checker = UpdateChecker::new(CountingSource {
            tag: "1.0.0",
            calls: Rc::clone(&calls),
        });
        checker.latest_version().unwrap();
        checker.latest_version().unwrap();
        assert_eq!(calls.get(), 2);
    }
}
