//! File-per-key cache with modification-time freshness.
//!
//! Each key maps to one file in the cache directory. An entry is fresh while its
//! modification time is younger than the cache's TTL. Writes go to a temporary file
//! that is then renamed over the target, so readers never see a half-written entry.
//! There is no locking: concurrent writers to the same key race and the last rename
//! wins.

use crate::domain::error::{Result, ScriptFilterError};
use crate::storage::backend::Cache;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// TTL file cache.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
    ttl: Duration,
}

impl FileCache {
    /// Creates a cache rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    /// Same directory, different TTL.
    #[must_use]
    pub fn with_ttl(&self, ttl: Duration) -> Self {
        Self {
            dir: self.dir.clone(),
            ttl,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// File backing `key`.
    ///
    /// Characters outside `[A-Za-z0-9._-]` are replaced with `_`, so keys cannot
    /// escape the cache directory.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let name = if name.is_empty() || name.chars().all(|c| c == '.') {
            format!("_{name}")
        } else {
            name
        };
        self.dir.join(name)
    }

    /// Whether the entry at `path` was modified less than `ttl` ago.
    fn is_fresh(&self, path: &Path) -> Result<bool> {
        let modified = std::fs::metadata(path)?.modified()?;
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        Ok(age < self.ttl)
    }

    /// Removes the entry for `key` if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            tracing::debug!(path = ?path, "clearing cache entry");
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl Cache for FileCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let _span = tracing::debug_span!("file_cache_get", key = %key).entered();

        let path = self.path_for(key);
        if !path.exists() {
            tracing::debug!("cache miss");
            return Ok(None);
        }

        if !self.is_fresh(&path)? {
            tracing::debug!(ttl_secs = self.ttl.as_secs(), "cache entry stale");
            return Ok(None);
        }

        let bytes = std::fs::read(&path)?;
        tracing::debug!(bytes = bytes.len(), "cache hit");
        Ok(Some(bytes))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let _span = tracing::debug_span!("file_cache_put", key = %key, bytes = value.len()).entered();

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ScriptFilterError::Cache(format!("failed to create {}: {e}", self.dir.display()))
        })?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension(format!("tmp.{}", std::process::id()));

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, value)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!("cache entry stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn put_then_get() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path(), Duration::from_secs(60));
        cache.put("key", b"value").unwrap();
        assert_eq!(cache.get("key").unwrap().as_deref(), Some(&b"value"[..]));
    }

    #[test]
    fn missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path(), Duration::from_secs(60));
        assert!(cache.get("absent").unwrap().is_none());
    }

    #[test]
    fn zero_ttl_is_always_stale() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path(), Duration::ZERO);
        cache.put("key", b"value").unwrap();
        assert!(cache.get("key").unwrap().is_none());
        let longer = cache.with_ttl(Duration::from_secs(60));
        assert!(longer.get("key").unwrap().is_some());
    }

    #[test]
    fn directory_is_created_on_write() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let cache = FileCache::new(&nested, Duration::from_secs(60));
        cache.put("key", b"v").unwrap();
        assert!(nested.join("key").exists());
    }

    #[test]
    fn later_write_wins() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path(), Duration::from_secs(60));
        cache.put("key", b"first").unwrap();
        cache.put("key", b"second").unwrap();
        assert_eq!(cache.get("key").unwrap().as_deref(), Some(&b"second"[..]));
    }

    #[test]
    fn keys_cannot_escape_directory() {
        let cache = FileCache::new("/cache", Duration::from_secs(1));
        assert_eq!(cache.path_for("../etc/passwd"), PathBuf::from("/cache/.._etc_passwd"));
        assert_eq!(cache.path_for(".."), PathBuf::from("/cache/_.."));
        assert_eq!(cache.path_for(""), PathBuf::from("/cache/_"));
    }

    #[test]
    fn clear_removes_entry() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path(), Duration::from_secs(60));
        cache.put("key", b"v").unwrap();
        cache.clear("key").unwrap();
        assert!(cache.get("key").unwrap().is_none());
        cache.clear("key").unwrap();
    }
}
