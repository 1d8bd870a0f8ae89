//! Cache backend abstraction.
//!
//! The trait is minimal and maps directly to what script filters need: fetch fresh
//! bytes for a key, or store new bytes under it. Freshness policy belongs to the
//! implementation.

use crate::domain::error::Result;

/// Byte-oriented key/value cache.
///
/// # Implementations
///
/// - [`crate::storage::FileCache`]: one file per key, fresh while younger than a TTL
///
/// # Examples
///
/// ```no_run
/// use scriptfilter::storage::{Cache, FileCache};
/// use std::time::Duration;
///
/// let cache = FileCache::new("/tmp/scriptfilter-cache", Duration::from_secs(600));
/// if cache.get("listing")?.is_none() {
///     cache.put("listing", b"{\"items\": []}")?;
/// }
/// # Ok::<(), scriptfilter::ScriptFilterError>(())
/// ```
pub trait Cache {
    /// Returns the stored bytes for `key` if present and still fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;
}
