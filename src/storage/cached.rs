//! Memoizing result documents in a [`Cache`].
//!
//! The cached bytes are the launcher-facing encoding of the document, so a hit
//! returns rows that are already filtered and sorted.

use crate::codec;
use crate::domain::error::ScriptFilterError;
use crate::domain::Items;
use crate::storage::backend::Cache;

/// Returns the cached document for `key`, or computes and stores it.
///
/// A cache entry that no longer decodes is treated as a miss and overwritten.
///
/// # Errors
///
/// Returns the error from `compute`, or a cache read/write failure converted into
/// the caller's error type.
///
/// # Examples
///
/// ```no_run
/// use scriptfilter::storage::{cached_items, FileCache};
/// use scriptfilter::{Item, Items};
/// use std::time::Duration;
///
/// let cache = FileCache::new("/tmp/scriptfilter-cache", Duration::from_secs(300));
/// let items = cached_items(&cache, "repos", || -> anyhow::Result<Items> {
///     Ok(Items::new(vec![Item::new("scriptfilter")]))
/// })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cached_items<C, F, E>(cache: &C, key: &str, compute: F) -> Result<Items, E>
where
    C: Cache + ?Sized,
    F: FnOnce() -> Result<Items, E>,
    E: From<ScriptFilterError>,
{
    if let Some(bytes) = cache.get(key)? {
        match codec::from_slice(&bytes) {
            Ok(items) => {
                tracing::debug!(key = %key, item_count = items.items.len(), "using cached items");
                return Ok(items);
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "discarding malformed cache entry");
            }
        }
    }

    let items = compute()?;
    cache.put(key, &codec::to_vec(&items)?)?;
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Item;
    use crate::storage::FileCache;
    use std::cell::Cell;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn computes_once_while_fresh() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path(), Duration::from_secs(60));
        let calls = Cell::new(0);

        for _ in 0..3 {
            let items = cached_items(&cache, "k", || -> Result<Items, ScriptFilterError> {
                calls.set(calls.get() + 1);
                Ok(Items::new(vec![Item::new("row")]))
            })
            .unwrap();
            assert_eq!(items.items[0].title, "row");
        }

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn stores_the_rendered_projection() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path(), Duration::from_secs(60));
        let compute = || -> Result<Items, ScriptFilterError> {
            Ok(Items::new(vec![Item::new("b"), Item::new("a"), Item::new("x").hide_when(true)])
                .enable_sorting_by_title())
        };

        cached_items(&cache, "k", compute).unwrap();
        let hit = cached_items(&cache, "k", compute).unwrap();
        let titles: Vec<&str> = hit.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["a", "b"]);
    }

    #[test]
    fn malformed_entry_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path(), Duration::from_secs(60));
        cache.put("k", b"{\"not\": \"a document\"}").unwrap();

        let items = cached_items(&cache, "k", || -> anyhow::Result<Items> {
            Ok(Items::new(vec![Item::new("fresh")]))
        })
        .unwrap();
        assert_eq!(items.items[0].title, "fresh");
        assert!(codec::from_slice(&cache.get("k").unwrap().unwrap()).is_ok());
    }

    #[test]
    fn compute_errors_are_not_cached() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path(), Duration::from_secs(60));
        let result = cached_items(&cache, "k", || -> anyhow::Result<Items> {
            Err(anyhow::anyhow!("upstream down"))
        });
        assert!(result.is_err());
        assert!(cache.get("k").unwrap().is_none());
    }
}
