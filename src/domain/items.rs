//! Result document model.
//!
//! [`Items`] wraps the ordered rows for one invocation together with the
//! document-level flags: title sorting, the "skip knowledge" flag, and the
//! launcher-side cache directive.

use super::error::{Result, ScriptFilterError};
use super::item::Item;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::time::Duration;

/// Shortest cache TTL the launcher accepts.
pub const MIN_CACHE_TTL: Duration = Duration::from_secs(5);

/// Longest cache TTL the launcher accepts (24 hours).
pub const MAX_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// The full result document for one invocation.
///
/// # Examples
///
/// ```
/// use scriptfilter::{Item, Items};
/// use std::time::Duration;
///
/// let items = Items::new(vec![Item::new("b"), Item::new("A")])
///     .enable_sorting_by_title()
///     .cache(Duration::from_secs(60))?
///     .enable_loose_reload();
///
/// let titles: Vec<&str> = items.rendered_items().map(|i| i.title.as_str()).collect();
/// assert_eq!(titles, ["A", "b"]);
/// assert_eq!(items.cache_ttl(), Some(Duration::from_secs(60)));
/// # Ok::<(), scriptfilter::ScriptFilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Items {
    pub items: Vec<Item>,
    /// Preserve caller order when true; sort by title case-insensitively when false.
    pub original_sort: bool,
    /// Tell the launcher not to reorder rows by its usage history.
    pub skip_knowledge: bool,
    cache_ttl: Option<Duration>,
    loose_reload: bool,
}

impl Default for Items {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Items {
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            original_sort: true,
            skip_knowledge: true,
            cache_ttl: None,
            loose_reload: false,
        }
    }

    /// Sorts rows by title (case-insensitive) at render time.
    #[must_use]
    pub fn enable_sorting_by_title(self) -> Self {
        Self {
            original_sort: false,
            ..self
        }
    }

    #[must_use]
    pub fn skip_knowledge(self, skip: bool) -> Self {
        Self {
            skip_knowledge: skip,
            ..self
        }
    }

    /// Asks the launcher to cache this document for `ttl`.
    ///
    /// Resets loose reload to off.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptFilterError::InvalidArgument`] when `ttl` lies outside
    /// [`MIN_CACHE_TTL`]`..=`[`MAX_CACHE_TTL`] or is not a whole number of seconds
    /// (the launcher only understands seconds).
    pub fn cache(self, ttl: Duration) -> Result<Self> {
        if ttl.subsec_nanos() != 0 {
            return Err(ScriptFilterError::InvalidArgument(format!(
                "cache ttl must be whole seconds, got {ttl:?}"
            )));
        }
        if !(MIN_CACHE_TTL..=MAX_CACHE_TTL).contains(&ttl) {
            return Err(ScriptFilterError::InvalidArgument(format!(
                "cache ttl must be between {}s and {}s, got {:?}",
                MIN_CACHE_TTL.as_secs(),
                MAX_CACHE_TTL.as_secs(),
                ttl
            )));
        }
        Ok(Self {
            cache_ttl: Some(ttl),
            loose_reload: false,
            ..self
        })
    }

    /// Shows stale cached rows while the launcher refreshes in the background.
    ///
    /// Only observable once a cache TTL is set.
    #[must_use]
    pub fn enable_loose_reload(self) -> Self {
        Self {
            loose_reload: true,
            ..self
        }
    }

    #[must_use]
    pub const fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl
    }

    #[must_use]
    pub const fn loose_reload(&self) -> bool {
        self.loose_reload
    }

    /// Rows in output order, ignoring visibility.
    #[must_use]
    pub fn sorted_items(&self) -> Vec<&Item> {
        let mut rows: Vec<&Item> = self.items.iter().collect();
        if !self.original_sort {
            rows.sort_by_cached_key(|item| item.title.to_lowercase());
        }
        rows
    }

    /// Rows as they are written to the document: hidden rows dropped, sort applied.
    pub fn rendered_items(&self) -> impl Iterator<Item = &Item> {
        self.sorted_items().into_iter().filter(|item| item.visible)
    }

    /// Keeps rows whose match text fuzzy-matches `query`, best matches first.
    ///
    /// A blank query leaves the rows untouched. Ties keep their relative order.
    #[must_use]
    pub fn filter_by_query(self, query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            return self;
        }

        let matcher = SkimMatcherV2::default().ignore_case();
        let mut scored: Vec<(i64, Item)> = self
            .items
            .into_iter()
            .filter_map(|item| {
                matcher
                    .fuzzy_match(item.match_text(), query)
                    .map(|score| (score, item))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        tracing::debug!(query = %query, matched = scored.len(), "filtered items by query");

        Self {
            items: scored.into_iter().map(|(_, item)| item).collect(),
            ..self
        }
    }

    /// Inserts a row ahead of all others in the rendered output.
    ///
    /// The current render order is frozen first (title sort applied, hidden rows
    /// dropped) so the new row stays on top even when sorting by title.
    #[must_use]
    pub fn prepend(self, item: Item) -> Self {
        let mut rows = Vec::with_capacity(self.items.len() + 1);
        rows.push(item);
        rows.extend(self.rendered_items().cloned());
        Self {
            items: rows,
            original_sort: true,
            ..self
        }
    }
}

impl From<Item> for Items {
    fn from(item: Item) -> Self {
        Self::new(vec![item])
    }
}

impl From<Vec<Item>> for Items {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}

impl FromIterator<Item> for Items {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(items: &Items) -> Vec<String> {
        items.rendered_items().map(|i| i.title.clone()).collect()
    }

    #[test]
    fn defaults() {
        let items = Items::default();
        assert!(items.items.is_empty());
        assert!(items.original_sort);
        assert!(items.skip_knowledge);
        assert_eq!(items.cache_ttl(), None);
        assert!(!items.loose_reload());
    }

    #[test]
    fn single_item_promotes() {
        let items: Items = Item::new("one").into();
        assert_eq!(items.items.len(), 1);
    }

    #[test]
    fn original_order_is_kept_by_default() {
        let items: Items = vec![Item::new("b"), Item::new("a")].into();
        assert_eq!(titles(&items), ["b", "a"]);
    }

    #[test]
    fn title_sort_is_case_insensitive_and_stable() {
        let items = Items::new(vec![
            Item::new("beta").uid("1"),
            Item::new("Alpha"),
            Item::new("BETA").uid("2"),
            Item::new("alpha2"),
        ])
        .enable_sorting_by_title();
        let sorted: Vec<(String, Option<String>)> = items
            .rendered_items()
            .map(|i| (i.title.clone(), i.uid.clone()))
            .collect();
        assert_eq!(sorted[0].0, "Alpha");
        assert_eq!(sorted[1].0, "alpha2");
        assert_eq!(sorted[2], ("beta".to_string(), Some("1".to_string())));
        assert_eq!(sorted[3], ("BETA".to_string(), Some("2".to_string())));
    }

    #[test]
    fn hidden_rows_are_dropped() {
        let items = Items::new(vec![Item::new("shown"), Item::new("hidden").hide_when(true)]);
        assert_eq!(titles(&items), ["shown"]);
        assert_eq!(items.sorted_items().len(), 2);
    }

    #[test]
    fn cache_bounds_are_inclusive() {
        assert!(Items::default().cache(MIN_CACHE_TTL).is_ok());
        assert!(Items::default().cache(MAX_CACHE_TTL).is_ok());
        assert!(matches!(
            Items::default().cache(Duration::from_secs(4)),
            Err(ScriptFilterError::InvalidArgument(_))
        ));
        assert!(matches!(
            Items::default().cache(MAX_CACHE_TTL + Duration::from_secs(1)),
            Err(ScriptFilterError::InvalidArgument(_))
        ));
    }

    #[test]
    fn cache_resets_loose_reload() {
        let items = Items::default()
            .cache(Duration::from_secs(10))
            .unwrap()
            .enable_loose_reload();
        assert!(items.loose_reload());
        let items = items.cache(Duration::from_secs(20)).unwrap();
        assert!(!items.loose_reload());
        assert_eq!(items.cache_ttl(), Some(Duration::from_secs(20)));
    }

    #[test]
    fn query_filter_ranks_and_drops() {
        let items = Items::new(vec![
            Item::new("Downloads"),
            Item::new("Documents"),
            Item::new("Pictures"),
        ])
        .filter_by_query("doc");
        assert_eq!(titles(&items), ["Documents"]);
    }

    #[test]
    fn query_filter_uses_match_text() {
        let items = Items::new(vec![Item::new("Visual Studio Code").matching("vscode editor")])
            .filter_by_query("vsc");
        assert_eq!(items.items.len(), 1);
    }

    #[test]
    fn blank_query_keeps_everything() {
        let items = Items::new(vec![Item::new("a"), Item::new("b")]).filter_by_query("  ");
        assert_eq!(titles(&items), ["a", "b"]);
    }

    #[test]
    fn prepend_puts_row_first() {
        let items = Items::new(vec![Item::new("a")]).prepend(Item::new("first"));
        assert_eq!(titles(&items), ["first", "a"]);
    }

    #[test]
    fn prepend_stays_first_when_sorting_by_title() {
        let items = Items::new(vec![Item::new("beta"), Item::new("alpha"), Item::new("gone").hide_when(true)])
            .enable_sorting_by_title()
            .skip_knowledge(false)
            .prepend(Item::new("Update available"));

        let rendered: Vec<&str> = items.rendered_items().map(|i| i.title.as_str()).collect();
        assert_eq!(rendered, ["Update available", "alpha", "beta"]);
        assert!(!items.skip_knowledge);
    }

    #[test]
    fn prepend_keeps_cache_directive() {
        let items = Items::new(vec![Item::new("a")])
            .cache(Duration::from_secs(30))
            .unwrap()
            .enable_loose_reload()
            .prepend(Item::new("first"));
        assert_eq!(items.cache_ttl(), Some(Duration::from_secs(30)));
        assert!(items.loose_reload());
    }

    #[test]
    fn fractional_cache_ttl_is_rejected() {
        assert!(matches!(
            Items::default().cache(Duration::from_millis(5_500)),
            Err(ScriptFilterError::InvalidArgument(_))
        ));
        assert!(Items::default().cache(Duration::from_secs(6)).is_ok());
    }
}
