//! Cache of post identifiers recently surfaced in top feed slots.

use std::collections::HashSet;

use log::debug;

/// Identifiers recently shown in top feed slots.
///
/// The cache is an owned value with an explicit lifetime rather than
/// process-global state; inject it wherever ranking happens. It persists
/// across ranking passes until explicitly cleared or replaced, which is the
/// intended mechanism for cross-request anti-repetition. Eviction is
/// entirely caller-driven; there is no automatic expiry.
///
/// All operations need exclusive access (`&mut self` where they mutate).
/// Callers sharing one cache across threads wrap it in a `Mutex` and hold
/// the guard per operation; every operation completes in bounded time over
/// at most a few hundred identifiers.
///
/// # Examples
///
/// ```
/// use tideline_core::RecentTopIds;
///
/// let mut recent = RecentTopIds::new();
/// recent.record("p1");
/// recent.record("p1");
/// assert!(recent.contains("p1"));
/// assert_eq!(recent.len(), 1);
///
/// recent.replace_all(["p2", "p3"]);
/// assert!(!recent.contains("p1"));
///
/// recent.clear();
/// assert!(recent.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentTopIds {
    ids: HashSet<String>,
}

impl RecentTopIds {
    /// Create an empty cache, the valid default at process start.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the previous contents and install `ids` as the new set.
    ///
    /// Deterministic and idempotent: calling twice with the same collection
    /// leaves the cache identical to calling once.
    pub fn replace_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
        debug!("recent-top cache replaced with {} ids", self.ids.len());
    }

    /// Empty the cache. Idempotent.
    pub fn clear(&mut self) {
        self.ids.clear();
        debug!("recent-top cache cleared");
    }

    /// Record one identifier as recently shown. Duplicates are ignored.
    pub fn record(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    /// Report whether `id` is currently considered recently shown.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of cached identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Report whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
