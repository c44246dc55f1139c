//! Byte-bounded LRU map plus the screen → URL bookkeeping
//!
//! `CacheState` is plain synchronous data; `ScopedImageCache` keeps it behind
//! one mutex so entry and group updates are always seen together.

use lru::LruCache;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::entry::DecodedImage;

/// Result of [`CacheState::insert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Entry stored after evicting this many least-recently-used entries
    Stored { evicted: usize },
    /// Entry alone exceeds the whole budget and was not stored
    TooLarge,
}

#[derive(Debug)]
pub struct CacheState {
    entries: LruCache<String, Arc<DecodedImage>>,
    screens: HashMap<String, HashSet<String>>,
    used_bytes: usize,
    capacity_bytes: usize,
    pub(crate) hits: u64,
    pub(crate) misses: u64,
    pub(crate) fetch_failures: u64,
    pub(crate) decode_failures: u64,
    pub(crate) evictions: u64,
}

impl CacheState {
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            entries: LruCache::unbounded(),
            screens: HashMap::new(),
            used_bytes: 0,
            capacity_bytes,
            hits: 0,
            misses: 0,
            fetch_failures: 0,
            decode_failures: 0,
            evictions: 0,
        }
    }

    /// Record that `screen_id` displays `url`. Repeat calls are no-ops.
    pub fn register(&mut self, screen_id: &str, url: &str) {
        self.screens
            .entry(screen_id.to_string())
            .or_default()
            .insert(url.to_string());
    }

    /// Lookup that marks the entry most-recently-used
    pub fn get(&mut self, url: &str) -> Option<Arc<DecodedImage>> {
        self.entries.get(url).cloned()
    }

    /// Lookup without touching recency
    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains(url)
    }

    /// Store `image` under `url`, replacing any previous entry, then evict
    /// least-recently-used entries until the total fits the budget.
    pub fn insert(&mut self, url: String, image: Arc<DecodedImage>) -> InsertOutcome {
        let weight = image.weight();
        if weight > self.capacity_bytes {
            return InsertOutcome::TooLarge;
        }

        if let Some(previous) = self.entries.pop(&url) {
            self.used_bytes = self.used_bytes.saturating_sub(previous.weight());
        }

        let mut evicted = 0;
        while self.used_bytes + weight > self.capacity_bytes {
            match self.entries.pop_lru() {
                Some((_, old)) => {
                    self.used_bytes = self.used_bytes.saturating_sub(old.weight());
                    evicted += 1;
                }
                None => break,
            }
        }
        self.evictions += evicted as u64;

        self.entries.put(url, image);
        self.used_bytes += weight;

        InsertOutcome::Stored { evicted }
    }

    pub fn remove(&mut self, url: &str) -> bool {
        match self.entries.pop(url) {
            Some(image) => {
                self.used_bytes = self.used_bytes.saturating_sub(image.weight());
                true
            }
            None => false,
        }
    }

    /// Drop every URL registered under `screen_id` from the shared map, shared
    /// or not, and forget the screen. Returns the number of URLs the screen had
    /// registered, or `None` when the screen was unknown.
    pub fn clear_screen(&mut self, screen_id: &str) -> Option<usize> {
        let urls = self.screens.remove(screen_id)?;
        for url in &urls {
            self.remove(url);
        }
        Some(urls.len())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.screens.clear();
        self.used_bytes = 0;
    }

    pub fn screen_urls(&self, screen_id: &str) -> Vec<String> {
        let mut urls: Vec<String> = self
            .screens
            .get(screen_id)
            .map(|urls| urls.iter().cloned().collect())
            .unwrap_or_default();
        urls.sort();
        urls
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    pub fn capacity_bytes(&self) -> usize {
        self.capacity_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(weight: usize) -> Arc<DecodedImage> {
        Arc::new(DecodedImage::new(weight as u32, 1, vec![0; weight]))
    }

    #[test]
    fn test_lru_eviction_on_overflow() {
        let mut state = CacheState::new(10);

        assert_eq!(
            state.insert("A".to_string(), image(6)),
            InsertOutcome::Stored { evicted: 0 }
        );
        assert_eq!(
            state.insert("B".to_string(), image(5)),
            InsertOutcome::Stored { evicted: 1 }
        );

        assert!(!state.contains("A"));
        assert!(state.contains("B"));
        assert_eq!(state.len(), 1);
        assert_eq!(state.used_bytes(), 5);
        assert_eq!(state.evictions, 1);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut state = CacheState::new(10);
        state.insert("A".to_string(), image(4));
        state.insert("B".to_string(), image(4));

        // A becomes most recently used, so B is the eviction victim
        assert!(state.get("A").is_some());
        state.insert("C".to_string(), image(4));

        assert!(state.contains("A"));
        assert!(!state.contains("B"));
        assert!(state.contains("C"));
        assert_eq!(state.used_bytes(), 8);
    }

    #[test]
    fn test_eviction_ignores_screen_membership() {
        let mut state = CacheState::new(10);
        state.register("details", "A");
        state.insert("A".to_string(), image(6));
        state.register("search", "B");
        state.insert("B".to_string(), image(6));

        assert!(!state.contains("A"));
        // Group membership survives capacity eviction
        assert_eq!(state.screen_urls("details"), vec!["A".to_string()]);
    }

    #[test]
    fn test_oversized_entry_not_stored() {
        let mut state = CacheState::new(10);
        state.insert("A".to_string(), image(3));

        assert_eq!(state.insert("huge".to_string(), image(11)), InsertOutcome::TooLarge);
        assert!(!state.contains("huge"));
        assert!(state.contains("A"));
        assert_eq!(state.used_bytes(), 3);
    }

    #[test]
    fn test_reinsert_replaces_wholesale() {
        let mut state = CacheState::new(10);
        state.insert("A".to_string(), image(4));
        state.insert("A".to_string(), image(7));

        assert_eq!(state.len(), 1);
        assert_eq!(state.used_bytes(), 7);
        assert_eq!(state.get("A").map(|i| i.weight()), Some(7));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut state = CacheState::new(10);
        state.register("main", "A");
        state.register("main", "A");
        state.register("main", "B");

        assert_eq!(state.screen_urls("main"), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(state.screen_count(), 1);
    }

    #[test]
    fn test_clear_screen_evicts_shared_urls() {
        let mut state = CacheState::new(100);
        state.register("main", "shared");
        state.register("main", "only-main");
        state.register("actor", "shared");
        state.register("actor", "only-actor");
        for url in ["shared", "only-main", "only-actor"] {
            state.insert(url.to_string(), image(10));
        }

        assert_eq!(state.clear_screen("main"), Some(2));

        assert!(!state.contains("only-main"));
        // Still registered under "actor", but gone from the shared map
        assert!(!state.contains("shared"));
        assert!(state.contains("only-actor"));
        assert_eq!(state.screen_urls("actor").len(), 2);
        assert!(state.screen_urls("main").is_empty());
        assert_eq!(state.used_bytes(), 10);
    }

    #[test]
    fn test_clear_unknown_screen_is_noop() {
        let mut state = CacheState::new(10);
        state.insert("A".to_string(), image(1));

        assert_eq!(state.clear_screen("never-seen"), None);
        assert!(state.contains("A"));
    }

    #[test]
    fn test_clear_everything() {
        let mut state = CacheState::new(10);
        state.register("main", "A");
        state.insert("A".to_string(), image(5));

        state.clear();

        assert!(state.is_empty());
        assert_eq!(state.screen_count(), 0);
        assert_eq!(state.used_bytes(), 0);
    }
}
