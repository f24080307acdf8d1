//! Cache Store Module
//!
//! HashMap storage with LRU tracking and expire-on-read TTL checks.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Cache Store ==
/// Bounded key-value storage for upstream results.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `max_entries` values.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
        }
    }

    // == Set ==
    /// Stores a value, resetting its capture time.
    ///
    /// If the cache is at capacity and the key is new, the least recently
    /// used entry is evicted first.
    pub fn set(&mut self, key: String, value: Value) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(evicted_key) = self.lru.evict_oldest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value));
        self.lru.touch(&key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a value no older than `ttl_seconds`.
    ///
    /// A stale entry is removed and reported as a miss.
    pub fn get(&mut self, key: &str, ttl_seconds: u64) -> Option<Value> {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_stale(ttl_seconds) {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
            self.stats.record_expired();
            return None;
        }

        let value = entry.value.clone();
        self.stats.record_hit();
        self.lru.touch(key);
        Some(value)
    }

    // == Clear ==
    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn backdate(&mut self, key: &str, millis: u64) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.captured_at = entry.captured_at.saturating_sub(millis);
        }
    }
}
