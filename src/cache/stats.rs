//! Cache Statistics Module
//!
//! Hit, miss and eviction counters for the upstream-result cache.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads served from a fresh entry
    pub hits: u64,
    /// Reads that found nothing or a stale entry
    pub misses: u64,
    /// Entries dropped to stay within capacity
    pub evictions: u64,
    /// Entries found stale on read and removed
    pub expired: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// hits / (hits + misses), or 0.0 before the first read.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expired(&mut self) {
        self.expired += 1;
        self.misses += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
