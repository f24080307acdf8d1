//! Cache Module
//!
//! In-memory cache of upstream API results with per-read TTL expiry and
//! LRU eviction once the configured capacity is reached.
//!
//! Keys follow `<source>_<operation>_<identity>[_<params>]`, e.g.
//! `steam_player_76561198000000000` or `allstar_clips_76561198000000000_50`.

mod entry;
mod lru;
mod stats;
mod store;


use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Cache Handle ==
/// Cloneable, task-safe handle to a shared [`CacheStore`].
///
/// Values are stored as JSON so results of different adapters share one
/// store. Two tasks missing the same key at once will both hit upstream;
/// the later `set` wins.
#[derive(Debug, Clone)]
pub struct Cache {
    inner: Arc<RwLock<CacheStore>>,
}

impl Cache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Returns the cached value for `key` if it is at most `ttl_seconds` old
    /// and still decodes as `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, ttl_seconds: u64) -> Option<T> {
        // Write lock: a read updates LRU order and may evict
        let value = self.inner.write().await.get(key, ttl_seconds)?;
        match serde_json::from_value(value) {
            Ok(decoded) => {
                debug!(key, "cache hit");
                Some(decoded)
            }
            Err(e) => {
                warn!(key, error = %e, "cached value has unexpected shape");
                None
            }
        }
    }

    /// Stores `value` under `key`, capturing the current time.
    pub async fn set<T: Serialize>(&self, key: impl Into<String>, value: &T) {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(json) => self.inner.write().await.set(key, json),
            Err(e) => warn!(key = %key, error = %e, "value not cacheable"),
        }
    }

    /// Drops every cached value.
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Player {
        name: String,
        level: u32,
    }

    #[tokio::test]
    async fn test_typed_round_trip() {
        let cache = Cache::new(10);
        let player = Player {
            name: "s1mple".to_string(),
            level: 10,
        };

        cache.set("steam_player_1", &player).await;
        let cached: Option<Player> = cache.get("steam_player_1", 300).await;

        assert_eq!(cached, Some(player));
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_a_miss() {
        let cache = Cache::new(10);
        cache.set("k", &"just a string").await;

        let cached: Option<Player> = cache.get("k", 300).await;
        assert!(cached.is_none());
    }

    #[tokio::test]
    async fn test_clear_empties_shared_store() {
        let cache = Cache::new(10);
        let other_handle = cache.clone();

        cache.set("a", &1u32).await;
        other_handle.clear().await;

        assert!(cache.get::<u32>("a", 300).await.is_none());
        assert_eq!(cache.stats().await.total_entries, 0);
    }
}
