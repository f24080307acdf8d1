//! Cache Entry Module
//!
//! A cached upstream result plus the time it was captured. Staleness is
//! judged against the TTL supplied on read, not fixed at write time.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry with value and capture time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: Value,
    /// Capture timestamp (Unix milliseconds)
    pub captured_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry captured now.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            captured_at: current_timestamp_ms(),
        }
    }

    // == Age ==
    /// Milliseconds elapsed since capture.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.captured_at)
    }

    // == Is Stale ==
    /// Checks whether the entry is older than `ttl_seconds`.
    ///
    /// An entry whose age equals the TTL is still fresh; it goes stale
    /// strictly after the TTL has elapsed.
    pub fn is_stale(&self, ttl_seconds: u64) -> bool {
        self.age_ms() > ttl_seconds.saturating_mul(1000)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(json!({"name": "player"}));

        assert_eq!(entry.value["name"], "player");
        assert!(entry.age_ms() < 1000);
        assert!(!entry.is_stale(300));
    }

    #[test]
    fn test_entry_stale_after_ttl() {
        let entry = CacheEntry {
            value: json!(1),
            captured_at: current_timestamp_ms() - 5_000,
        };

        assert!(entry.is_stale(4));
        assert!(!entry.is_stale(10));
    }

    #[test]
    fn test_zero_ttl_boundary() {
        // A future capture time has age 0, which never exceeds a zero TTL
        let entry = CacheEntry {
            value: json!("v"),
            captured_at: current_timestamp_ms() + 60_000,
        };
        assert_eq!(entry.age_ms(), 0);
        assert!(!entry.is_stale(0));
    }
}
