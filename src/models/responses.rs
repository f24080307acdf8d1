//! Response bodies for the service endpoints other than the profile itself.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for `GET /api/cache/stats`
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expired: u64,
    pub total_entries: usize,
    /// hits / (hits + misses), 0 before the first lookup
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expired: stats.expired,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
