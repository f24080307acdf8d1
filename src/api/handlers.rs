//! API Handlers
//!
//! HTTP request handlers for each profile service endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::config::Config;
use crate::error::Result;
use crate::models::{CacheStatsResponse, HealthResponse, ProfileViewModel};
use crate::profile::ProfileService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ProfileService>,
}

impl AppState {
    pub fn new(service: ProfileService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Creates the service, and its cache, from configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        Ok(Self::new(ProfileService::new(config)?))
    }
}

/// Handler for GET /api/profile
///
/// Returns the aggregated profile, or 503 when the service is not configured.
pub async fn profile_handler(State(state): State<AppState>) -> Result<Json<ProfileViewModel>> {
    let profile = state.service.build_profile().await?;
    Ok(Json(profile))
}

/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let stats = state.service.cache().stats().await;
    Json(CacheStatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
