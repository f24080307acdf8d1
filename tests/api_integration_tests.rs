//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cs2_profile::{api::create_router, AppState, Config};
use serde_json::Value;
use tower::ServiceExt;

use common::{config_for, spawn_upstream};

// == Helper Functions ==

fn create_app(config: Config) -> Router {
    create_router(AppState::from_config(config).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// == Profile Endpoint Tests ==

#[tokio::test]
async fn test_profile_not_configured_returns_503() {
    let app = create_app(Config::default());

    let response = app.oneshot(get("/api/profile")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["code"], "not_configured");
    assert!(json["error"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn test_profile_returns_view_model() {
    let (base, _stub) = spawn_upstream().await;
    let app = create_app(config_for(&base));

    let response = app.oneshot(get("/api/profile")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["identity"]["handle"], "ace");
    assert_eq!(json["metrics"].as_array().unwrap().len(), 9);
    assert_eq!(json["clutchStats"]["clutch1v1"], 65);
    assert!(json["identity"]["avatarUrl"].is_string());
    assert!(json["weaponSkins"][0]["iconUrl"].is_string());
    assert!(json["lastUpdated"].is_string());
}

// == Cache Stats Endpoint Tests ==

#[tokio::test]
async fn test_cache_stats_after_profile_build() {
    let (base, _stub) = spawn_upstream().await;
    let app = create_app(config_for(&base));

    let response = app.clone().oneshot(get("/api/profile")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/cache/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert!(json["total_entries"].as_u64().unwrap() > 0);
    assert!(json["misses"].as_u64().unwrap() > 0);
    assert!(json.get("hit_rate").is_some());
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_app(Config::default());

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = create_app(Config::default());

    let response = app.oneshot(get("/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
