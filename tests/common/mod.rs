//! Local stand-in for the Steam, Leetify and Allstar APIs.
//!
//! Serves canned JSON over loopback so the adapters run their real HTTP
//! path. Every request is counted so tests can tell cache hits from
//! upstream calls.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use cs2_profile::config::{Config, Endpoints};

pub const PLAYER_ID: &str = "76561198000000100";
pub const TEAMMATES: [&str; 4] = [
    "76561198000000201",
    "76561198000000202",
    "76561198000000299",
    "76561198000000203",
];
pub const ALLSTAR_USERNAME: &str = "ace_clips";

#[derive(Clone, Default)]
pub struct Stub {
    pub requests: Arc<AtomicUsize>,
}

impl Stub {
    pub fn count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

type Params = Query<HashMap<String, String>>;

fn player_json(id: &str, name: &str) -> Value {
    json!({
        "steamid": id,
        "personaname": name,
        "profileurl": format!("https://steamcommunity.com/id/{}/", name),
        "avatar": format!("https://avatars.test/{}.jpg", id),
        "avatarmedium": format!("https://avatars.test/{}_medium.jpg", id),
        "avatarfull": format!("https://avatars.test/{}_full.jpg", id),
    })
}

async fn players(State(stub): State<Stub>, Query(q): Params) -> Json<Value> {
    stub.hit();
    let id = q.get("steamids").cloned().unwrap_or_default();
    let players = match id.as_str() {
        PLAYER_ID => vec![player_json(&id, "ace")],
        "76561198000000201" => vec![player_json(&id, "lurk")],
        "76561198000000202" => vec![player_json(&id, "anchor")],
        "76561198000000203" => vec![player_json(&id, "rifle")],
        _ => Vec::new(),
    };
    Json(json!({ "response": { "players": players } }))
}

async fn owned_games(State(stub): State<Stub>) -> Json<Value> {
    stub.hit();
    Json(json!({
        "response": {
            "game_count": 2,
            "games": [
                { "appid": 440, "playtime_forever": 90 },
                { "appid": 730, "playtime_forever": 74_040 }
            ]
        }
    }))
}

async fn inventory(State(stub): State<Stub>, Path(id): Path<String>) -> Response {
    stub.hit();
    if id != PLAYER_ID {
        return StatusCode::FORBIDDEN.into_response();
    }
    Json(json!({
        "descriptions": [
            {
                "name": "2019 Service Medal",
                "market_name": "2019 Service Medal",
                "icon_url": "medal2019",
                "type": "Extraordinary Collectible"
            },
            {
                "name": "Loyalty Badge",
                "market_name": "Loyalty Badge",
                "icon_url": "loyalty",
                "type": "Extraordinary Collectible"
            },
            {
                "name": "2023 Service Medal",
                "market_name": "2023 Service Medal",
                "icon_url": "medal2023",
                "type": "Extraordinary Collectible"
            },
            {
                "name": "Music Kit | Skog, Metal",
                "icon_url": "kit",
                "type": "High Grade Music Kit"
            },
            {
                "name": "AWP | Asiimov (Field-Tested)",
                "icon_url": "awp",
                "type": "Covert Sniper Rifle",
                "tags": [
                    { "category": "Weapon", "localized_tag_name": "AWP" },
                    { "category": "Rarity", "localized_tag_name": "Covert" }
                ],
                "descriptions": [
                    { "value": "Exterior: Field-Tested" },
                    { "value": "<br><div id=\"sticker_info\"><br>Sticker: Crown (Foil), Howling Dawn</div>" }
                ]
            },
            {
                "name": "Sealed Graffiti | Lambda",
                "icon_url": "graffiti",
                "type": "Base Grade Graffiti"
            }
        ]
    }))
    .into_response()
}

async fn leetify_profile(State(stub): State<Stub>, Query(q): Params) -> Response {
    stub.hit();
    let id = q.get("steam64_id").cloned().unwrap_or_default();
    match id.as_str() {
        PLAYER_ID => Json(json!({
            "winrate": 0.53,
            "total_matches": 1234,
            "rating": { "aim": 81.5, "positioning": 60.2, "utility": 44.0, "clutch": 0.11, "opening": 0.02 },
            "stats": {
                "accuracy_head": 22.1,
                "reaction_time_ms": 498.6,
                "ct_opening_aggression_success_rate": 47.3,
                "t_opening_aggression_success_rate": 52.8
            },
            "ranks": { "leetify": 2.12, "premier": 21_450 }
        }))
        .into_response(),
        "76561198000000201" => Json(json!({
            "rating": { "aim": 70.0 },
            "ranks": { "leetify": 0.85 }
        }))
        .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn clip_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "clipUrl": format!("https://allstar.test/clip/{}", id),
        "clipTitle": format!("Clip {}", id),
        "clipLength": 33.0,
        "clipSnapshotURL": format!("https://allstar.test/{}/snap.jpg", id),
        "clipImageThumbURL": format!("https://allstar.test/{}/thumb.jpg", id),
        "status": status,
        "createdDate": "2024-06-01T12:00:00Z",
        "metadata": [
            { "key": "CS_Map", "value": "de_ancient" },
            { "key": "CS_Kill Count", "value": "5" }
        ]
    })
}

async fn clips(State(stub): State<Stub>, Query(q): Params) -> Json<Value> {
    stub.hit();
    let clips = if q.get("steamId").map(String::as_str) == Some(PLAYER_ID) {
        vec![
            clip_json("c1", "Processed"),
            clip_json("c2", "Submitted"),
            clip_json("c3", "Processed"),
        ]
    } else if q.get("userId").map(String::as_str) == Some(ALLSTAR_USERNAME) {
        vec![clip_json("u1", "Processed")]
    } else {
        Vec::new()
    };
    Json(json!({ "message": "ok", "data": { "clips": clips } }))
}

/// Serves the healthy upstream; returns its base URL and request counter.
pub async fn spawn_upstream() -> (String, Stub) {
    let stub = Stub::default();
    let app = Router::new()
        .route("/ISteamUser/GetPlayerSummaries/v2/", get(players))
        .route("/IPlayerService/GetOwnedGames/v1/", get(owned_games))
        .route("/inventory/:id/730/2", get(inventory))
        .route("/v3/profile", get(leetify_profile))
        .route("/user/clips", get(clips))
        .with_state(stub.clone());
    (serve(app).await, stub)
}

/// Serves an upstream that answers every request with HTTP 500.
pub async fn spawn_failing_upstream() -> String {
    let app = Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR });
    serve(app).await
}

/// Base URL nobody listens on.
pub async fn refused_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Usable configuration with every API pointed at `base`.
pub fn config_for(base: &str) -> Config {
    Config {
        steam_api_key: "steam-key".to_string(),
        steam_id: PLAYER_ID.to_string(),
        leetify_api_key: "leetify-key".to_string(),
        allstar_api_key: "allstar-key".to_string(),
        teammate_ids: TEAMMATES.iter().map(|s| s.to_string()).collect(),
        request_timeout_secs: 2,
        aggregation_deadline_secs: 5,
        endpoints: Endpoints {
            steam: base.to_string(),
            steam_community: base.to_string(),
            steam_cdn: format!("{}/cdn", base),
            leetify: base.to_string(),
            allstar: base.to_string(),
            allstar_media: format!("{}/media", base),
            allstar_embed: format!("{}/iframe", base),
        },
        ..Config::default()
    }
}
