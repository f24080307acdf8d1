//! Steam Web API and Steam Community inventory adapter.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{CS2_APP_ID, INVENTORY_PAGE_SIZE};
use crate::error::FetchError;
use crate::models::{Medal, MusicKit, WeaponSkin};
use crate::sources::http::{get_json, SourceContext};
use crate::sources::inventory::{
    classify_medals, extract_music_kits, extract_weapon_skins, InventoryItem, InventoryResponse,
};

const SOURCE: &str = "steam";

/// Player summary as returned by `GetPlayerSummaries`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteamPlayer {
    pub steamid: String,
    pub personaname: String,
    pub profileurl: String,
    pub avatar: String,
    pub avatarmedium: String,
    pub avatarfull: String,
}

#[derive(Debug, Default, Deserialize)]
struct PlayerSummaryResponse {
    #[serde(default)]
    response: PlayerList,
}

#[derive(Debug, Default, Deserialize)]
struct PlayerList {
    #[serde(default)]
    players: Vec<SteamPlayer>,
}

#[derive(Debug, Default, Deserialize)]
struct OwnedGamesResponse {
    #[serde(default)]
    response: OwnedGames,
}

#[derive(Debug, Default, Deserialize)]
struct OwnedGames {
    #[serde(default)]
    games: Vec<OwnedGame>,
}

#[derive(Debug, Deserialize)]
struct OwnedGame {
    appid: u32,
    #[serde(default)]
    playtime_forever: u64,
}

/// Steam identity, playtime and inventory lookups.
#[derive(Debug, Clone)]
pub struct SteamSource {
    ctx: SourceContext,
}

impl SteamSource {
    pub fn new(ctx: SourceContext) -> Self {
        Self { ctx }
    }

    /// Player summary, or `None` when Steam does not answer with one.
    pub async fn fetch_player(&self, steam_id: &str) -> Option<SteamPlayer> {
        let key = format!("steam_player_{}", steam_id);
        if let Some(player) = self.ctx.cache.get::<SteamPlayer>(&key, self.ctx.ttl()).await {
            return Some(player);
        }

        match self.request_player(steam_id).await {
            Ok(Some(player)) => {
                self.ctx.cache.set(key, &player).await;
                Some(player)
            }
            Ok(None) => {
                debug!(steam_id, "steam returned no player");
                None
            }
            Err(e) => {
                warn!(steam_id, error = %e, "player summary lookup failed");
                None
            }
        }
    }

    async fn request_player(&self, steam_id: &str) -> Result<Option<SteamPlayer>, FetchError> {
        let url = format!(
            "{}/ISteamUser/GetPlayerSummaries/v2/",
            self.ctx.config.endpoints.steam
        );
        let request = self.ctx.http.get(url).query(&[
            ("key", self.ctx.config.steam_api_key.as_str()),
            ("steamids", steam_id),
        ]);

        let body: PlayerSummaryResponse = get_json(SOURCE, request).await?;
        Ok(body.response.players.into_iter().next())
    }

    /// Lifetime CS2 minutes; zero counts as unknown.
    pub async fn fetch_playtime(&self, steam_id: &str) -> Option<u64> {
        let key = format!("steam_playtime_{}", steam_id);
        if let Some(minutes) = self.ctx.cache.get::<u64>(&key, self.ctx.ttl()).await {
            return Some(minutes);
        }

        match self.request_playtime(steam_id).await {
            Ok(Some(minutes)) => {
                self.ctx.cache.set(key, &minutes).await;
                Some(minutes)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(steam_id, error = %e, "owned games lookup failed");
                None
            }
        }
    }

    async fn request_playtime(&self, steam_id: &str) -> Result<Option<u64>, FetchError> {
        let url = format!(
            "{}/IPlayerService/GetOwnedGames/v1/",
            self.ctx.config.endpoints.steam
        );
        let request = self.ctx.http.get(url).query(&[
            ("key", self.ctx.config.steam_api_key.as_str()),
            ("steamid", steam_id),
            ("include_appinfo", "true"),
            ("include_played_free_games", "true"),
        ]);

        let body: OwnedGamesResponse = get_json(SOURCE, request).await?;
        Ok(body
            .response
            .games
            .into_iter()
            .find(|g| g.appid == CS2_APP_ID)
            .map(|g| g.playtime_forever)
            .filter(|minutes| *minutes > 0))
    }

    /// Raw inventory descriptors, shared by the medal, music kit and weapon
    /// lookups. A private inventory yields an empty list.
    async fn inventory(&self, steam_id: &str) -> Vec<InventoryItem> {
        let key = format!("steam_inventory_{}", steam_id);
        if let Some(items) = self
            .ctx
            .cache
            .get::<Vec<InventoryItem>>(&key, self.ctx.ttl())
            .await
        {
            return items;
        }

        match self.request_inventory(steam_id).await {
            Ok(items) => {
                if !items.is_empty() {
                    self.ctx.cache.set(key, &items).await;
                }
                items
            }
            Err(e) => {
                warn!(steam_id, error = %e, "inventory lookup failed");
                Vec::new()
            }
        }
    }

    async fn request_inventory(&self, steam_id: &str) -> Result<Vec<InventoryItem>, FetchError> {
        let url = format!(
            "{}/inventory/{}/{}/2",
            self.ctx.config.endpoints.steam_community, steam_id, CS2_APP_ID
        );
        let count = INVENTORY_PAGE_SIZE.to_string();
        let request = self
            .ctx
            .http
            .get(url)
            .query(&[("l", "english"), ("count", count.as_str())]);

        let body: InventoryResponse = get_json(SOURCE, request).await?;
        Ok(body.descriptions.unwrap_or_default())
    }

    pub async fn fetch_medals(&self, steam_id: &str) -> Vec<Medal> {
        let key = format!("steam_medals_{}", steam_id);
        self.derived(&key, steam_id, classify_medals).await
    }

    pub async fn fetch_music_kits(&self, steam_id: &str) -> Vec<MusicKit> {
        let key = format!("steam_music_{}", steam_id);
        self.derived(&key, steam_id, extract_music_kits).await
    }

    pub async fn fetch_weapon_skins(&self, steam_id: &str) -> Vec<WeaponSkin> {
        let key = format!("steam_weapons_{}", steam_id);
        self.derived(&key, steam_id, extract_weapon_skins).await
    }

    /// Cached view over the inventory; empty results are not cached.
    async fn derived<T, F>(&self, key: &str, steam_id: &str, extract: F) -> Vec<T>
    where
        T: Serialize + serde::de::DeserializeOwned,
        F: FnOnce(&[InventoryItem], &str) -> Vec<T>,
    {
        if let Some(cached) = self.ctx.cache.get::<Vec<T>>(key, self.ctx.ttl()).await {
            return cached;
        }

        let items = self.inventory(steam_id).await;
        let derived = extract(&items, &self.ctx.config.endpoints.steam_cdn);
        if !derived.is_empty() {
            self.ctx.cache.set(key, &derived).await;
        }
        derived
    }
}

/// `"1.2k hrs"` from 1000 hours up, `"523 hrs"` below.
pub fn format_playtime(minutes: u64) -> String {
    let hours = minutes / 60;
    if hours >= 1000 {
        format!("{:.1}k hrs", hours as f64 / 1000.0)
    } else {
        format!("{} hrs", hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_playtime() {
        assert_eq!(format_playtime(0), "0 hrs");
        assert_eq!(format_playtime(59), "0 hrs");
        assert_eq!(format_playtime(523 * 60 + 30), "523 hrs");
        assert_eq!(format_playtime(1000 * 60), "1.0k hrs");
        assert_eq!(format_playtime(1234 * 60), "1.2k hrs");
    }

    #[test]
    fn test_player_decoding_tolerates_missing_fields() {
        let raw = r#"{"response":{"players":[{"steamid":"1","personaname":"ace"}]}}"#;
        let body: PlayerSummaryResponse = serde_json::from_str(raw).unwrap();
        let player = body.response.players.into_iter().next().unwrap();
        assert_eq!(player.personaname, "ace");
        assert!(player.avatarfull.is_empty());
    }

    #[test]
    fn test_owned_games_decoding() {
        let raw = r#"{"response":{"game_count":2,"games":[{"appid":10,"playtime_forever":5},{"appid":730,"playtime_forever":61234}]}}"#;
        let body: OwnedGamesResponse = serde_json::from_str(raw).unwrap();
        let cs2 = body.response.games.iter().find(|g| g.appid == CS2_APP_ID).unwrap();
        assert_eq!(cs2.playtime_forever, 61234);

        let empty: OwnedGamesResponse = serde_json::from_str(r#"{"response":{}}"#).unwrap();
        assert!(empty.response.games.is_empty());
    }
}
