//! View model returned by `GET /api/profile`
//!
//! Field names serialize in camelCase for the page consuming them.

use serde::{Deserialize, Serialize};

/// One tile of the stat grid; `value` is already formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            subtext: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medal {
    pub name: String,
    pub icon_url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicKit {
    pub name: String,
    pub artist: String,
    pub icon_url: String,
    pub is_stat_trak: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    pub name: String,
    pub slot: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponSkin {
    pub weapon: String,
    pub name: String,
    pub icon_url: String,
    pub rarity: String,
    pub category: String,
    pub is_stat_trak: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stickers: Option<Vec<Sticker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charm: Option<String>,
}

/// Rank shown next to the handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankDisplay {
    /// `premier` or `competitive`
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub skill_level: u32,
    /// Premier rating or skill group name.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teammate {
    pub steam_id: String,
    pub name: String,
    pub profile_url: String,
    pub avatar_url: Option<String>,
    pub roles: Vec<String>,
    pub leetify_rating: Option<f64>,
    pub aim: Option<f64>,
    pub positioning: Option<f64>,
    pub utility: Option<f64>,
    pub clutch: Option<f64>,
    pub opening: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipDisplay {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub embed_url: String,
    pub duration: f64,
    /// `m:ss`
    pub duration_label: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kills: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClutchStats {
    #[serde(rename = "clutch1v1")]
    pub clutch_1v1: Option<u32>,
    #[serde(rename = "clutch1v2")]
    pub clutch_1v2: Option<u32>,
    #[serde(rename = "clutch1v3")]
    pub clutch_1v3: Option<u32>,
    #[serde(rename = "clutch1v4")]
    pub clutch_1v4: Option<u32>,
    #[serde(rename = "clutch1v5")]
    pub clutch_1v5: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileIdentity {
    pub steam_id: String,
    pub handle: String,
    pub context: String,
    pub avatar_url: Option<String>,
    pub profile_url: Option<String>,
    pub medals: Vec<Medal>,
    pub crosshair: Option<String>,
    pub rank: Option<RankDisplay>,
    pub roles: Vec<String>,
}

/// Everything the profile page renders, built once per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileViewModel {
    pub identity: ProfileIdentity,
    pub metrics: Vec<Metric>,
    pub clutch_stats: ClutchStats,
    pub highlights: Vec<ClipDisplay>,
    pub teammates: Vec<Teammate>,
    pub music_kits: Vec<MusicKit>,
    pub weapon_skins: Vec<WeaponSkin>,
    /// RFC 3339
    pub last_updated: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_omits_missing_subtext() {
        let json = serde_json::to_value(Metric::new("K/D", "1.15")).unwrap();
        assert_eq!(json, serde_json::json!({"label": "K/D", "value": "1.15"}));
    }

    #[test]
    fn test_camel_case_field_names() {
        let medal = Medal {
            name: "2021 Service Medal".to_string(),
            icon_url: "https://cdn/x".to_string(),
            kind: "Collectible".to_string(),
        };
        let json = serde_json::to_value(&medal).unwrap();
        assert_eq!(json["iconUrl"], "https://cdn/x");
        assert_eq!(json["type"], "Collectible");

        let clutch = ClutchStats {
            clutch_1v1: Some(65),
            clutch_1v2: None,
            clutch_1v3: None,
            clutch_1v4: None,
            clutch_1v5: None,
        };
        let json = serde_json::to_value(&clutch).unwrap();
        assert_eq!(json["clutch1v1"], 65);
        assert!(json["clutch1v2"].is_null());
    }
}
