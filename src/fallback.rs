//! Local fallback data
//!
//! Values used where a live source cannot answer. CSStats refuses
//! server-side requests outright, so its numbers always come from here.
//! The clip list stands in for Allstar when no API key is configured or
//! the API returns nothing usable.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

const EMBEDDED_CLIPS: &str = include_str!("../data/clips.json");

// == Stats Snapshot ==
/// Static performance numbers layered over live analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub hltv_rating: Option<f64>,
    pub hs_percent: Option<f64>,
    pub adr: Option<f64>,
    pub kd: Option<f64>,
    pub clutch_1v1: Option<u32>,
    pub clutch_1v2: Option<u32>,
    pub clutch_1v3: Option<u32>,
    pub clutch_1v4: Option<u32>,
    pub clutch_1v5: Option<u32>,
    pub crosshair: Option<String>,
}

/// The snapshot used for every profile build.
pub fn stats_snapshot() -> StatsSnapshot {
    StatsSnapshot {
        hltv_rating: Some(1.25),
        hs_percent: Some(52.3),
        adr: Some(85.4),
        kd: Some(1.15),
        clutch_1v1: Some(65),
        clutch_1v2: Some(42),
        clutch_1v3: Some(28),
        clutch_1v4: None,
        clutch_1v5: None,
        crosshair: None,
    }
}

// == Fallback Clips ==
/// One entry of the local clip list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FallbackClip {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClipFile {
    #[serde(default)]
    clips: Vec<FallbackClip>,
}

/// Parses a clip list document (`{"clips": [{"id", "title"}]}`).
pub fn parse_clip_list(raw: &str) -> Result<Vec<FallbackClip>, serde_json::Error> {
    let file: ClipFile = serde_json::from_str(raw)?;
    Ok(file
        .clips
        .into_iter()
        .filter(|clip| !clip.id.trim().is_empty())
        .collect())
}

/// Loads the clip list from `path`, or the embedded list when no path is
/// given or the file cannot be used.
pub fn load_fallback_clips(path: Option<&Path>) -> Vec<FallbackClip> {
    if let Some(path) = path {
        match fs::read_to_string(path) {
            Ok(raw) => match parse_clip_list(&raw) {
                Ok(clips) => return clips,
                Err(e) => warn!(path = %path.display(), error = %e, "invalid fallback clip file"),
            },
            Err(e) => warn!(path = %path.display(), error = %e, "unreadable fallback clip file"),
        }
    }

    parse_clip_list(EMBEDDED_CLIPS).unwrap_or_else(|e| {
        warn!(error = %e, "embedded clip list is invalid");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_clip_list_parses() {
        let clips = load_fallback_clips(None);
        assert!(!clips.is_empty());
        assert!(clips.iter().all(|c| !c.id.is_empty()));
    }

    #[test]
    fn test_parse_clip_list_drops_blank_ids_and_allows_missing_title() {
        let clips = parse_clip_list(r#"{"clips":[{"id":"abc"},{"id":"  ","title":"x"}]}"#).unwrap();
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].id, "abc");
        assert!(clips[0].title.is_none());
    }

    #[test]
    fn test_missing_file_uses_embedded_list() {
        let clips = load_fallback_clips(Some(Path::new("/nonexistent/clips.json")));
        assert_eq!(clips, load_fallback_clips(None));
    }

    #[test]
    fn test_snapshot_values() {
        let stats = stats_snapshot();
        assert_eq!(stats.kd, Some(1.15));
        assert_eq!(stats.hltv_rating, Some(1.25));
        assert!(stats.clutch_1v4.is_none());
    }
}
