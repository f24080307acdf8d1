//! Allstar highlight clips, with the local clip list as fallback.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::{DEFAULT_CLIP_DURATION, DEFAULT_CLIP_TITLE};
use crate::error::FetchError;
use crate::fallback::FallbackClip;
use crate::models::ClipDisplay;
use crate::sources::http::{get_json, SourceContext};

const SOURCE: &str = "allstar";
const PROCESSED: &str = "Processed";

// == Raw Records ==
#[derive(Debug, Default, Deserialize)]
struct ClipsResponse {
    #[serde(default)]
    data: Option<ClipPage>,
}

#[derive(Debug, Default, Deserialize)]
struct ClipPage {
    #[serde(default)]
    clips: Vec<RawClip>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawClip {
    #[serde(rename = "_id")]
    id: Option<String>,
    clip_url: Option<String>,
    clip_title: Option<String>,
    clip_length: Option<f64>,
    #[serde(rename = "clipSnapshotURL")]
    clip_snapshot_url: Option<String>,
    #[serde(rename = "clipImageThumbURL")]
    clip_image_thumb_url: Option<String>,
    status: Option<String>,
    created_date: Option<String>,
    metadata: Option<Vec<ClipMetadata>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClipMetadata {
    key: Option<String>,
    value: Value,
}

/// Upstream sends `null` as freely as it omits keys; both read as absent.
fn present(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

impl RawClip {
    fn is_processed(&self) -> bool {
        self.status.as_deref() == Some(PROCESSED)
    }

    fn metadata_value(&self, key: &str) -> Option<String> {
        self.metadata
            .iter()
            .flatten()
            .find(|m| m.key.as_deref() == Some(key))
            .and_then(|m| match &m.value {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
    }
}

#[derive(Debug, Clone)]
pub struct AllstarSource {
    ctx: SourceContext,
    fallback: Arc<Vec<FallbackClip>>,
}

impl AllstarSource {
    pub fn new(ctx: SourceContext, fallback: Vec<FallbackClip>) -> Self {
        Self {
            ctx,
            fallback: Arc::new(fallback),
        }
    }

    /// Up to `limit` recent processed clips. Without an API key, or when the
    /// API yields nothing, the local clip list is used instead.
    pub async fn fetch_clips(&self, steam_id: &str, limit: usize) -> Vec<ClipDisplay> {
        let key = format!("allstar_clips_{}_{}", steam_id, limit);
        if let Some(clips) = self
            .ctx
            .cache
            .get::<Vec<ClipDisplay>>(&key, self.ctx.ttl())
            .await
        {
            return clips;
        }

        if let Some(api_key) = self.ctx.config.allstar_key() {
            let clips = self.request_clips(steam_id, limit, api_key).await;
            if !clips.is_empty() {
                self.ctx.cache.set(key, &clips).await;
                return clips;
            }
        }

        let clips = self.fallback_clips(limit);
        if !clips.is_empty() {
            debug!(count = clips.len(), "serving fallback clips");
            self.ctx.cache.set(key, &clips).await;
        }
        clips
    }

    /// Looks clips up by Steam id, then by the configured username when the
    /// first lookup comes back empty.
    async fn request_clips(&self, steam_id: &str, limit: usize, api_key: &str) -> Vec<ClipDisplay> {
        let clips = self
            .query_clips(("steamId", steam_id), steam_id, limit, api_key)
            .await
            .unwrap_or_else(|e| {
                warn!(steam_id, error = %e, "allstar lookup by steam id failed");
                Vec::new()
            });

        let username = self.ctx.config.allstar_username.as_str();
        if !clips.is_empty() || username.is_empty() {
            return clips;
        }

        self.query_clips(("userId", username), steam_id, limit, api_key)
            .await
            .unwrap_or_else(|e| {
                warn!(username, error = %e, "allstar lookup by username failed");
                Vec::new()
            })
    }

    async fn query_clips(
        &self,
        owner: (&str, &str),
        steam_id: &str,
        limit: usize,
        api_key: &str,
    ) -> Result<Vec<ClipDisplay>, FetchError> {
        let url = format!("{}/user/clips", self.ctx.config.endpoints.allstar);
        let limit_param = limit.to_string();
        let request = self
            .ctx
            .http
            .get(url)
            .query(&[owner, ("limit", limit_param.as_str()), ("sort", "date")])
            .header("X-API-Key", api_key);

        let body: ClipsResponse = get_json(SOURCE, request).await?;
        Ok(body
            .data
            .map(|page| page.clips)
            .unwrap_or_default()
            .into_iter()
            .filter(RawClip::is_processed)
            .take(limit)
            .map(|c| self.to_display(c, steam_id))
            .collect())
    }

    fn to_display(&self, clip: RawClip, steam_id: &str) -> ClipDisplay {
        let map = clip.metadata_value("CS_Map");
        let kills = clip.metadata_value("CS_Kill Count");
        let duration = clip.clip_length.unwrap_or(DEFAULT_CLIP_DURATION);

        let id = clip.id.unwrap_or_default();

        let thumbnail = present(clip.clip_image_thumb_url)
            .or_else(|| present(clip.clip_snapshot_url))
            .unwrap_or_default();
        let embed_url =
            present(clip.clip_url).unwrap_or_else(|| self.build_embed_url(&id, steam_id));
        let title = present(clip.clip_title).unwrap_or_else(|| DEFAULT_CLIP_TITLE.to_string());

        ClipDisplay {
            id,
            title,
            thumbnail,
            embed_url,
            duration,
            duration_label: format_duration(duration),
            date: clip.created_date.unwrap_or_default(),
            map,
            kills,
        }
    }

    /// Clips from the local list, stamped with the current time.
    pub fn fallback_clips(&self, limit: usize) -> Vec<ClipDisplay> {
        let endpoints = &self.ctx.config.endpoints;
        let now = Utc::now().to_rfc3339();

        self.fallback
            .iter()
            .take(limit)
            .map(|clip| {
                let id = clip.id.trim();
                ClipDisplay {
                    id: id.to_string(),
                    title: clip
                        .title
                        .clone()
                        .filter(|t| !t.is_empty())
                        .unwrap_or_else(|| DEFAULT_CLIP_TITLE.to_string()),
                    thumbnail: format!("{}/{}/thumb.jpg", endpoints.allstar_media, id),
                    embed_url: format!("{}?clip={}", endpoints.allstar_embed, id),
                    duration: DEFAULT_CLIP_DURATION,
                    duration_label: format_duration(DEFAULT_CLIP_DURATION),
                    date: now.clone(),
                    map: None,
                    kills: None,
                }
            })
            .collect()
    }

    /// Player URL that marks the viewer as the clip owner.
    pub fn build_embed_url(&self, clip_id: &str, steam_id: &str) -> String {
        format!(
            "{}?clip={}&known=true&UID={}",
            self.ctx.config.endpoints.allstar_embed, clip_id, steam_id
        )
    }
}

/// `m:ss`; negative input counts as zero.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
