//! Leetify public API adapter.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::competitive_rank_name;
use crate::error::FetchError;
use crate::models::RankDisplay;
use crate::sources::http::{get_json, SourceContext};

const SOURCE: &str = "leetify";

/// Reported by Leetify's profile page rather than its API.
const STATIC_KD: f64 = 1.15;
const STATIC_HLTV_RATING: f64 = 1.25;

// == Raw Records ==
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProfile {
    winrate: Option<f64>,
    total_matches: Option<u64>,
    rating: Option<RawRating>,
    stats: Option<RawStats>,
    ranks: Option<RawRanks>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRating {
    aim: Option<f64>,
    positioning: Option<f64>,
    utility: Option<f64>,
    clutch: Option<f64>,
    opening: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStats {
    accuracy_enemy_spotted: Option<f64>,
    accuracy_head: Option<f64>,
    reaction_time_ms: Option<f64>,
    ct_opening_aggression_success_rate: Option<f64>,
    t_opening_aggression_success_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRanks {
    leetify: Option<f64>,
    premier: Option<u32>,
    faceit_elo: Option<u32>,
    competitive: Option<Vec<RawCompetitiveRank>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCompetitiveRank {
    map_name: Option<String>,
    rank: Option<u32>,
}

// == Normalized ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankKind {
    Premier,
    Competitive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeetifyRank {
    pub kind: RankKind,
    pub name: String,
    pub skill_level: u32,
}

impl LeetifyRank {
    pub fn display(&self) -> RankDisplay {
        let (kind, label) = match self.kind {
            RankKind::Premier => ("premier", format_premier_rank(Some(self.skill_level))),
            RankKind::Competitive => ("competitive", competitive_rank_name(self.skill_level)),
        };
        RankDisplay {
            kind: kind.to_string(),
            name: self.name.clone(),
            skill_level: self.skill_level,
            label,
        }
    }
}

/// Analytics for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeetifyData {
    pub rating: Option<f64>,
    pub aim: Option<f64>,
    pub positioning: Option<f64>,
    pub utility: Option<f64>,
    pub clutch: Option<f64>,
    pub opening: Option<f64>,
    pub rank: Option<LeetifyRank>,
    pub games_analyzed: u64,
    pub win_rate: Option<i64>,
    pub kd: Option<f64>,
    pub hltv_rating: Option<f64>,
    pub faceit_elo: Option<u32>,
    pub accuracy: Option<f64>,
    pub headshot_pct: Option<f64>,
    pub reaction_time: Option<f64>,
    pub ct_opening_success: Option<f64>,
    pub t_opening_success: Option<f64>,
}

impl From<RawProfile> for LeetifyData {
    fn from(raw: RawProfile) -> Self {
        let rating = raw.rating.unwrap_or_default();
        let stats = raw.stats.unwrap_or_default();
        let ranks = raw.ranks.unwrap_or_default();

        Self {
            rating: ranks.leetify,
            aim: rating.aim,
            positioning: rating.positioning,
            utility: rating.utility,
            clutch: rating.clutch,
            opening: rating.opening,
            rank: resolve_rank(&ranks),
            games_analyzed: raw.total_matches.unwrap_or(0),
            win_rate: raw.winrate.map(|w| (w * 100.0).round() as i64),
            kd: Some(STATIC_KD),
            hltv_rating: Some(STATIC_HLTV_RATING),
            faceit_elo: ranks.faceit_elo,
            accuracy: stats.accuracy_enemy_spotted,
            headshot_pct: stats.accuracy_head,
            reaction_time: stats.reaction_time_ms,
            ct_opening_success: stats.ct_opening_aggression_success_rate,
            t_opening_success: stats.t_opening_aggression_success_rate,
        }
    }
}

/// Premier when rated; otherwise the best competitive map rank, the first
/// one winning ties.
fn resolve_rank(ranks: &RawRanks) -> Option<LeetifyRank> {
    if let Some(premier) = ranks.premier.filter(|p| *p > 0) {
        return Some(LeetifyRank {
            kind: RankKind::Premier,
            name: "Premier".to_string(),
            skill_level: premier,
        });
    }

    let mut best: Option<(&RawCompetitiveRank, u32)> = None;
    for entry in ranks.competitive.iter().flatten() {
        let rank = entry.rank.unwrap_or(0);
        if rank > best.map_or(0, |(_, r)| r) {
            best = Some((entry, rank));
        }
    }

    best.map(|(entry, rank)| {
        let name = entry
            .map_name
            .as_deref()
            .map(|m| m.replacen("de_", "", 1).replacen("cs_", "", 1))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Competitive".to_string());
        LeetifyRank {
            kind: RankKind::Competitive,
            name,
            skill_level: rank,
        }
    })
}

#[derive(Debug, Clone)]
pub struct LeetifySource {
    ctx: SourceContext,
}

impl LeetifySource {
    pub fn new(ctx: SourceContext) -> Self {
        Self { ctx }
    }

    pub async fn fetch_profile(&self, steam_id: &str) -> Option<LeetifyData> {
        let key = format!("leetify_profile_{}", steam_id);
        if let Some(data) = self.ctx.cache.get::<LeetifyData>(&key, self.ctx.ttl()).await {
            return Some(data);
        }

        match self.request_profile(steam_id).await {
            Ok(data) => {
                self.ctx.cache.set(key, &data).await;
                Some(data)
            }
            Err(e) => {
                warn!(steam_id, error = %e, "leetify profile lookup failed");
                None
            }
        }
    }

    async fn request_profile(&self, steam_id: &str) -> Result<LeetifyData, FetchError> {
        let url = format!("{}/v3/profile", self.ctx.config.endpoints.leetify);
        let mut request = self
            .ctx
            .http
            .get(url)
            .query(&[("steam64_id", steam_id)]);
        if !self.ctx.config.leetify_api_key.is_empty() {
            request = request.bearer_auth(&self.ctx.config.leetify_api_key);
        }

        let raw: RawProfile = get_json(SOURCE, request).await?;
        Ok(raw.into())
    }
}

/// Premier rating for display: `"—"` when unrated, `"31k"` from 30000 up,
/// otherwise grouped by thousands.
pub fn format_premier_rank(skill_level: Option<u32>) -> String {
    match skill_level {
        None | Some(0) => "—".to_string(),
        Some(level) if level >= 30_000 => format!("{:.0}k", f64::from(level) / 1000.0),
        Some(level) => crate::profile::format_thousands(u64::from(level)),
    }
}
