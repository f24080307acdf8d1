//! Profile aggregation
//!
//! One `build_profile` call fans out to every source at once, waits for all
//! of them (each bounded by the aggregation deadline) and folds the results
//! into a `ProfileViewModel`.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, warn};

use crate::cache::Cache;
use crate::catalog::{DEFAULT_PLAYER_NAME, PLAYER_ROLES, PROFILE_CLIP_LIMIT, PROFILE_CONTEXT};
use crate::config::Config;
use crate::error::{ProfileError, Result};
use crate::fallback::{load_fallback_clips, stats_snapshot, StatsSnapshot};
use crate::models::{ClutchStats, ProfileIdentity, ProfileViewModel};
use crate::profile::metrics::assemble_metrics;
use crate::sources::{
    AllstarSource, LeetifySource, SourceContext, SteamPlayer, SteamSource, TeammateSource,
};

/// Aggregates every source into the profile view model.
#[derive(Debug, Clone)]
pub struct ProfileService {
    config: Arc<Config>,
    cache: Cache,
    steam: SteamSource,
    leetify: LeetifySource,
    allstar: AllstarSource,
    teammates: TeammateSource,
}

impl ProfileService {
    /// Creates a service with its own cache sized from the configuration.
    pub fn new(config: Config) -> Result<Self> {
        let cache = Cache::new(config.max_cache_entries);
        Self::with_cache(config, cache)
    }

    /// Creates a service on top of an existing cache handle.
    pub fn with_cache(config: Config, cache: Cache) -> Result<Self> {
        let config = Arc::new(config);
        let ctx = SourceContext::new(Arc::clone(&config), cache.clone())?;
        let fallback = load_fallback_clips(config.fallback_clips_path.as_deref());

        let steam = SteamSource::new(ctx.clone());
        let leetify = LeetifySource::new(ctx.clone());
        let allstar = AllstarSource::new(ctx, fallback);
        let teammates = TeammateSource::new(steam.clone(), leetify.clone(), Arc::clone(&config));

        Ok(Self {
            config,
            cache,
            steam,
            leetify,
            allstar,
            teammates,
        })
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the profile of the configured player.
    ///
    /// Fails only when the Steam key or id is missing; every source problem
    /// degrades to an absent field instead.
    pub async fn build_profile(&self) -> Result<ProfileViewModel> {
        if !self.config.is_usable() {
            return Err(ProfileError::NotConfigured(
                "STEAM_API_KEY and STEAM_ID must be set".to_string(),
            ));
        }

        let started = Instant::now();
        let steam_id = self.config.steam_id.as_str();
        let deadline = Duration::from_secs(self.config.aggregation_deadline_secs);

        let (player, playtime, leetify, highlights, teammates, medals, music_kits, weapon_skins) = tokio::join!(
            within(deadline, "player", self.steam.fetch_player(steam_id)),
            within(deadline, "playtime", self.steam.fetch_playtime(steam_id)),
            within(deadline, "leetify", self.leetify.fetch_profile(steam_id)),
            within(
                deadline,
                "clips",
                self.allstar.fetch_clips(steam_id, PROFILE_CLIP_LIMIT)
            ),
            within(deadline, "teammates", self.teammates.fetch_teammates()),
            within(deadline, "medals", self.steam.fetch_medals(steam_id)),
            within(deadline, "music_kits", self.steam.fetch_music_kits(steam_id)),
            within(deadline, "weapon_skins", self.steam.fetch_weapon_skins(steam_id)),
        );

        let stats = stats_snapshot();
        let metrics = assemble_metrics(leetify.as_ref(), &stats, playtime);

        let identity = ProfileIdentity {
            steam_id: steam_id.to_string(),
            handle: player
                .as_ref()
                .map(|p| p.personaname.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string()),
            context: PROFILE_CONTEXT.to_string(),
            avatar_url: player.as_ref().and_then(avatar_of),
            profile_url: player
                .as_ref()
                .map(|p| p.profileurl.clone())
                .filter(|url| !url.is_empty()),
            medals,
            crosshair: stats.crosshair.clone(),
            rank: leetify
                .as_ref()
                .and_then(|l| l.rank.as_ref())
                .map(|rank| rank.display()),
            roles: PLAYER_ROLES.iter().map(|r| r.to_string()).collect(),
        };

        let profile = ProfileViewModel {
            identity,
            metrics,
            clutch_stats: clutch_stats(&stats),
            highlights,
            teammates,
            music_kits,
            weapon_skins,
            last_updated: Utc::now().to_rfc3339(),
        };

        info!(
            steam_id,
            metrics = profile.metrics.len(),
            clips = profile.highlights.len(),
            teammates = profile.teammates.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "profile built"
        );

        Ok(profile)
    }
}

/// Runs `branch`, substituting its neutral value if the deadline passes.
async fn within<F>(deadline: Duration, branch: &'static str, fut: F) -> F::Output
where
    F: Future,
    F::Output: Default,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(value) => value,
        Err(_) => {
            warn!(branch, "source missed the aggregation deadline");
            Default::default()
        }
    }
}

/// Full-size avatar, else the medium one.
fn avatar_of(player: &SteamPlayer) -> Option<String> {
    [&player.avatarfull, &player.avatarmedium]
        .into_iter()
        .find(|url| !url.is_empty())
        .cloned()
}

fn clutch_stats(stats: &StatsSnapshot) -> ClutchStats {
    ClutchStats {
        clutch_1v1: stats.clutch_1v1,
        clutch_1v2: stats.clutch_1v2,
        clutch_1v3: stats.clutch_1v3,
        clutch_1v4: stats.clutch_1v4,
        clutch_1v5: stats.clutch_1v5,
    }
}
