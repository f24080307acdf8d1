//! Companion profiles built from the configured teammate ids.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::{DEFAULT_TEAMMATE_ROLES, TEAMMATE_ROLES_BY_INDEX};
use crate::config::Config;
use crate::models::Teammate;
use crate::sources::leetify::LeetifySource;
use crate::sources::steam::SteamSource;

#[derive(Debug, Clone)]
pub struct TeammateSource {
    steam: SteamSource,
    leetify: LeetifySource,
    config: Arc<Config>,
}

impl TeammateSource {
    pub fn new(steam: SteamSource, leetify: LeetifySource, config: Arc<Config>) -> Self {
        Self {
            steam,
            leetify,
            config,
        }
    }

    /// Teammates in configured order. Ids Steam cannot resolve are skipped;
    /// analytics are attached when Leetify has them.
    pub async fn fetch_teammates(&self) -> Vec<Teammate> {
        let mut teammates = Vec::with_capacity(self.config.teammate_ids.len());

        for (index, steam_id) in self.config.teammate_ids.iter().enumerate() {
            let Some(player) = self.steam.fetch_player(steam_id).await else {
                debug!(steam_id = %steam_id, "skipping unresolved teammate");
                continue;
            };
            let analytics = self.leetify.fetch_profile(steam_id).await;

            let profile_url = if player.profileurl.is_empty() {
                format!("https://steamcommunity.com/profiles/{}", steam_id)
            } else {
                player.profileurl
            };

            teammates.push(Teammate {
                steam_id: steam_id.clone(),
                name: player.personaname,
                profile_url,
                avatar_url: Some(player.avatar).filter(|a| !a.is_empty()),
                roles: roles_for(index, steam_id, &self.config.teammate_roles),
                leetify_rating: analytics.as_ref().and_then(|a| a.rating),
                aim: analytics.as_ref().and_then(|a| a.aim),
                positioning: analytics.as_ref().and_then(|a| a.positioning),
                utility: analytics.as_ref().and_then(|a| a.utility),
                clutch: analytics.as_ref().and_then(|a| a.clutch),
                opening: analytics.as_ref().and_then(|a| a.opening),
            });
        }

        teammates
    }
}

/// Roles for the teammate at `index`: the identity map wins, then the
/// positional table, then the default.
pub fn roles_for(index: usize, steam_id: &str, by_identity: &HashMap<String, Vec<String>>) -> Vec<String> {
    if let Some(roles) = by_identity.get(steam_id) {
        return roles.clone();
    }

    let roles = TEAMMATE_ROLES_BY_INDEX
        .iter()
        .find(|(i, _)| *i == index)
        .map(|(_, roles)| *roles)
        .unwrap_or(DEFAULT_TEAMMATE_ROLES);
    roles.iter().map(|r| r.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_roles() {
        let empty = HashMap::new();
        assert_eq!(roles_for(0, "a", &empty), vec!["Lurker", "Support"]);
        assert_eq!(roles_for(1, "b", &empty), vec!["Support", "Anchor", "Cier-Moment"]);
        assert_eq!(roles_for(2, "c", &empty), vec!["Rifler"]);
    }

    #[test]
    fn test_identity_roles_take_precedence() {
        let mut map = HashMap::new();
        map.insert("c".to_string(), vec!["AWPer".to_string()]);
        assert_eq!(roles_for(0, "c", &map), vec!["AWPer"]);
        assert_eq!(roles_for(0, "a", &map), vec!["Lurker", "Support"]);
    }
}
