//! Configuration Module
//!
//! Resolves API credentials, the target identity and service settings from
//! environment variables.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

// == Endpoints ==
/// Base URLs of the upstream APIs.
///
/// Overridable so the adapters can be pointed at a local stub server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub steam: String,
    pub steam_community: String,
    pub steam_cdn: String,
    pub leetify: String,
    pub allstar: String,
    pub allstar_media: String,
    pub allstar_embed: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            steam: "https://api.steampowered.com".to_string(),
            steam_community: "https://steamcommunity.com".to_string(),
            steam_cdn: "https://steamcommunity-a.akamaihd.net/economy/image".to_string(),
            leetify: "https://api-public.cs-prod.leetify.com".to_string(),
            allstar: "https://prt.allstar.gg".to_string(),
            allstar_media: "https://media.allstar.gg/clips".to_string(),
            allstar_embed: "https://allstar.gg/iframe".to_string(),
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Steam Web API key
    pub steam_api_key: String,
    /// Steam64 id of the profile owner
    pub steam_id: String,
    /// Optional Leetify bearer token
    pub leetify_api_key: String,
    /// Allstar partner API key
    pub allstar_api_key: String,
    /// Allstar public API key, preferred over the partner key
    pub allstar_public_api_key: String,
    /// Allstar username used when the Steam id lookup finds no clips
    pub allstar_username: String,
    /// Max age in seconds of cached upstream data
    pub cache_ttl: u64,
    /// Upper bound on cached entries
    pub max_cache_entries: usize,
    /// Companion Steam ids, in display order
    pub teammate_ids: Vec<String>,
    /// Roles keyed by companion Steam id
    pub teammate_roles: HashMap<String, Vec<String>>,
    /// HTTP server port
    pub server_port: u16,
    /// Timeout for each upstream request
    pub request_timeout_secs: u64,
    /// Hard deadline for every branch of one aggregation
    pub aggregation_deadline_secs: u64,
    /// JSON file replacing the embedded fallback clip list
    pub fallback_clips_path: Option<PathBuf>,
    pub endpoints: Endpoints,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STEAM_API_KEY`, `STEAM_ID` - required for a usable profile
    /// - `LEETIFY_API_KEY` - optional bearer token
    /// - `ALLSTAR_API_KEY`, `ALLSTAR_PUBLIC_API_KEY`, `ALLSTAR_USERNAME`
    /// - `CACHE_TTL` - seconds (default: 300)
    /// - `MAX_CACHE_ENTRIES` - (default: 1000)
    /// - `TEAMMATE_IDS` - comma-separated Steam ids
    /// - `TEAMMATE_ROLES` - `id:Role|Role;id:Role` (optional)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `REQUEST_TIMEOUT_SECS` - (default: 5)
    /// - `AGGREGATION_DEADLINE_SECS` - (default: 10)
    /// - `FALLBACK_CLIPS_PATH` - optional clip list file
    /// - `STEAM_API_BASE`, `STEAM_COMMUNITY_BASE`, `LEETIFY_API_BASE`, `ALLSTAR_API_BASE`
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |name: &str| lookup(name).unwrap_or_default();
        let defaults = Self::default();
        let mut endpoints = Endpoints::default();
        if let Some(base) = lookup("STEAM_API_BASE") {
            endpoints.steam = base.trim_end_matches('/').to_string();
        }
        if let Some(base) = lookup("STEAM_COMMUNITY_BASE") {
            endpoints.steam_community = base.trim_end_matches('/').to_string();
        }
        if let Some(base) = lookup("LEETIFY_API_BASE") {
            endpoints.leetify = base.trim_end_matches('/').to_string();
        }
        if let Some(base) = lookup("ALLSTAR_API_BASE") {
            endpoints.allstar = base.trim_end_matches('/').to_string();
        }

        Self {
            steam_api_key: text("STEAM_API_KEY"),
            steam_id: text("STEAM_ID"),
            leetify_api_key: text("LEETIFY_API_KEY"),
            allstar_api_key: text("ALLSTAR_API_KEY"),
            allstar_public_api_key: text("ALLSTAR_PUBLIC_API_KEY"),
            allstar_username: text("ALLSTAR_USERNAME"),
            cache_ttl: lookup("CACHE_TTL")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl),
            max_cache_entries: lookup("MAX_CACHE_ENTRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_cache_entries),
            teammate_ids: parse_id_list(&text("TEAMMATE_IDS")),
            teammate_roles: parse_role_map(&text("TEAMMATE_ROLES")),
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            aggregation_deadline_secs: lookup("AGGREGATION_DEADLINE_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.aggregation_deadline_secs),
            fallback_clips_path: lookup("FALLBACK_CLIPS_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            endpoints,
        }
    }

    /// True when the Steam API key and the target identity are both set.
    pub fn is_usable(&self) -> bool {
        !self.steam_api_key.is_empty() && !self.steam_id.is_empty()
    }

    /// Allstar key to send, preferring the public key.
    pub fn allstar_key(&self) -> Option<&str> {
        [&self.allstar_public_api_key, &self.allstar_api_key]
            .into_iter()
            .find(|key| !key.is_empty())
            .map(String::as_str)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            steam_api_key: String::new(),
            steam_id: String::new(),
            leetify_api_key: String::new(),
            allstar_api_key: String::new(),
            allstar_public_api_key: String::new(),
            allstar_username: String::new(),
            cache_ttl: 300,
            max_cache_entries: 1000,
            teammate_ids: Vec::new(),
            teammate_roles: HashMap::new(),
            server_port: 3000,
            request_timeout_secs: 5,
            aggregation_deadline_secs: 10,
            fallback_clips_path: None,
            endpoints: Endpoints::default(),
        }
    }
}

/// Splits a comma-delimited id list, trimming and dropping empty entries.
pub fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `id:Role|Role;id:Role` into an identity-keyed role map.
///
/// Entries without an id or without any role are ignored.
pub fn parse_role_map(raw: &str) -> HashMap<String, Vec<String>> {
    raw.split(';')
        .filter_map(|entry| {
            let (id, roles) = entry.split_once(':')?;
            let id = id.trim();
            let roles: Vec<String> = roles
                .split('|')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .collect();
            if id.is_empty() || roles.is_empty() {
                None
            } else {
                Some((id.to_string(), roles))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl, 300);
        assert_eq!(config.max_cache_entries, 1000);
        assert_eq!(config.server_port, 3000);
        assert!(!config.is_usable());
    }

    #[test]
    fn test_config_from_empty_lookup_uses_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.cache_ttl, 300);
        assert_eq!(config.request_timeout_secs, 5);
        assert!(config.teammate_ids.is_empty());
        assert_eq!(config.endpoints.leetify, Endpoints::default().leetify);
    }

    #[test]
    fn test_usable_requires_key_and_identity() {
        let config = Config::from_lookup(lookup_from(&[("STEAM_API_KEY", "k")]));
        assert!(!config.is_usable());

        let config = Config::from_lookup(lookup_from(&[
            ("STEAM_API_KEY", "k"),
            ("STEAM_ID", "76561198000000000"),
        ]));
        assert!(config.is_usable());
    }

    #[test]
    fn test_teammate_ids_trimmed_and_empties_dropped() {
        let config = Config::from_lookup(lookup_from(&[("TEAMMATE_IDS", " a , ,b,, c ")]));
        assert_eq!(config.teammate_ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_invalid_ttl_falls_back_to_default() {
        let config = Config::from_lookup(lookup_from(&[("CACHE_TTL", "soon")]));
        assert_eq!(config.cache_ttl, 300);

        let config = Config::from_lookup(lookup_from(&[("CACHE_TTL", "60")]));
        assert_eq!(config.cache_ttl, 60);
    }

    #[test]
    fn test_allstar_key_prefers_public_key() {
        let config = Config::from_lookup(lookup_from(&[
            ("ALLSTAR_API_KEY", "partner"),
            ("ALLSTAR_PUBLIC_API_KEY", "public"),
        ]));
        assert_eq!(config.allstar_key(), Some("public"));

        let config = Config::from_lookup(lookup_from(&[("ALLSTAR_API_KEY", "partner")]));
        assert_eq!(config.allstar_key(), Some("partner"));

        assert_eq!(Config::default().allstar_key(), None);
    }

    #[test]
    fn test_role_map_parsing() {
        let roles = parse_role_map("111:Entry|AWPer; 222 : IGL ;bad;333:");
        assert_eq!(roles.len(), 2);
        assert_eq!(roles["111"], vec!["Entry", "AWPer"]);
        assert_eq!(roles["222"], vec!["IGL"]);
    }

    #[test]
    fn test_endpoint_overrides() {
        let config = Config::from_lookup(lookup_from(&[("LEETIFY_API_BASE", "http://127.0.0.1:9")]));
        assert_eq!(config.endpoints.leetify, "http://127.0.0.1:9");
        assert_eq!(config.endpoints.steam, Endpoints::default().steam);
    }
}
