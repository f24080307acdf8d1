//! Static tables: item classification keywords, rank names, role defaults
//! and presentation constants shared by the adapters and the pipeline.

/// Steam app id of Counter-Strike 2.
pub const CS2_APP_ID: u32 = 730;

/// Descriptors requested from the inventory endpoint.
pub const INVENTORY_PAGE_SIZE: u32 = 500;

/// Context line shown under the handle.
pub const PROFILE_CONTEXT: &str = "Counter-Strike 2";

/// Handle used when the Steam player lookup fails.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Roles of the profile owner.
pub const PLAYER_ROLES: &[&str] = &["AWPer", "IGL/Entry", "Clutcher", "Team Player"];

/// Teammate roles by position in `TEAMMATE_IDS`.
pub const TEAMMATE_ROLES_BY_INDEX: &[(usize, &[&str])] = &[
    (0, &["Lurker", "Support"]),
    (1, &["Support", "Anchor", "Cier-Moment"]),
];

/// Roles for a teammate with neither an identity nor a positional entry.
pub const DEFAULT_TEAMMATE_ROLES: &[&str] = &["Rifler"];

/// Lowercase substrings of the weapons shown in the loadout.
pub const LOADOUT_WEAPONS: &[&str] = &[
    "glock",
    "usp",
    "p250",
    "ak-47",
    "m4a4",
    "m4a1",
    "awp",
    "desert eagle",
    "deagle",
    "ssg",
    "scout",
];

/// Loadout grouping; first matching category wins.
pub const WEAPON_CATEGORIES: &[(&str, &[&str])] = &[
    ("Pistols", &["glock", "usp", "p250", "desert eagle"]),
    ("Rifles", &["ak-47", "m4a4", "m4a1"]),
    ("Snipers", &["awp", "ssg"]),
];

pub const OTHER_WEAPON_CATEGORY: &str = "Other";

/// Inventory items rejected before medal classification.
pub const INVENTORY_EXCLUDE_PATTERNS: &[&str] = &[
    "Graffiti",
    "Sticker",
    "Case",
    "Key",
    "Container",
    "Patch",
    "Agent",
    "Music Kit",
    "Capsule",
    "Package",
    "Souvenir",
    "StatTrak",
];

/// Inventory items accepted as medals / collectibles.
pub const INVENTORY_INCLUDE_PATTERNS: &[&str] = &[
    "Service Medal",
    "Coin",
    "Trophy",
    "Pin",
    "Badge",
    "Collectible",
    "Medal",
    "Pick'Em",
    "Extraordinary Collectible",
    "Extraordinary",
    "High Grade Collectible",
    "Remarkable Collectible",
];

/// Competitive skill groups, indexed by Leetify's numeric rank.
pub const CS2_RANKS: &[&str] = &[
    "",
    "Silver I",
    "Silver II",
    "Silver III",
    "Silver IV",
    "Silver Elite",
    "Silver Elite Master",
    "Gold Nova I",
    "Gold Nova II",
    "Gold Nova III",
    "Gold Nova Master",
    "Master Guardian I",
    "Master Guardian II",
    "Master Guardian Elite",
    "Distinguished Master Guardian",
    "Legendary Eagle",
    "Legendary Eagle Master",
    "Supreme Master First Class",
    "Global Elite",
];

pub const MUSIC_KIT_PREVIEW_BASE_URL: &str = "https://wiki.cs.money/audio/";

/// Slugs whose mechanical derivation does not match the preview host.
pub const MUSIC_KIT_SLUG_OVERRIDES: &[(&str, &str)] = &[
    ("skog-metal", "skog-i-metal"),
    ("skog-ii-headshot", "skog-ii-headshot"),
    ("skog-iii-arena", "skog-iii-arena"),
];

/// Kit families without a hosted preview.
pub const MUSIC_KIT_EXCLUDED: &[&str] = &["csgo", "hades", "valve"];

pub const DEFAULT_CLIP_DURATION: f64 = 15.0;
pub const DEFAULT_CLIP_TITLE: &str = "Highlight";

/// Clips requested by the profile page.
pub const PROFILE_CLIP_LIMIT: usize = 50;

/// Upper bound on metrics shown in the stat grid.
pub const MAX_METRICS: usize = 9;

/// Display name of a competitive rank number.
pub fn competitive_rank_name(rank: u32) -> String {
    match CS2_RANKS.get(rank as usize) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Rank {}", rank),
    }
}

/// Loadout category of a weapon tag name.
pub fn weapon_category(weapon: &str) -> &'static str {
    let weapon = weapon.to_lowercase();
    WEAPON_CATEGORIES
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| weapon.contains(p)))
        .map(|(name, _)| *name)
        .unwrap_or(OTHER_WEAPON_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competitive_rank_names() {
        assert_eq!(competitive_rank_name(1), "Silver I");
        assert_eq!(competitive_rank_name(18), "Global Elite");
        assert_eq!(competitive_rank_name(0), "Rank 0");
        assert_eq!(competitive_rank_name(42), "Rank 42");
    }

    #[test]
    fn test_weapon_categories() {
        assert_eq!(weapon_category("Desert Eagle"), "Pistols");
        assert_eq!(weapon_category("AK-47"), "Rifles");
        assert_eq!(weapon_category("M4A1-S"), "Rifles");
        assert_eq!(weapon_category("SSG 08"), "Snipers");
        assert_eq!(weapon_category("Nova"), "Other");
    }
}
