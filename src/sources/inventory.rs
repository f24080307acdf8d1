//! Inventory descriptor decoding and classification
//!
//! Turns the raw Steam Community inventory descriptors into medals, music
//! kits and loadout weapon skins. Everything here is pure; fetching and
//! caching live in the Steam adapter.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::catalog::{
    weapon_category, INVENTORY_EXCLUDE_PATTERNS, INVENTORY_INCLUDE_PATTERNS, LOADOUT_WEAPONS,
};
use crate::models::{Medal, MusicKit, Sticker, WeaponSkin};
use crate::sources::music;

// == Raw Descriptors ==
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct InventoryResponse {
    #[serde(default)]
    pub descriptions: Option<Vec<InventoryItem>>,
}

/// One item description as returned by the inventory endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub market_name: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default, rename = "type")]
    pub item_type: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<ItemTag>>,
    #[serde(default)]
    pub descriptions: Option<Vec<DescriptionLine>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemTag {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub localized_tag_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescriptionLine {
    #[serde(default)]
    pub value: Option<String>,
}

impl InventoryItem {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    fn item_type(&self) -> &str {
        self.item_type.as_deref().unwrap_or_default()
    }

    fn tags(&self) -> impl Iterator<Item = &ItemTag> {
        self.tags.iter().flatten()
    }

    fn tag(&self, category: &str) -> Option<&ItemTag> {
        self.tags()
            .find(|t| t.category.as_deref() == Some(category))
    }

    fn description_lines(&self) -> impl Iterator<Item = &str> {
        self.descriptions
            .iter()
            .flatten()
            .filter_map(|d| d.value.as_deref())
    }

    fn icon(&self, cdn: &str) -> String {
        format!("{}/{}", cdn, self.icon_url.as_deref().unwrap_or_default())
    }
}

impl ItemTag {
    fn name(&self) -> &str {
        self.localized_tag_name.as_deref().unwrap_or_default()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// == Medals ==
/// Whether an item is a medal / collectible.
///
/// Exclusion on type or name is checked first; inclusion then matches type,
/// name, market name, or the localized name of a `Type` tag.
pub fn is_medal(item: &InventoryItem) -> bool {
    let item_type = item.item_type();
    let name = item.name();
    let market_name = item.market_name.as_deref().unwrap_or_default();

    let excluded = INVENTORY_EXCLUDE_PATTERNS
        .iter()
        .any(|ex| contains_ci(item_type, ex) || contains_ci(name, ex));
    if excluded {
        return false;
    }

    let collectible = INVENTORY_INCLUDE_PATTERNS.iter().any(|inc| {
        contains_ci(item_type, inc) || contains_ci(name, inc) || contains_ci(market_name, inc)
    });

    let collectible_tag = item.tags().any(|tag| {
        tag.category.as_deref() == Some("Type")
            && INVENTORY_INCLUDE_PATTERNS
                .iter()
                .any(|inc| contains_ci(tag.name(), inc))
    });

    collectible || collectible_tag
}

/// First `20xx` year appearing in `name`.
pub fn year_key(name: &str) -> Option<u32> {
    name.as_bytes().windows(4).find_map(|w| match w {
        [b'2', b'0', d1, d2] if d1.is_ascii_digit() && d2.is_ascii_digit() => {
            Some(2000 + u32::from(d1 - b'0') * 10 + u32::from(d2 - b'0'))
        }
        _ => None,
    })
}

/// Medals sorted newest year first; undated medals keep their relative
/// order at the end.
pub fn classify_medals(items: &[InventoryItem], cdn: &str) -> Vec<Medal> {
    let mut medals: Vec<Medal> = items
        .iter()
        .filter(|item| is_medal(item))
        .map(|item| Medal {
            name: item.name().to_string(),
            icon_url: item.icon(cdn),
            kind: item.item_type().to_string(),
        })
        .collect();

    medals.sort_by_key(|m| Reverse(year_key(&m.name)));
    medals
}

// == Music Kits ==
pub fn extract_music_kits(items: &[InventoryItem], cdn: &str) -> Vec<MusicKit> {
    items
        .iter()
        .filter(|item| contains_ci(item.item_type(), "music kit"))
        .map(|item| {
            let raw_name = item.name();
            let name = raw_name
                .replacen("Music Kit | ", "", 1)
                .replacen("StatTrak™ ", "", 1);
            let artist = match raw_name.split_once('|') {
                Some((head, _)) => head
                    .replacen("Music Kit", "", 1)
                    .replacen("StatTrak™", "", 1)
                    .trim()
                    .to_string(),
                None => String::new(),
            };
            let preview_url = music::find_preview(&name, false);

            MusicKit {
                artist,
                icon_url: item.icon(cdn),
                is_stat_trak: raw_name.contains("StatTrak"),
                preview_url,
                name,
            }
        })
        .collect()
}

// == Weapon Skins ==
/// Removes `<...>` tags; an unclosed `<` is kept.
pub fn strip_html_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        match rest[start..].find('>') {
            Some(end) => rest = &rest[start + end + 1..],
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Removes `&name;` entities; a bare `&` or `&;` is kept.
pub fn strip_html_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        match rest[start + 1..].find(';') {
            Some(len) if len > 0 => rest = &rest[start + 1 + len + 1..],
            _ => {
                out.push('&');
                rest = &rest[start + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Text following `marker` and any whitespace, up to the end of that line.
fn capture_after<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let idx = text.find(marker)?;
    let tail = text[idx + marker.len()..].trim_start();
    let line = tail
        .split(|c: char| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'))
        .next()
        .unwrap_or_default();
    (!line.is_empty()).then_some(line)
}

/// Stickers from the first description line mentioning them.
pub fn parse_stickers(lines: &[&str]) -> Vec<Sticker> {
    let Some(line) = lines
        .iter()
        .find(|v| v.contains("Sticker:") || v.contains("sticker_info"))
    else {
        return Vec::new();
    };

    let clean = strip_html_entities(&strip_html_tags(line));
    capture_after(clean.trim(), "Sticker:")
        .map(|names| {
            names
                .split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .enumerate()
                .map(|(slot, name)| Sticker {
                    name: name.to_string(),
                    slot,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Charm name from the first description line mentioning one.
pub fn parse_charm(lines: &[&str]) -> Option<String> {
    let line = lines.iter().find(|v| v.contains("Charm:"))?;
    let clean = strip_html_tags(line);
    capture_after(clean.trim(), "Charm:")
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

fn loadout_weapon(item: &InventoryItem) -> Option<&ItemTag> {
    let tag = item.tag("Weapon")?;
    let weapon = tag.name().to_lowercase();
    LOADOUT_WEAPONS
        .iter()
        .any(|w| weapon.contains(w))
        .then_some(tag)
}

pub fn extract_weapon_skins(items: &[InventoryItem], cdn: &str) -> Vec<WeaponSkin> {
    items
        .iter()
        .filter_map(|item| {
            let weapon_tag = loadout_weapon(item)?;
            let lines: Vec<&str> = item.description_lines().collect();
            let stickers = parse_stickers(&lines);
            let weapon = match weapon_tag.name() {
                "" => "Unknown".to_string(),
                name => name.to_string(),
            };

            Some(WeaponSkin {
                category: weapon_category(&weapon).to_string(),
                weapon,
                name: item.name().to_string(),
                icon_url: item.icon(cdn),
                rarity: item
                    .tag("Rarity")
                    .map(ItemTag::name)
                    .filter(|r| !r.is_empty())
                    .unwrap_or("Common")
                    .to_string(),
                is_stat_trak: item.name().contains("StatTrak"),
                stickers: (!stickers.is_empty()).then_some(stickers),
                charm: parse_charm(&lines),
            })
        })
        .collect()
}
