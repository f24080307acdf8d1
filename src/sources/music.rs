//! Name slugs and MVP anthem preview URLs for music kits.
//!
//! Slug rules: lowercase, drop `, : ! ' * ~ ( ) ™`, spell out `&` and `+`,
//! turn whitespace and dash runs into a single dash, trim edge dashes, then
//! consult the override table.

use crate::catalog::{MUSIC_KIT_EXCLUDED, MUSIC_KIT_PREVIEW_BASE_URL, MUSIC_KIT_SLUG_OVERRIDES};

/// Converts a display name into the preview host's URL slug.
///
/// `"Skog, III-Arena"` becomes `"skog-iii-arena"`.
pub fn to_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        match c {
            ',' | ':' | '!' | '\'' | '*' | '~' | '(' | ')' | '™' => {}
            '&' => slug.push_str("and"),
            '+' => slug.push_str("plus"),
            c if c.is_whitespace() || c == '-' => {
                if !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            c => slug.push(c),
        }
    }

    let trimmed = slug.strip_prefix('-').unwrap_or(&slug);
    let trimmed = trimmed.strip_suffix('-').unwrap_or(trimmed);

    MUSIC_KIT_SLUG_OVERRIDES
        .iter()
        .find(|(from, _)| *from == trimmed)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Removes a leading `StatTrak` / `StatTrak™` marker (any case) and the
/// whitespace after it.
fn strip_stat_trak_prefix(name: &str) -> &str {
    const MARKER: &str = "stattrak";
    match name.get(..MARKER.len()) {
        Some(head) if head.eq_ignore_ascii_case(MARKER) => {
            let rest = &name[MARKER.len()..];
            rest.strip_prefix('™').unwrap_or(rest).trim_start()
        }
        _ => name,
    }
}

/// MVP anthem URL for a kit.
pub fn preview_url(kit_name: &str, is_stat_trak: bool) -> String {
    let slug = to_slug(strip_stat_trak_prefix(kit_name));
    let prefix = if is_stat_trak {
        "stattrak-music-kit-"
    } else {
        "music-kit-"
    };
    format!("{}{}{}/mvp-anthem.mp3", MUSIC_KIT_PREVIEW_BASE_URL, prefix, slug)
}

/// Candidate URLs in the order a player should try them.
pub fn preview_urls(kit_name: &str, is_stat_trak: bool) -> Vec<String> {
    if is_stat_trak {
        vec![preview_url(kit_name, true), preview_url(kit_name, false)]
    } else {
        vec![preview_url(kit_name, false)]
    }
}

/// False for kit families the preview host does not carry.
pub fn has_preview(kit_name: &str) -> bool {
    let slug = to_slug(kit_name);
    !MUSIC_KIT_EXCLUDED.iter().any(|family| slug.contains(family))
}

/// Preview URL, or `None` for excluded kits.
pub fn find_preview(kit_name: &str, is_stat_trak: bool) -> Option<String> {
    has_preview(kit_name).then(|| preview_url(kit_name, is_stat_trak))
}
