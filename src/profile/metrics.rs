//! Stat grid assembly and number formatting.

use crate::catalog::MAX_METRICS;
use crate::fallback::StatsSnapshot;
use crate::models::Metric;
use crate::sources::{format_playtime, LeetifyData};

/// Placeholder for a value nobody reported.
pub const MISSING: &str = "—";

/// Fixed-point rendering, or `"—"` for a missing value.
pub fn format_decimal(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => MISSING.to_string(),
    }
}

/// `1234567` becomes `"1,234,567"`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn percent(value: Option<f64>) -> String {
    format!("{}%", format_decimal(value, 1))
}

/// Builds the stat grid in display order, at most nine tiles.
///
/// Optional tiles are dropped, not shown empty; the static snapshot always
/// supplies HLTV, K/D and HS%.
pub fn assemble_metrics(
    leetify: Option<&LeetifyData>,
    stats: &StatsSnapshot,
    playtime_minutes: Option<u64>,
) -> Vec<Metric> {
    let mut metrics = Vec::with_capacity(MAX_METRICS);

    if let Some(rating) = leetify.and_then(|l| l.rating).filter(|r| *r != 0.0) {
        metrics.push(Metric::new("Leetify", format_decimal(Some(rating), 2)));
    }

    metrics.push(Metric::new("HLTV 2.0", format_decimal(stats.hltv_rating, 2)));
    metrics.push(Metric::new("K/D", format_decimal(stats.kd, 2)));

    if let Some(ct) = leetify.and_then(|l| l.ct_opening_success) {
        metrics.push(Metric::new("CT Opening Attempt", percent(Some(ct))));
    }
    if let Some(t) = leetify.and_then(|l| l.t_opening_success) {
        metrics.push(Metric::new("T Opening Attempt", percent(Some(t))));
    }
    if let Some(reaction) = leetify.and_then(|l| l.reaction_time) {
        metrics.push(Metric::new("Reaction", format!("{}ms", reaction.round() as i64)));
    }

    metrics.push(Metric::new("HS%", percent(stats.hs_percent)));

    if let Some(minutes) = playtime_minutes.filter(|m| *m > 0) {
        metrics.push(Metric::new("Playtime", format_playtime(minutes)));
    }

    if let Some(games) = leetify.map(|l| l.games_analyzed).filter(|g| *g > 0) {
        metrics.push(Metric::new("Matches", format_thousands(games)));
    }

    metrics.truncate(MAX_METRICS);
    metrics
}
