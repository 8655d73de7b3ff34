//! Discover: preference-weighted re-ranking of the catalogue.
//!
//! Each surviving tea gets `score × multiplier`, where the multiplier stacks
//! the caffeine, liked-type, flavor and price adjustments. The whole set is
//! then normalised against `max(10, best adjusted score)` so nothing lands
//! above 10 and nothing below 10 is stretched upward.

use crate::catalogue::descending_nan_last;
use crate::types::profile::PreferenceProfile;
use crate::types::record::TeaRecord;
use serde::Serialize;

pub const SCORE_CEILING: f64 = 10.0;
const LIKED_TYPE_BOOST: f64 = 1.1;
const LEVEL_STEP: f64 = 0.1;
const LEVEL_OFFSET: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTea {
    pub tea: TeaRecord,
    pub multiplier: f64,
    pub adjusted_score: f64,
    pub normalized_score: f64,
}

/// Re-ranks `records` for `profile`. Disliked types are dropped outright;
/// an empty result is a valid outcome.
pub fn rerank(records: &[TeaRecord], profile: &PreferenceProfile) -> Vec<RankedTea> {
    let mut ranked = records
        .iter()
        .filter_map(|record| {
            let multiplier = multiplier(record, profile)?;
            Some(RankedTea {
                tea: record.clone(),
                multiplier,
                adjusted_score: record.score * multiplier,
                normalized_score: f64::NAN,
            })
        })
        .collect::<Vec<_>>();

    let scale = scale_factor(ranked.iter().map(|entry| entry.adjusted_score));
    for entry in &mut ranked {
        entry.normalized_score = normalize(entry.adjusted_score, scale);
    }
    ranked.sort_by(|a, b| descending_nan_last(a.normalized_score, b.normalized_score));

    tracing::debug!(
        input = records.len(),
        matches = ranked.len(),
        scale,
        "discover rerank complete"
    );
    ranked
}

/// Combined multiplier for one record, or `None` when its type is disliked.
pub fn multiplier(record: &TeaRecord, profile: &PreferenceProfile) -> Option<f64> {
    let mut multiplier = 1.0;

    if let (Some(direction), Some(level)) = (profile.caffeine.direction(), record.caffeine_level) {
        multiplier *= level_adjustment(direction, level);
    }

    if profile.liked_types.contains(&record.tea_type) {
        multiplier *= LIKED_TYPE_BOOST;
    }

    if let (Some(direction), Some(level)) = (profile.flavor.direction(), record.sweetness_level) {
        multiplier *= level_adjustment(direction, level);
    }

    if profile.disliked_types.contains(&record.tea_type) {
        return None;
    }

    if let Some(max_price) = profile.max_price {
        multiplier *= price_penalty(record.price_per_portion, max_price);
    }

    Some(multiplier)
}

/// `1 + direction × (0.1 × level − 0.15)`: ±15% at the ends of the 0..=3 scale.
pub fn level_adjustment(direction: f64, level: u8) -> f64 {
    1.0 + direction * (LEVEL_STEP * f64::from(level) - LEVEL_OFFSET)
}

/// `1 / (1 + log2(price / max_price))` above the cap, `1` otherwise. The log
/// is taken as a difference so a tiny cap cannot overflow the ratio to zero.
pub fn price_penalty(price: f64, max_price: f64) -> f64 {
    if max_price <= 0.0 || !max_price.is_finite() || !price.is_finite() || price <= max_price {
        return 1.0;
    }
    1.0 / (1.0 + (price.log2() - max_price.log2()))
}

/// Identity at the 10 floor, so scores under the ceiling come back bit-for-bit.
fn normalize(adjusted: f64, scale: f64) -> f64 {
    if scale > SCORE_CEILING {
        adjusted / scale * SCORE_CEILING
    } else {
        adjusted
    }
}

fn scale_factor(adjusted: impl Iterator<Item = f64>) -> f64 {
    let max_adjusted = adjusted.fold(0.0, f64::max);
    SCORE_CEILING.max(max_adjusted)
}
