use super::{Axis, Pole};
use crate::types::record::TeaRecord;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

pub const CLASSIC_TYPES: [&str; 7] = [
    "Green", "Black", "Oolong", "White", "Pu'erh", "Puerh", "Pu-erh",
];
pub const RECOMMENDATION_COUNT: usize = 3;
const SLOT_POOL_SIZE: usize = 5;
const FILLER_POOL_SIZE: usize = 10;
const CAFFEINE_THRESHOLD: u8 = 2;
const SWEETNESS_THRESHOLD: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Energy,
    Adventure,
    Flavor,
    Filler,
}

impl From<Axis> for Slot {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Energy => Self::Energy,
            Axis::Adventure => Self::Adventure,
            Axis::Flavor => Self::Flavor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub slot: Slot,
    pub tea: TeaRecord,
}

pub fn is_classic(tea_type: &str) -> bool {
    CLASSIC_TYPES.contains(&tea_type)
}

/// Whether `record` sits on `pole` of `axis`. Absent ordinals match neither pole.
pub fn matches(axis: Axis, pole: Pole, record: &TeaRecord) -> bool {
    match (axis, pole) {
        (_, Pole::Either) => true,
        (Axis::Energy, Pole::Positive) => record
            .caffeine_level
            .is_some_and(|level| level >= CAFFEINE_THRESHOLD),
        (Axis::Energy, Pole::Negative) => record
            .caffeine_level
            .is_some_and(|level| level < CAFFEINE_THRESHOLD),
        (Axis::Adventure, Pole::Positive) => !is_classic(&record.tea_type),
        (Axis::Adventure, Pole::Negative) => is_classic(&record.tea_type),
        (Axis::Flavor, Pole::Positive) => record
            .sweetness_level
            .is_some_and(|level| level < SWEETNESS_THRESHOLD),
        (Axis::Flavor, Pole::Negative) => record
            .sweetness_level
            .is_some_and(|level| level >= SWEETNESS_THRESHOLD),
    }
}

fn parse_poles(key: &str) -> Option<[Pole; 3]> {
    let letters = key.chars().collect::<Vec<_>>();
    let [energy, adventure, flavor] = letters.as_slice() else {
        return None;
    };
    Some([
        Axis::Energy.pole(*energy)?,
        Axis::Adventure.pole(*adventure)?,
        Axis::Flavor.pole(*flavor)?,
    ])
}

/// Picks up to three distinct teas for a personality key: one per axis from
/// the first five matching unused teas, then fillers from the first ten
/// unused teas. Candidate pools follow `records` order.
///
/// A malformed key yields no recommendations.
pub fn recommend<R: Rng + ?Sized>(
    records: &[TeaRecord],
    key: &str,
    rng: &mut R,
) -> Vec<Recommendation> {
    let Some(poles) = parse_poles(key) else {
        tracing::warn!(key = %key, "cannot sample for malformed personality key");
        return Vec::new();
    };

    let mut used = HashSet::new();
    let mut picks = Vec::with_capacity(RECOMMENDATION_COUNT);

    for (axis, pole) in Axis::ALL.into_iter().zip(poles) {
        let candidates = records
            .iter()
            .filter(|record| !used.contains(&record.identity()) && matches(axis, pole, record))
            .take(SLOT_POOL_SIZE)
            .collect::<Vec<_>>();
        match candidates.choose(rng).copied() {
            Some(pick) => {
                used.insert(pick.identity());
                picks.push(Recommendation {
                    slot: axis.into(),
                    tea: pick.clone(),
                });
            }
            None => tracing::debug!(?axis, "no candidates for slot"),
        }
    }

    while picks.len() < RECOMMENDATION_COUNT {
        let available = records
            .iter()
            .filter(|record| !used.contains(&record.identity()))
            .take(FILLER_POOL_SIZE)
            .collect::<Vec<_>>();
        let Some(filler) = available.choose(rng).copied() else {
            break;
        };
        used.insert(filler.identity());
        picks.push(Recommendation {
            slot: Slot::Filler,
            tea: filler.clone(),
        });
    }

    picks
}
