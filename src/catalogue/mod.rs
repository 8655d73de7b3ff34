use crate::types::record::TeaRecord;
use serde::Serialize;
use std::cmp::Ordering;

/// Any displayable field of a [`TeaRecord`], plus the load-time rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Rank,
    Name,
    Brand,
    Form,
    Type,
    Score,
    Description,
    Price,
    Link,
    Caffeine,
    Sweetness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Which column the catalogue is sorted by. Pure display state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Score,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    /// Choosing the current key flips direction; a new key starts descending.
    pub fn toggle(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Desc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        Self { key, direction }
    }
}

enum FieldValue<'a> {
    Number(f64),
    Text(&'a str),
    Missing,
}

fn field(record: &TeaRecord, key: SortKey) -> FieldValue<'_> {
    match key {
        SortKey::Rank => FieldValue::Number(record.rank as f64),
        SortKey::Name => FieldValue::Text(&record.name),
        SortKey::Brand => FieldValue::Text(&record.brand),
        SortKey::Form => FieldValue::Text(&record.form),
        SortKey::Type => FieldValue::Text(&record.tea_type),
        SortKey::Score if record.score.is_nan() => FieldValue::Missing,
        SortKey::Score => FieldValue::Number(record.score),
        SortKey::Description => FieldValue::Text(&record.description),
        SortKey::Price => FieldValue::Number(record.price_per_portion),
        SortKey::Link => record
            .link
            .as_deref()
            .map_or(FieldValue::Missing, FieldValue::Text),
        SortKey::Caffeine => record
            .caffeine_level
            .map_or(FieldValue::Missing, |level| FieldValue::Number(f64::from(level))),
        SortKey::Sweetness => record
            .sweetness_level
            .map_or(FieldValue::Missing, |level| FieldValue::Number(f64::from(level))),
    }
}

/// Orders two records by `key`. Missing values (absent ordinals, `NaN`
/// scores, no link) never compare against present ones; they trail the
/// present values in either direction and keep their relative order.
pub fn compare(a: &TeaRecord, b: &TeaRecord, key: SortKey, direction: SortDirection) -> Ordering {
    let ordering = match (field(a, key), field(b, key)) {
        (FieldValue::Missing, FieldValue::Missing) => return Ordering::Equal,
        (FieldValue::Missing, _) => return Ordering::Greater,
        (_, FieldValue::Missing) => return Ordering::Less,
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(&y),
        (FieldValue::Text(x), FieldValue::Text(y)) => x.cmp(y),
        _ => Ordering::Equal,
    };
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Returns a re-ordered copy; `records` and every `rank` are left untouched.
pub fn sort(records: &[TeaRecord], state: SortState) -> Vec<TeaRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare(a, b, state.key, state.direction));
    sorted
}

/// Descending order with `NaN` after every number. Used for load-time ranks
/// and Discover results.
pub fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::fixtures::{tea, tea_with_levels};

    fn names(records: &[TeaRecord]) -> Vec<&str> {
        records.iter().map(|record| record.name.as_str()).collect()
    }

    #[test]
    fn toggle_flips_same_key_and_resets_new_key() {
        let state = SortState::default();
        assert_eq!(state.key, SortKey::Score);
        assert_eq!(state.direction, SortDirection::Desc);

        let flipped = state.toggle(SortKey::Score);
        assert_eq!(flipped.direction, SortDirection::Asc);
        assert_eq!(flipped.toggle(SortKey::Score).direction, SortDirection::Desc);

        let renamed = flipped.toggle(SortKey::Name);
        assert_eq!(renamed.key, SortKey::Name);
        assert_eq!(renamed.direction, SortDirection::Desc);
    }

    #[test]
    fn sort_orders_numbers_and_text() {
        let records = vec![tea("b", "Green", 6.0), tea("a", "Black", 9.0), tea("c", "White", 7.5)];

        let by_score = sort(
            &records,
            SortState {
                key: SortKey::Score,
                direction: SortDirection::Desc,
            },
        );
        assert_eq!(names(&by_score), vec!["a", "c", "b"]);

        let by_name = sort(
            &records,
            SortState {
                key: SortKey::Name,
                direction: SortDirection::Asc,
            },
        );
        assert_eq!(names(&by_name), vec!["a", "b", "c"]);
        assert_eq!(names(&records), vec!["b", "a", "c"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let records = vec![tea("first", "Green", 7.0), tea("second", "Green", 7.0), tea("third", "Black", 7.0)];
        let sorted = sort(
            &records,
            SortState {
                key: SortKey::Type,
                direction: SortDirection::Desc,
            },
        );
        assert_eq!(names(&sorted), vec!["first", "second", "third"]);
    }

    #[test]
    fn missing_values_trail_in_both_directions() {
        let records = vec![
            tea_with_levels("none", "Green", None, None),
            tea_with_levels("low", "Green", Some(0), None),
            tea_with_levels("high", "Green", Some(3), None),
        ];
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let sorted = sort(
                &records,
                SortState {
                    key: SortKey::Caffeine,
                    direction,
                },
            );
            assert_eq!(sorted[2].name, "none");
        }
    }

    #[test]
    fn sort_never_reassigns_rank() {
        let mut records = vec![tea("a", "Green", 5.0), tea("b", "Green", 9.0)];
        records[0].rank = 2;
        records[1].rank = 1;
        let sorted = sort(
            &records,
            SortState {
                key: SortKey::Name,
                direction: SortDirection::Asc,
            },
        );
        assert_eq!(sorted[0].rank, 2);
        assert_eq!(sorted[1].rank, 1);
    }

    #[test]
    fn descending_nan_last_puts_nan_after_numbers() {
        let mut scores = vec![f64::NAN, 3.0, 9.0, f64::NAN, 5.0];
        scores.sort_by(|a, b| descending_nan_last(*a, *b));
        assert_eq!(&scores[..3], &[9.0, 5.0, 3.0]);
        assert!(scores[3].is_nan() && scores[4].is_nan());
    }
}
