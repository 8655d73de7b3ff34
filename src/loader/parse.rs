use crate::error::{Result, TeaError};
use crate::types::record::TeaRecord;
use csv::StringRecord;
use std::collections::HashSet;

pub const COL_NAME: &str = "Name";
pub const COL_BRAND: &str = "Brand";
pub const COL_FORM: &str = "Form";
pub const COL_TYPE: &str = "Type";
pub const COL_SCORE: &str = "Score";
pub const COL_DESCRIPTION: &str = "Description";
pub const COL_PRICE: &str = "PPP (350ml)";
pub const COL_LINK: &str = "link";
pub const COL_CAFFEINE: &str = "Caffeine";
pub const COL_SWEETNESS: &str = "Sweetness";

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];
const MAX_LEVEL: f64 = 3.0;

#[derive(Debug, Clone, Copy)]
struct Columns {
    name: usize,
    brand: usize,
    form: usize,
    tea_type: usize,
    score: usize,
    description: usize,
    price: usize,
    link: usize,
    caffeine: Option<usize>,
    sweetness: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let position = |column: &str| headers.iter().position(|header| header.trim() == column);
        let required = |column: &str| {
            position(column).ok_or_else(|| TeaError::MissingColumn(column.to_string()))
        };

        Ok(Self {
            name: required(COL_NAME)?,
            brand: required(COL_BRAND)?,
            form: required(COL_FORM)?,
            tea_type: required(COL_TYPE)?,
            score: required(COL_SCORE)?,
            description: required(COL_DESCRIPTION)?,
            price: required(COL_PRICE)?,
            link: required(COL_LINK)?,
            caffeine: position(COL_CAFFEINE),
            sweetness: position(COL_SWEETNESS),
        })
    }
}

/// Parses the review sheet into records in sheet order. `rank` is left at 0;
/// ranking happens once the whole set is known.
///
/// Row-level problems never fail the parse: bad numbers fall back, blank rows
/// and repeated `(name, brand)` pairs are skipped.
pub fn parse_records(text: &str) -> Result<Vec<TeaRecord>> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = Columns::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    let mut seen = HashSet::new();
    for (index, row) in reader.records().enumerate() {
        let line = index + 2;
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!(line, error = %err, "skipping unreadable row");
                continue;
            }
        };
        if row.iter().all(|cell| cell.trim().is_empty()) {
            tracing::debug!(line, "skipping blank row");
            continue;
        }

        let record = record_from_row(&row, &columns, line);
        if !seen.insert((record.name.clone(), record.brand.clone())) {
            tracing::warn!(
                line,
                name = %record.name,
                brand = %record.brand,
                "skipping duplicate tea"
            );
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

fn record_from_row(row: &StringRecord, columns: &Columns, line: usize) -> TeaRecord {
    let cell = |index: usize| row.get(index).map(str::trim).unwrap_or_default().to_string();
    let optional = |index: Option<usize>| index.and_then(|index| row.get(index));

    let score = parse_score(row.get(columns.score).unwrap_or_default());
    if score.is_nan() {
        tracing::debug!(line, "score is not a number");
    }

    TeaRecord {
        name: cell(columns.name),
        brand: cell(columns.brand),
        form: cell(columns.form),
        tea_type: cell(columns.tea_type),
        score,
        description: cell(columns.description),
        price_per_portion: parse_price(row.get(columns.price).unwrap_or_default()),
        link: parse_link(row.get(columns.link)),
        caffeine_level: optional(columns.caffeine).and_then(parse_level),
        sweetness_level: optional(columns.sweetness).and_then(parse_level),
        rank: 0,
    }
}

/// Strict decimal parse; anything else is `NaN`.
pub fn parse_score(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => f64::NAN,
    }
}

/// `"$1.25 "` → `1.25`. Unparsable or negative prices are `0`.
pub fn parse_price(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix(&CURRENCY_SYMBOLS[..])
        .unwrap_or(trimmed)
        .trim();
    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => {
            if !trimmed.is_empty() {
                tracing::debug!(raw = %raw, "unparsable price, using 0");
            }
            0.0
        }
    }
}

pub fn parse_link(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() || trimmed == "null" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Ordinal `0..=3`; anything else is absent.
pub fn parse_level(raw: &str) -> Option<u8> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && (0.0..=MAX_LEVEL).contains(&value) {
        Some(value as u8)
    } else {
        None
    }
}
