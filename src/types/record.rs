use serde::Serialize;

/// One reviewed tea, as loaded from the review sheet.
///
/// `caffeine_level` and `sweetness_level` are `None` when the column is
/// absent or the cell is not an ordinal in `0..=3`; ordinal filters treat
/// `None` as matching neither pole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeaRecord {
    pub name: String,
    pub brand: String,
    pub form: String,
    #[serde(rename = "type")]
    pub tea_type: String,
    /// `NaN` when the sheet cell is not a number.
    pub score: f64,
    pub description: String,
    pub price_per_portion: f64,
    pub link: Option<String>,
    pub caffeine_level: Option<u8>,
    pub sweetness_level: Option<u8>,
    /// 1-based position by score at load time. Never touched by display sorting.
    pub rank: usize,
}

impl TeaRecord {
    pub fn identity(&self) -> (&str, &str) {
        (self.name.as_str(), self.brand.as_str())
    }
}
