pub mod fetch;
pub mod parse;

use crate::catalogue::descending_nan_last;
use crate::error::{Result, TeaError};
use crate::types::record::TeaRecord;
use chrono::{DateTime, Utc};
use fetch::Source;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub timeout: Duration,
    pub retries: u32,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(crate::types::config::DEFAULT_TIMEOUT_SECS),
            retries: 0,
        }
    }
}

/// One complete, ranked load of the review sheet. Immutable once built; a
/// reload produces a new value.
#[derive(Debug, Clone, Serialize)]
pub struct Catalogue {
    pub records: Vec<TeaRecord>,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    /// SHA-256 of the raw document.
    pub digest: String,
}

impl Catalogue {
    /// True when `other` was built from byte-identical source text.
    pub fn same_content(&self, other: &Catalogue) -> bool {
        self.digest == other.digest
    }
}

/// Loading lifecycle as seen by consumers. Only `Loaded` hands out records.
#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded(Catalogue),
    Failed(TeaError),
}

impl From<Result<Catalogue>> for LoadState {
    fn from(result: Result<Catalogue>) -> Self {
        match result {
            Ok(catalogue) => Self::Loaded(catalogue),
            Err(err) => Self::Failed(err),
        }
    }
}

impl LoadState {
    pub fn records(&self) -> Option<&[TeaRecord]> {
        match self {
            Self::Loaded(catalogue) => Some(&catalogue.records),
            Self::Pending | Self::Failed(_) => None,
        }
    }

    /// Swaps in the outcome of a newer fetch wholesale.
    pub fn replace(&mut self, result: Result<Catalogue>) {
        *self = Self::from(result);
    }

    pub fn into_catalogue(self) -> Result<Catalogue> {
        match self {
            Self::Loaded(catalogue) => Ok(catalogue),
            Self::Failed(err) => Err(err),
            Self::Pending => Err(TeaError::NotLoaded),
        }
    }
}

/// Fetches and parses the sheet. Every call re-fetches; nothing is cached.
pub fn load(source: &Source, options: &LoadOptions) -> Result<Catalogue> {
    let text = fetch::fetch_with_retries(source, options.timeout, options.retries)?;
    load_from_str(&text, &source.label())
}

pub fn load_from_str(text: &str, source_label: &str) -> Result<Catalogue> {
    let mut records = parse::parse_records(text)?;
    assign_ranks(&mut records);

    let digest = format!("{:x}", Sha256::digest(text.as_bytes()));

    tracing::info!(
        source = %source_label,
        records = records.len(),
        unscored = records.iter().filter(|record| record.score.is_nan()).count(),
        "catalogue loaded"
    );

    Ok(Catalogue {
        records,
        source: source_label.to_string(),
        loaded_at: Utc::now(),
        digest,
    })
}

/// Stable sort by score, highest first and `NaN` last, then 1-based ranks.
pub fn assign_ranks(records: &mut [TeaRecord]) {
    records.sort_by(|a, b| descending_nan_last(a.score, b.score));
    for (index, record) in records.iter_mut().enumerate() {
        record.rank = index + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SHEET: &str = "Name,Brand,Form,Type,Score,Description,PPP (350ml),link,Caffeine,Sweetness
Sencha,Y,Loose,Green,8,Grassy,$0.40,,2,1
Mystery,M,Bag,Herbal,??,Unknown,$0.20,,0,2
Assam,T,Bag,Black,9.5,Malty,$0.10,,3,0
Bai Mu Dan,W,Loose,White,8,Floral,$0.90,,1,2
";

    #[test]
    fn ranks_follow_score_with_ties_in_sheet_order() {
        let catalogue = load_from_str(SHEET, "inline").expect("sheet should load");
        let ranked = catalogue
            .records
            .iter()
            .map(|record| (record.name.as_str(), record.rank))
            .collect::<Vec<_>>();
        assert_eq!(
            ranked,
            vec![("Assam", 1), ("Sencha", 2), ("Bai Mu Dan", 3), ("Mystery", 4)]
        );
    }

    #[test]
    fn reloading_unchanged_sheet_is_identical() {
        let first = load_from_str(SHEET, "inline").expect("sheet should load");
        let second = load_from_str(SHEET, "inline").expect("sheet should load");
        assert!(first.same_content(&second));
        assert_eq!(first.digest.len(), 64);

        let snapshot = |catalogue: &Catalogue| {
            catalogue
                .records
                .iter()
                .map(|record| {
                    let (name, brand) = record.identity();
                    (name.to_string(), brand.to_string(), record.rank, record.score.to_bits())
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(snapshot(&first), snapshot(&second));
    }

    #[test]
    fn load_reads_from_file_source() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("teareviews.csv");
        fs::write(&path, SHEET).expect("sheet should write");

        let catalogue = load(&Source::File(path.clone()), &LoadOptions::default())
            .expect("file source should load");
        assert_eq!(catalogue.records.len(), 4);
        assert_eq!(catalogue.source, path.display().to_string());
    }

    #[test]
    fn load_keeps_rows_around_invalid_utf8() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("teareviews.csv");
        let mut bytes = b"Name,Brand,Form,Type,Score,Description,PPP (350ml),link\n\
Sencha,Y,Loose,Green,8,Grassy,$0.40,\n\
Genmaicha,Y,Bag,Green,7,Toasty caf"
            .to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b" rice,$0.30,\n");
        fs::write(&path, bytes).expect("sheet should write");

        let catalogue = load(&Source::File(path), &LoadOptions::default())
            .expect("bad byte should not fail the load");
        let names = catalogue
            .records
            .iter()
            .map(|record| record.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Sencha", "Genmaicha"]);
        assert_eq!(catalogue.records[1].description, "Toasty caf\u{FFFD} rice");
    }

    #[test]
    fn load_state_only_exposes_loaded_records() {
        let mut state = LoadState::default();
        assert!(state.records().is_none());

        state.replace(load(
            &Source::File(PathBuf::from("/nonexistent/teareviews.csv")),
            &LoadOptions::default(),
        ));
        assert!(matches!(state, LoadState::Failed(TeaError::Transport(_))));
        assert!(state.records().is_none());

        state.replace(load_from_str(SHEET, "inline"));
        assert_eq!(state.records().map(<[TeaRecord]>::len), Some(4));
        assert!(state.into_catalogue().is_ok());
    }

    #[test]
    fn pending_state_is_not_a_catalogue() {
        let err = LoadState::Pending
            .into_catalogue()
            .expect_err("pending should not yield records");
        assert!(matches!(err, TeaError::NotLoaded));
    }
}
