pub mod json;
pub mod md;

use crate::catalogue::SortState;
use crate::discover::RankedTea;
use crate::error::Result;
use crate::teasonality::personalities::Personality;
use crate::teasonality::QuizOutcome;
use crate::types::profile::PreferenceProfile;
use crate::types::record::TeaRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
}

/// Everything the binary can print.
#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View<'a> {
    Catalogue {
        source: &'a str,
        sort: SortState,
        teas: &'a [TeaRecord],
    },
    Discover {
        profile: &'a PreferenceProfile,
        matches: &'a [RankedTea],
    },
    Teasonality(&'a QuizOutcome),
    Personalities {
        personalities: &'a [Personality],
    },
}

pub fn render(view: &View<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(json::to_json(view)?),
        OutputFormat::Md => Ok(md::to_markdown(view)),
    }
}
