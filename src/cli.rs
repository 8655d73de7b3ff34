use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tearank::catalogue::{SortDirection, SortKey};
use tearank::report::OutputFormat;
use tearank::teasonality::AnswerValue;
use tearank::types::config::FormatSetting;
use tearank::types::profile::{CaffeinePreference, FlavorPreference};

#[derive(Parser)]
#[command(
    name = "tearank",
    version,
    about = "Ranked tea reviews, Discover recommendations and the Teasonality quiz"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding tearank.toml; relative sources resolve against it
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Review sheet path or http(s) URL, overriding source.location
    #[arg(long, global = true)]
    pub source: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the ranked catalogue
    List(ListCommand),
    /// Re-rank the catalogue for your preferences
    Discover(DiscoverCommand),
    /// Take the Teasonality quiz
    Quiz(QuizCommand),
    /// Print every Teasonality type
    Personalities(PersonalitiesCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SortKeyArg {
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

impl From<SortKeyArg> for SortKey {
    fn from(arg: SortKeyArg) -> Self {
        match arg {
            SortKeyArg::Rank => SortKey::Rank,
            SortKeyArg::Name => SortKey::Name,
            SortKeyArg::Brand => SortKey::Brand,
            SortKeyArg::Form => SortKey::Form,
            SortKeyArg::Type => SortKey::Type,
            SortKeyArg::Score => SortKey::Score,
            SortKeyArg::Description => SortKey::Description,
            SortKeyArg::Price => SortKey::Price,
            SortKeyArg::Link => SortKey::Link,
            SortKeyArg::Caffeine => SortKey::Caffeine,
            SortKeyArg::Sweetness => SortKey::Sweetness,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DirectionArg {
    Asc,
    Desc,
}

impl From<DirectionArg> for SortDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Asc => SortDirection::Asc,
            DirectionArg::Desc => SortDirection::Desc,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CaffeineArg {
    Want,
    Avoid,
    Indifferent,
}

impl From<CaffeineArg> for CaffeinePreference {
    fn from(arg: CaffeineArg) -> Self {
        match arg {
            CaffeineArg::Want => CaffeinePreference::Want,
            CaffeineArg::Avoid => CaffeinePreference::Avoid,
            CaffeineArg::Indifferent => CaffeinePreference::Indifferent,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FlavorArg {
    Sweet,
    Bitter,
    Indifferent,
}

impl From<FlavorArg> for FlavorPreference {
    fn from(arg: FlavorArg) -> Self {
        match arg {
            FlavorArg::Sweet => FlavorPreference::Sweet,
            FlavorArg::Bitter => FlavorPreference::Bitter,
            FlavorArg::Indifferent => FlavorPreference::Indifferent,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum YesNo {
    Yes,
    No,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

impl From<ReportFormat> for OutputFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Json => OutputFormat::Json,
            ReportFormat::Md => OutputFormat::Md,
        }
    }
}

/// CLI flag first, then `output.format` from config.
pub fn output_format(flag: Option<ReportFormat>, setting: FormatSetting) -> OutputFormat {
    match (flag, setting) {
        (Some(format), _) => format.into(),
        (None, FormatSetting::Json) => OutputFormat::Json,
        (None, FormatSetting::Md) => OutputFormat::Md,
    }
}

#[derive(Args)]
pub struct ListCommand {
    #[arg(long, value_enum, default_value = "score")]
    pub sort: SortKeyArg,
    #[arg(long, value_enum, default_value = "desc")]
    pub direction: DirectionArg,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct DiscoverCommand {
    #[arg(long, value_enum)]
    pub caffeine: Option<CaffeineArg>,
    #[arg(long, value_enum)]
    pub flavor: Option<FlavorArg>,
    /// Tea type to boost (repeatable); replaces discover.liked_types
    #[arg(long = "like")]
    pub like: Vec<String>,
    /// Tea type to exclude (repeatable); replaces discover.disliked_types
    #[arg(long = "dislike")]
    pub dislike: Vec<String>,
    #[arg(long)]
    pub max_price: Option<f64>,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct QuizCommand {
    /// Six comma-separated answers (1, 0 or -1); prompts on stdin when omitted
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        value_parser = parse_answer
    )]
    pub answers: Vec<AnswerValue>,
    /// Answer to the tie-breaker question
    #[arg(long, value_enum)]
    pub enjoys_tea: Option<YesNo>,
    /// Seed for reproducible recommendations, overriding sampler.seed
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct PersonalitiesCommand {
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

fn parse_answer(raw: &str) -> Result<AnswerValue, String> {
    raw.parse::<AnswerValue>().map_err(|e| e.to_string())
}
