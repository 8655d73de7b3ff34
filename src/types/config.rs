use crate::error::TeaError;
use crate::types::profile::PreferenceProfile;
use serde::Deserialize;

pub const DEFAULT_SOURCE: &str = "teareviews.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_RETRIES: u32 = 10;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TearankConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub discover: PreferenceProfile,
    #[serde(default)]
    pub sampler: SamplerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub retries: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            retries: 0,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_location() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SamplerConfig {
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatSetting {
    #[default]
    Md,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: FormatSetting,
}

impl TearankConfig {
    pub fn validate(&self) -> Result<(), TeaError> {
        if self.source.location.trim().is_empty() {
            return Err(TeaError::ConfigParse(
                "source.location must not be empty".to_string(),
            ));
        }
        if self.source.retries > MAX_RETRIES {
            return Err(TeaError::ConfigParse(format!(
                "source.retries must be at most {MAX_RETRIES} (found {})",
                self.source.retries
            )));
        }
        if self.source.timeout_secs == 0 {
            return Err(TeaError::ConfigParse(
                "source.timeout_secs must be greater than 0".to_string(),
            ));
        }

        self.discover
            .validate()
            .map_err(|e| TeaError::ConfigParse(format!("discover: {e}")))?;

        Ok(())
    }
}
