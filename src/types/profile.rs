use crate::error::{Result, TeaError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaffeinePreference {
    Want,
    Avoid,
    #[default]
    Indifferent,
}

impl CaffeinePreference {
    /// `+1` for want, `-1` for avoid, `None` when no adjustment applies.
    pub fn direction(self) -> Option<f64> {
        match self {
            Self::Want => Some(1.0),
            Self::Avoid => Some(-1.0),
            Self::Indifferent => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlavorPreference {
    Sweet,
    Bitter,
    #[default]
    Indifferent,
}

impl FlavorPreference {
    pub fn direction(self) -> Option<f64> {
        match self {
            Self::Sweet => Some(1.0),
            Self::Bitter => Some(-1.0),
            Self::Indifferent => None,
        }
    }
}

/// Discover quiz answers. Owned by a single session and passed explicitly
/// into [`crate::discover::rerank`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    #[serde(default)]
    pub caffeine: CaffeinePreference,
    #[serde(default)]
    pub liked_types: BTreeSet<String>,
    #[serde(default)]
    pub disliked_types: BTreeSet<String>,
    #[serde(default)]
    pub flavor: FlavorPreference,
    pub max_price: Option<f64>,
}

impl PreferenceProfile {
    pub fn validate(&self) -> Result<()> {
        if let Some(max_price) = self.max_price {
            if !max_price.is_normal() || max_price <= 0.0 {
                return Err(TeaError::InvalidProfile(format!(
                    "max_price must be a positive number (found {max_price})"
                )));
            }
        }

        let overlap = self
            .liked_types
            .intersection(&self.disliked_types)
            .cloned()
            .collect::<Vec<_>>();
        if !overlap.is_empty() {
            return Err(TeaError::InvalidProfile(format!(
                "type(s) both liked and disliked: {}",
                overlap.join(", ")
            )));
        }

        Ok(())
    }
}
