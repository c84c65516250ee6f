//! Character generator settings

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::attributes::GenerationMethod;
use crate::error::{ChargenError, Result};
use crate::simulator::{MAX_STANDARD_YEARS, MAX_YEARS_WITH_AGING};
use crate::track::TrackRequest;

/// Settings for one character generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_method")]
    pub method: GenerationMethod,
    /// Years of prior experience to simulate
    #[serde(default = "default_years")]
    pub years: u32,
    /// Allow more than 18 years, and with them the aging table
    #[serde(default)]
    pub allow_aging: bool,
    #[serde(default = "default_point_buy_budget")]
    pub point_buy_budget: i32,
    /// Unallocated points handed to the skill ledger
    #[serde(default)]
    pub free_skill_points: u32,
    #[serde(default = "default_allow_rich")]
    pub allow_rich_wealth: bool,
    #[serde(default)]
    pub track: TrackRequest,
    /// Externally granted promotion, for the Officer track
    #[serde(default)]
    pub promoted: bool,
    pub seed: Option<u64>,
}

fn default_method() -> GenerationMethod {
    GenerationMethod::ThreeD6
}

fn default_years() -> u32 {
    4
}

fn default_point_buy_budget() -> i32 {
    63
}

fn default_allow_rich() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
            years: default_years(),
            allow_aging: false,
            point_buy_budget: default_point_buy_budget(),
            free_skill_points: 0,
            allow_rich_wealth: default_allow_rich(),
            track: TrackRequest::Auto,
            promoted: false,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        let max_years = if self.allow_aging {
            MAX_YEARS_WITH_AGING
        } else {
            MAX_STANDARD_YEARS
        };
        if self.years > max_years {
            return Err(ChargenError::InvalidConfig(format!(
                "years must be at most {} (got {})",
                max_years, self.years
            )));
        }
        if !(18..=108).contains(&self.point_buy_budget) {
            return Err(ChargenError::InvalidConfig(format!(
                "point_buy_budget must be between 18 and 108 (got {})",
                self.point_buy_budget
            )));
        }
        Ok(())
    }
}
