//! Configuration management

use crate::domain::{PhysicalCategory, TriggerVocabulary};
use crate::error::{MoodjourError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_RANGE_DAYS: u32 = 30;
pub const DEFAULT_LIMIT: usize = 100;

/// Largest analysis window `config` accepts (about a century)
pub const MAX_RANGE_DAYS: u32 = 36_500;

/// Settings for `moodjour analyze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// How many days back to fetch entries
    pub range_days: u32,
    /// Maximum entries handed to the analyzer
    pub limit: usize,
    pub situational_terms: Vec<String>,
    pub physical_categories: Vec<PhysicalCategory>,
}

impl AnalysisConfig {
    /// Keyword tables for the trigger scanner
    pub fn vocabulary(&self) -> TriggerVocabulary {
        TriggerVocabulary {
            situational_terms: self.situational_terms.clone(),
            physical_categories: self.physical_categories.clone(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let vocabulary = TriggerVocabulary::default();
        AnalysisConfig {
            range_days: DEFAULT_RANGE_DAYS,
            limit: DEFAULT_LIMIT,
            situational_terms: vocabulary.situational_terms,
            physical_categories: vocabulary.physical_categories,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Create a new config with default analysis settings
    pub fn new() -> Self {
        Config {
            created: Utc::now(),
            analysis: AnalysisConfig::default(),
        }
    }

    /// Load config from .moodjour/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".moodjour").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MoodjourError::NotMoodjourDirectory(path.to_path_buf())
            } else {
                MoodjourError::Io(e)
            }
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Save config to .moodjour/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let state_dir = path.join(".moodjour");
        let config_path = state_dir.join("config.toml");

        if !state_dir.exists() {
            fs::create_dir(&state_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;

        fs::write(&config_path, contents)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
