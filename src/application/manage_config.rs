//! Config management use case

use crate::error::{MoodjourError, Result};
use crate::infrastructure::{Config, FileSystemStore, JournalRepository, MAX_RANGE_DAYS};

/// Service for managing journal configuration
pub struct ConfigService {
    repository: FileSystemStore,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemStore) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "range_days" => Ok(config.analysis.range_days.to_string()),
            "limit" => Ok(config.analysis.limit.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "range_days" => {
                let days: u32 = parse_positive(key, value)?;
                if days > MAX_RANGE_DAYS {
                    return Err(MoodjourError::Config(format!(
                        "Invalid value for 'range_days': '{}' (at most {} days)",
                        value, MAX_RANGE_DAYS
                    )));
                }
                config.analysis.range_days = days;
            }
            "limit" => config.analysis.limit = parse_positive(key, value)?,
            "created" => {
                return Err(MoodjourError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => return Err(unknown_key(key)),
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

fn unknown_key(key: &str) -> MoodjourError {
    MoodjourError::Config(format!("Unknown config key: '{}'", key))
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(MoodjourError::Config(format!(
            "Invalid value for '{}': '{}' (expected a positive whole number)",
            key, value
        ))),
    }
}
