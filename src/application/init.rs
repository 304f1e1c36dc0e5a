//! Initialize journal use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemStore, JournalRepository};
use std::fs;
use std::path::Path;

pub struct InitService;

impl InitService {
    /// Initialize a new journal at the specified path.
    ///
    /// Creates the directory if needed, then `.moodjour/config.toml` with the
    /// default analysis settings and an empty `logs/` directory.
    pub fn execute(path: &Path) -> Result<Config> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let store = FileSystemStore::new(path.to_path_buf());
        store.initialize()?;

        let config = Config::new();
        store.save_config(&config)?;

        tracing::info!(root = %path.display(), "initialized journal");
        Ok(config)
    }
}
