//! Stored log management use case

use crate::error::Result;
use crate::infrastructure::{FileSystemStore, LogRecord, LogUpdate};
use chrono::{DateTime, FixedOffset, NaiveDate};

/// Default number of logs listed
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Service for listing, showing, updating and deleting stored logs
pub struct LogService {
    store: FileSystemStore,
}

impl LogService {
    pub fn new(store: FileSystemStore) -> Self {
        LogService { store }
    }

    /// Logs within the date range, newest first
    pub fn list(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: Option<usize>,
    ) -> Result<Vec<LogRecord>> {
        self.store
            .list_logs(from, to, Some(limit.unwrap_or(DEFAULT_LIST_LIMIT)))
    }

    pub fn show(&self, id: &str) -> Result<LogRecord> {
        self.store.read_log(id)
    }

    /// Apply an update document; only `questionnaire` and `chatSession` are taken
    pub fn update(&self, id: &str, json: &str, now: DateTime<FixedOffset>) -> Result<LogRecord> {
        let update = LogUpdate::from_json("update", json)?;
        let mut record = self.store.read_log(id)?;
        record.log.apply_update(update, now.to_rfc3339())?;
        self.store.replace_log(&record)?;
        Ok(record)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.store.delete_log(id)
    }
}
