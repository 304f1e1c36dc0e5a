//! File system journal store
//!
//! Layout of a journal root:
//!
//! ```text
//! .moodjour/config.toml
//! logs/2025-01-17-1.json
//! logs/2025-01-17-2.json
//! assessments/tas20-2025-01-17-1.json
//! ```
//!
//! A log's ID is its file name without `.json`.

use crate::domain::entry::parse_date;
use crate::domain::JournalEntry;
use crate::error::{MoodjourError, Result};
use crate::infrastructure::payload::{AssessmentRecord, StoredLog};
use crate::infrastructure::Config;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const ROOT_ENV: &str = "MOODJOUR_ROOT";

const STATE_DIR: &str = ".moodjour";
const LOGS_DIR: &str = "logs";
const ASSESSMENTS_DIR: &str = "assessments";

/// Read side of journal storage, as the analyzer's callers see it
pub trait EntryStore {
    /// Entries dated within `[from, to]`, newest first, at most `limit`.
    ///
    /// Entries whose date does not parse are kept (sorted last) so that
    /// date-independent analysis still sees them.
    fn fetch_recent_entries(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: Option<usize>,
    ) -> Result<Vec<JournalEntry>>;
}

/// Abstract repository for journal setup operations
pub trait JournalRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .moodjour/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .moodjour/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .moodjour directory exists
    fn is_initialized(&self) -> bool;

    /// Create .moodjour directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of the journal store
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    pub root: PathBuf,
}

impl FileSystemStore {
    /// Create a new store with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemStore { root }
    }

    /// Discover journal root by walking up from current directory
    /// First checks MOODJOUR_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_state_dir(&path) {
                return Ok(FileSystemStore::new(path));
            } else {
                return Err(MoodjourError::Config(format!(
                    "MOODJOUR_ROOT is set to '{}' but no .moodjour directory found. \
                    Run 'moodjour init' in that directory or unset MOODJOUR_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover journal root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_state_dir(&current) {
                return Ok(FileSystemStore::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(MoodjourError::NotMoodjourDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_state_dir(path: &Path) -> bool {
        path.join(STATE_DIR).is_dir()
    }

    fn logs_dir(&self) -> PathBuf {
        self.root.join(LOGS_DIR)
    }

    fn assessments_dir(&self) -> PathBuf {
        self.root.join(ASSESSMENTS_DIR)
    }

    /// Persist a log as `logs/<date>-<n>.json` and return the file name.
    ///
    /// `n` is the first free sequence number for that date.
    pub fn append_log(&self, log: &StoredLog) -> Result<String> {
        let date = parse_date(&log.date).ok_or_else(|| MoodjourError::InvalidDate(log.date.clone()))?;
        let stem = date.format("%Y-%m-%d").to_string();
        let filename = create_numbered(&self.logs_dir(), &stem, &log.to_json()?)?;
        tracing::info!(file = %filename, "recorded journal entry");
        Ok(filename)
    }

    /// Path of the log with the given ID; a trailing `.json` is accepted
    fn log_path(&self, id: &str) -> Result<PathBuf> {
        let stem = id.trim();
        let stem = stem.strip_suffix(".json").unwrap_or(stem);
        let valid = !stem.is_empty()
            && stem
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(MoodjourError::InvalidLogId(id.to_string()));
        }
        Ok(self.logs_dir().join(format!("{}.json", stem)))
    }

    /// Read one stored log
    pub fn read_log(&self, id: &str) -> Result<LogRecord> {
        let path = self.log_path(id)?;
        let json = fs::read_to_string(&path).map_err(|e| not_found_or_io(e, id))?;
        let log = StoredLog::from_json(&path.display().to_string(), &json)?;
        Ok(LogRecord {
            id: log_id(&path),
            log,
        })
    }

    /// Overwrite an existing stored log
    pub fn replace_log(&self, record: &LogRecord) -> Result<()> {
        let path = self.log_path(&record.id)?;
        if !path.is_file() {
            return Err(MoodjourError::LogNotFound(record.id.clone()));
        }
        fs::write(&path, record.log.to_json()?)?;
        tracing::info!(id = %record.id, "updated journal entry");
        Ok(())
    }

    /// Remove a stored log
    pub fn delete_log(&self, id: &str) -> Result<()> {
        let path = self.log_path(id)?;
        fs::remove_file(&path).map_err(|e| not_found_or_io(e, id))?;
        tracing::info!(id = %log_id(&path), "deleted journal entry");
        Ok(())
    }

    /// Stored logs dated within `[from, to]`, newest first, at most `limit`.
    ///
    /// Logs whose date does not parse are kept and sorted last.
    pub fn list_logs(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: Option<usize>,
    ) -> Result<Vec<LogRecord>> {
        let mut dated: Vec<(JournalEntry, LogRecord)> = self
            .load_all()
            .into_iter()
            .map(|record| (record.log.clone().into_entry(), record))
            .collect();

        if let Some(from_date) = from {
            dated.retain(|(e, _)| e.calendar_date().is_none_or(|d| d >= from_date));
        }
        if let Some(to_date) = to {
            dated.retain(|(e, _)| e.calendar_date().is_none_or(|d| d <= to_date));
        }

        // Newest first; creation time breaks ties within a day
        dated.sort_by(|(a, _), (b, _)| match (a.calendar_date(), b.calendar_date()) {
            (Some(da), Some(db)) => db
                .cmp(&da)
                .then_with(|| b.timestamp().cmp(&a.timestamp())),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        if let Some(n) = limit {
            dated.truncate(n);
        }

        Ok(dated.into_iter().map(|(_, record)| record).collect())
    }

    /// Load every stored log; unreadable or malformed files are skipped
    fn load_all(&self) -> Vec<LogRecord> {
        let logs_dir = self.logs_dir();
        if !logs_dir.is_dir() {
            return Vec::new();
        }

        let mut paths = json_files(&logs_dir);
        paths.sort();

        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            let name = path.display().to_string();
            let parsed = fs::read_to_string(&path)
                .map_err(MoodjourError::from)
                .and_then(|json| StoredLog::from_json(&name, &json));
            match parsed {
                Ok(log) => records.push(LogRecord {
                    id: log_id(&path),
                    log,
                }),
                Err(e) => tracing::warn!(file = %name, error = %e, "skipping unreadable log"),
            }
        }
        records
    }

    /// Persist an assessment as `assessments/tas20-<date>-<n>.json`
    pub fn append_assessment(&self, record: &AssessmentRecord) -> Result<String> {
        let stem = format!("tas20-{}", record.completed_at.format("%Y-%m-%d"));
        let json = serde_json::to_string_pretty(record)?;
        let filename = create_numbered(&self.assessments_dir(), &stem, &json)?;
        tracing::info!(file = %filename, "recorded assessment");
        Ok(filename)
    }

    /// Most recently completed assessment, if any
    pub fn latest_assessment(&self) -> Result<Option<AssessmentRecord>> {
        let dir = self.assessments_dir();
        if !dir.is_dir() {
            return Ok(None);
        }

        let mut latest: Option<AssessmentRecord> = None;
        for path in json_files(&dir) {
            let name = path.display().to_string();
            let json = fs::read_to_string(&path)?;
            let record = match AssessmentRecord::from_json(&name, &json) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "skipping unreadable assessment");
                    continue;
                }
            };
            if latest
                .as_ref()
                .is_none_or(|current| record.completed_at > current.completed_at)
            {
                latest = Some(record);
            }
        }
        Ok(latest)
    }
}

/// A stored log together with its ID (file name without `.json`)
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub id: String,
    pub log: StoredLog,
}

fn log_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn not_found_or_io(e: io::Error, id: &str) -> MoodjourError {
    if e.kind() == io::ErrorKind::NotFound {
        MoodjourError::LogNotFound(id.to_string())
    } else {
        MoodjourError::Io(e)
    }
}

/// `*.json` files directly inside `dir`
fn json_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect()
}

/// Write `contents` to `<dir>/<stem>-<n>.json` for the first `n` not taken.
///
/// The file is claimed with `create_new`, so concurrent writers never share a name.
fn create_numbered(dir: &Path, stem: &str, contents: &str) -> Result<String> {
    fs::create_dir_all(dir)?;

    let mut sequence: u32 = 1;
    loop {
        let filename = format!("{}-{}.json", stem, sequence);
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(dir.join(&filename))
        {
            Ok(mut file) => {
                file.write_all(contents.as_bytes())?;
                return Ok(filename);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => sequence += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

impl EntryStore for FileSystemStore {
    fn fetch_recent_entries(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: Option<usize>,
    ) -> Result<Vec<JournalEntry>> {
        let entries: Vec<JournalEntry> = self
            .list_logs(from, to, limit)?
            .into_iter()
            .map(|record| record.log.into_entry())
            .collect();

        tracing::debug!(count = entries.len(), "fetched journal entries");
        Ok(entries)
    }
}

impl JournalRepository for FileSystemStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_state_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let state_dir = self.root.join(STATE_DIR);

        if state_dir.exists() {
            return Err(MoodjourError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(&state_dir)?;
        fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::payload::DetectedEmotion;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileSystemStore) {
        crate::logging::init_test();
        let temp = TempDir::new().unwrap();
        let store = FileSystemStore::new(temp.path().to_path_buf());
        store.initialize().unwrap();
        (temp, store)
    }

    fn log(date: &str, text: &str) -> StoredLog {
        StoredLog {
            user_text: text.to_string(),
            date: date.to_string(),
            detected_emotions: Some(vec![DetectedEmotion::new("calm", 0.5)]),
            ..Default::default()
        }
    }

    fn texts(entries: &[JournalEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_initialize_twice_fails() {
        let (_temp, store) = store();
        assert!(store.is_initialized());
        assert!(store.initialize().is_err());
    }

    #[test]
    fn test_append_uses_next_sequence() {
        let (_temp, store) = store();
        assert_eq!(store.append_log(&log("2025-01-17", "a")).unwrap(), "2025-01-17-1.json");
        assert_eq!(store.append_log(&log("2025-01-17", "b")).unwrap(), "2025-01-17-2.json");
        assert_eq!(store.append_log(&log("2025-01-18", "c")).unwrap(), "2025-01-18-1.json");
    }

    #[test]
    fn test_append_never_overwrites_existing_file() {
        let (temp, store) = store();
        let taken = temp.path().join("logs/2025-01-17-1.json");
        fs::write(&taken, "{}").unwrap();

        assert_eq!(store.append_log(&log("2025-01-17", "a")).unwrap(), "2025-01-17-2.json");
        assert_eq!(fs::read_to_string(&taken).unwrap(), "{}");
    }

    #[test]
    fn test_concurrent_appends_get_distinct_files() {
        let (temp, store) = store();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .append_log(&log("2025-01-17", &format!("writer {i}")))
                        .unwrap()
                })
            })
            .collect();

        let mut names: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 8);
        assert_eq!(fs::read_dir(temp.path().join("logs")).unwrap().count(), 8);
    }

    #[test]
    fn test_read_replace_delete_log() {
        let (_temp, store) = store();
        store.append_log(&log("2025-01-17", "first")).unwrap();

        let mut record = store.read_log("2025-01-17-1").unwrap();
        assert_eq!(record.id, "2025-01-17-1");
        assert_eq!(record.log.user_text, "first");
        assert_eq!(store.read_log("2025-01-17-1.json").unwrap(), record);

        record.log.questionnaire = Some(serde_json::json!({"mood": 3}));
        store.replace_log(&record).unwrap();
        assert_eq!(
            store.read_log("2025-01-17-1").unwrap().log.questionnaire,
            Some(serde_json::json!({"mood": 3}))
        );

        store.delete_log("2025-01-17-1").unwrap();
        assert!(matches!(
            store.read_log("2025-01-17-1"),
            Err(MoodjourError::LogNotFound(_))
        ));
        assert!(matches!(
            store.delete_log("2025-01-17-1"),
            Err(MoodjourError::LogNotFound(_))
        ));
    }

    #[test]
    fn test_log_ids_cannot_escape_logs_dir() {
        let (_temp, store) = store();
        for id in ["../.moodjour/config", "a/b", "", "  "] {
            assert!(
                matches!(store.read_log(id), Err(MoodjourError::InvalidLogId(_))),
                "{id:?} accepted"
            );
        }
    }

    #[test]
    fn test_list_logs_carries_ids() {
        let (_temp, store) = store();
        store.append_log(&log("2025-01-10", "old")).unwrap();
        store.append_log(&log("2025-01-20", "new")).unwrap();

        let records = store.list_logs(None, None, Some(1)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "2025-01-20-1");
    }

    #[test]
    fn test_latest_assessment() {
        use crate::domain::assessment::score;
        use chrono::{TimeZone, Utc};

        let (_temp, store) = store();
        assert!(store.latest_assessment().unwrap().is_none());

        let older = AssessmentRecord::new(
            [1; 20],
            score(&[1; 20]),
            Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap(),
        );
        let newer = AssessmentRecord::new(
            [5; 20],
            score(&[5; 20]),
            Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap(),
        );
        assert_eq!(
            store.append_assessment(&newer).unwrap(),
            "tas20-2025-02-01-1.json"
        );
        store.append_assessment(&older).unwrap();

        assert_eq!(store.latest_assessment().unwrap(), Some(newer));
    }

    #[test]
    fn test_append_rejects_bad_date() {
        let (_temp, store) = store();
        match store.append_log(&log("17/01/2025", "a")).unwrap_err() {
            MoodjourError::InvalidDate(_) => {}
            other => panic!("Expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn test_fetch_sorted_newest_first_with_limit() {
        let (_temp, store) = store();
        store.append_log(&log("2025-01-10", "old")).unwrap();
        store.append_log(&log("2025-01-20", "new")).unwrap();
        store.append_log(&log("2025-01-15", "mid")).unwrap();

        let all = store.fetch_recent_entries(None, None, None).unwrap();
        assert_eq!(texts(&all), vec!["new", "mid", "old"]);

        let limited = store.fetch_recent_entries(None, None, Some(2)).unwrap();
        assert_eq!(texts(&limited), vec!["new", "mid"]);
    }

    #[test]
    fn test_fetch_date_range_keeps_malformed_dates() {
        let (temp, store) = store();
        store.append_log(&log("2025-01-10", "old")).unwrap();
        store.append_log(&log("2025-01-15", "mid")).unwrap();
        fs::write(
            temp.path().join("logs/imported.json"),
            r#"{"userText": "undated", "date": "someday"}"#,
        )
        .unwrap();

        let from = NaiveDate::from_ymd_opt(2025, 1, 12);
        let entries = store.fetch_recent_entries(from, None, None).unwrap();
        assert_eq!(texts(&entries), vec!["mid", "undated"]);
    }

    #[test]
    fn test_fetch_skips_malformed_files() {
        let (temp, store) = store();
        store.append_log(&log("2025-01-10", "ok")).unwrap();
        fs::write(temp.path().join("logs/broken.json"), "{oops").unwrap();
        fs::write(temp.path().join("logs/notes.txt"), "ignored").unwrap();

        let entries = store.fetch_recent_entries(None, None, None).unwrap();
        assert_eq!(texts(&entries), vec!["ok"]);
    }

    #[test]
    fn test_fetch_without_logs_dir() {
        let temp = TempDir::new().unwrap();
        let store = FileSystemStore::new(temp.path().to_path_buf());
        assert!(store.fetch_recent_entries(None, None, None).unwrap().is_empty());
    }

    #[test]
    fn test_discover_from_nested_directory() {
        let (temp, _store) = store();
        let nested = temp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let found = FileSystemStore::discover_from(&nested).unwrap();
        assert_eq!(found.root, temp.path());
    }

    #[test]
    fn test_discover_from_outside_journal() {
        let temp = TempDir::new().unwrap();
        match FileSystemStore::discover_from(temp.path()).unwrap_err() {
            MoodjourError::NotMoodjourDirectory(_) => {}
            other => panic!("Expected NotMoodjourDirectory, got {other:?}"),
        }
    }
}
