//! Analyze journal use case
//!
//! Fetches a snapshot of recent entries from the store and hands it, borrowed,
//! to the pattern analyzer.

use crate::domain::{
    DashboardStats, JournalEntry, PatternAnalyzer, PatternFinding, VocabularyReport,
};
use crate::error::Result;
use crate::infrastructure::{EntryStore, FileSystemStore, JournalRepository};
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Options for an analysis run
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Days back from today (default: config `range_days`)
    pub days: Option<u32>,

    /// Maximum entries analyzed (default: config `limit`)
    pub limit: Option<usize>,
}

/// Everything the analytics view shows for one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub today: NaiveDate,
    pub from: NaiveDate,
    pub stats: DashboardStats,
    pub findings: Vec<PatternFinding>,
    pub vocabulary: VocabularyReport,
}

impl AnalysisReport {
    /// Build a report from an already-fetched entry list
    pub fn build(
        analyzer: &PatternAnalyzer,
        entries: &[JournalEntry],
        today: NaiveDate,
        from: NaiveDate,
    ) -> Self {
        AnalysisReport {
            today,
            from,
            stats: DashboardStats::compute(entries, today),
            findings: analyzer.analyze(entries),
            vocabulary: VocabularyReport::analyze(entries),
        }
    }
}

/// Service for analyzing recent entries
pub struct AnalyzeService {
    store: FileSystemStore,
}

impl AnalyzeService {
    pub fn new(store: FileSystemStore) -> Self {
        AnalyzeService { store }
    }

    pub fn execute(&self, options: AnalyzeOptions, today: NaiveDate) -> Result<AnalysisReport> {
        let config = self.store.load_config()?;
        let days = options.days.unwrap_or(config.analysis.range_days);
        let limit = options.limit.unwrap_or(config.analysis.limit);

        // A window reaching past the calendar start covers everything
        let from = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        let entries = self
            .store
            .fetch_recent_entries(Some(from), Some(today), Some(limit))?;

        tracing::info!(
            root = %self.store.root().display(),
            entries = entries.len(),
            days,
            limit,
            "analyzing journal entries"
        );

        let analyzer = PatternAnalyzer::new(config.analysis.vocabulary());
        Ok(AnalysisReport::build(&analyzer, &entries, today, from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::InitService;
    use crate::domain::FindingKind;
    use crate::infrastructure::{DetectedEmotion, StoredLog};
    use tempfile::TempDir;

    fn log(date: &str, text: &str, emotions: &[&str]) -> StoredLog {
        StoredLog {
            user_text: text.to_string(),
            date: date.to_string(),
            detected_emotions: Some(
                emotions
                    .iter()
                    .map(|n| DetectedEmotion::new(*n, 0.5))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
    }

    fn journal() -> (TempDir, FileSystemStore) {
        let temp = TempDir::new().unwrap();
        InitService::execute(temp.path()).unwrap();
        let store = FileSystemStore::new(temp.path().to_path_buf());
        (temp, store)
    }

    #[test]
    fn test_empty_journal_has_no_findings() {
        let (_temp, store) = journal();
        let report = AnalyzeService::new(store)
            .execute(AnalyzeOptions::default(), today())
            .unwrap();
        assert_eq!(report.stats.total_entries, 0);
        assert!(report.findings.is_empty());
        assert_eq!(report.from, NaiveDate::from_ymd_opt(2024, 12, 21).unwrap());
    }

    #[test]
    fn test_range_and_limit() {
        let (_temp, store) = journal();
        store.append_log(&log("2025-01-20", "a", &["joy"])).unwrap();
        store.append_log(&log("2025-01-19", "b", &["joy"])).unwrap();
        store.append_log(&log("2025-01-18", "c", &["joy"])).unwrap();
        store.append_log(&log("2024-11-01", "old", &["fear"])).unwrap();

        let service = AnalyzeService::new(store);
        let report = service
            .execute(AnalyzeOptions::default(), today())
            .unwrap();
        assert_eq!(report.stats.total_entries, 3);
        assert_eq!(report.stats.streak_days, 3);
        assert_eq!(report.stats.most_common_emotion.as_deref(), Some("joy"));

        let limited = service
            .execute(
                AnalyzeOptions {
                    days: Some(365),
                    limit: Some(2),
                },
                today(),
            )
            .unwrap();
        assert_eq!(limited.stats.total_entries, 2);
    }

    #[test]
    fn test_huge_range_reaches_calendar_start() {
        let (_temp, store) = journal();
        store.append_log(&log("1999-06-01", "old", &["fear"])).unwrap();

        let report = AnalyzeService::new(store)
            .execute(
                AnalyzeOptions {
                    days: Some(200_000_000),
                    limit: None,
                },
                today(),
            )
            .unwrap();
        assert_eq!(report.from, NaiveDate::MIN);
        assert_eq!(report.stats.total_entries, 1);
    }

    #[test]
    fn test_uses_configured_vocabulary() {
        let (_temp, store) = journal();
        let mut config = store.load_config().unwrap();
        config.analysis.situational_terms = vec!["commute".to_string()];
        store.save_config(&config).unwrap();

        store
            .append_log(&log("2025-01-19", "the commute again", &["anger"]))
            .unwrap();
        store
            .append_log(&log("2025-01-20", "commute and work", &["anger"]))
            .unwrap();

        let report = AnalyzeService::new(store)
            .execute(AnalyzeOptions::default(), today())
            .unwrap();
        let situational = report
            .findings
            .iter()
            .find(|f| f.kind == FindingKind::Situational)
            .unwrap();
        assert_eq!(situational.groups().len(), 1);
        assert_eq!(situational.groups()[0].key, "commute");
    }
}
