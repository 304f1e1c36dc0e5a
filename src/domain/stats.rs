//! Dashboard statistics over a log list

use super::emotions::{group_by_category, EmotionCategory, EmotionCount, EmotionSummary};
use super::entry::{EmotionTag, JournalEntry};
use super::streak::current_streak;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Emotions shown in the distribution breakdown
pub const DISTRIBUTION_SIZE: usize = 6;

/// Days covered by the trend, ending today
pub const TREND_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: EmotionCategory,
    pub count: usize,
}

/// Emotion tags recorded on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub emotions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_entries: usize,
    /// Rounded to one decimal
    pub avg_emotions_per_entry: f64,
    pub most_common_emotion: Option<String>,
    pub streak_days: usize,
    pub average_confidence: f64,
    pub vocabulary_size: usize,
    /// First emotions in first-seen order
    pub distribution: Vec<EmotionCount>,
    pub category_counts: Vec<CategoryCount>,
    /// Oldest day first
    pub trend: Vec<TrendPoint>,
}

impl DashboardStats {
    pub fn compute(entries: &[JournalEntry], today: NaiveDate) -> Self {
        let summary = EmotionSummary::aggregate(entries);

        let avg_emotions_per_entry = if entries.is_empty() {
            0.0
        } else {
            let raw = summary.total_tags as f64 / entries.len() as f64;
            (raw * 10.0).round() / 10.0
        };

        let distribution = summary
            .frequencies
            .iter()
            .take(DISTRIBUTION_SIZE)
            .cloned()
            .collect();

        DashboardStats {
            total_entries: entries.len(),
            avg_emotions_per_entry,
            most_common_emotion: summary.dominant.clone(),
            streak_days: current_streak(entries, today),
            average_confidence: summary.average_confidence,
            vocabulary_size: summary.vocabulary.len(),
            distribution,
            category_counts: category_counts(entries),
            trend: weekly_trend(entries, today),
        }
    }
}

fn category_counts(entries: &[JournalEntry]) -> Vec<CategoryCount> {
    let tags: Vec<EmotionTag> = entries
        .iter()
        .flat_map(|e| e.emotions.iter().cloned())
        .collect();
    group_by_category(&tags)
        .into_iter()
        .map(|(category, members)| CategoryCount {
            category,
            count: members.len(),
        })
        .collect()
}

fn weekly_trend(entries: &[JournalEntry], today: NaiveDate) -> Vec<TrendPoint> {
    (0..TREND_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let emotions = entries
                .iter()
                .filter(|e| e.calendar_date() == Some(date))
                .map(|e| e.emotions.len())
                .sum();
            TrendPoint { date, emotions }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::EmotionTag;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    #[test]
    fn test_empty_stats() {
        let stats = DashboardStats::compute(&[], today());
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.avg_emotions_per_entry, 0.0);
        assert_eq!(stats.most_common_emotion, None);
        assert_eq!(stats.streak_days, 0);
        assert_eq!(stats.trend.len(), 7);
        assert!(stats.trend.iter().all(|p| p.emotions == 0));
    }

    #[test]
    fn test_stats_over_entries() {
        let entries = vec![
            JournalEntry::new(
                "2024-01-03",
                "",
                vec![EmotionTag::new("joy", 0.9), EmotionTag::new("fear", 0.3)],
            ),
            JournalEntry::new("2024-01-02", "", vec![EmotionTag::new("joy", 0.6)]),
            JournalEntry::new("2023-12-01", "", vec![]),
        ];
        let stats = DashboardStats::compute(&entries, today());
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.avg_emotions_per_entry, 1.0);
        assert_eq!(stats.most_common_emotion.as_deref(), Some("joy"));
        assert_eq!(stats.streak_days, 2);
        assert_eq!(stats.vocabulary_size, 2);
        assert!((stats.average_confidence - 0.6).abs() < 1e-9);

        let last = stats.trend.last().unwrap();
        assert_eq!(last.date, today());
        assert_eq!(last.emotions, 2);
        assert_eq!(stats.trend[5].emotions, 1);

        assert_eq!(stats.category_counts[0].category, EmotionCategory::Positive);
        assert_eq!(stats.category_counts[0].count, 2);
        assert_eq!(stats.category_counts[1].count, 1);
    }

    #[test]
    fn test_average_is_rounded() {
        let entries = vec![
            JournalEntry::new("2024-01-01", "", vec![EmotionTag::new("a", 1.0)]),
            JournalEntry::new("2024-01-01", "", vec![EmotionTag::new("b", 1.0)]),
            JournalEntry::new(
                "2024-01-01",
                "",
                vec![EmotionTag::new("c", 1.0), EmotionTag::new("d", 1.0)],
            ),
        ];
        let stats = DashboardStats::compute(&entries, today());
        assert_eq!(stats.avg_emotions_per_entry, 1.3);
    }

    #[test]
    fn test_distribution_is_capped() {
        let tags = ["a", "b", "c", "d", "e", "f", "g"]
            .iter()
            .map(|n| EmotionTag::new(*n, 0.5))
            .collect();
        let entries = vec![JournalEntry::new("2024-01-01", "", tags)];
        let stats = DashboardStats::compute(&entries, today());
        assert_eq!(stats.distribution.len(), DISTRIBUTION_SIZE);
        assert_eq!(stats.distribution[0].emotion, "a");
    }
}
