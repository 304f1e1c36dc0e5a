//! Time-of-day and day-of-week emotion bucketing

use super::emotions::EmotionGroups;
use super::entry::JournalEntry;
use super::findings::{FindingKind, PatternFinding};
use super::insight;
use chrono::{Datelike, Timelike, Weekday};
use std::fmt;

/// Entries needed before temporal patterns are looked for
pub const MIN_TEMPORAL_ENTRIES: usize = 3;

/// Occurrences a bucket needs to count as a pattern
pub const MIN_BUCKET_SUPPORT: usize = 2;

/// Time-of-day bucket by local hour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSlot {
    /// [0, 6)
    Night,
    /// [6, 12)
    Morning,
    /// [12, 18)
    Afternoon,
    /// [18, 24)
    Evening,
}

impl TimeSlot {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=5 => TimeSlot::Night,
            6..=11 => TimeSlot::Morning,
            12..=17 => TimeSlot::Afternoon,
            _ => TimeSlot::Evening,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Night => "night",
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full English weekday name
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Time-of-day and day-of-week findings, in that order.
///
/// Entries whose timestamp does not parse are skipped; the minimum-entries
/// check still counts them.
pub fn detect_temporal_patterns(entries: &[JournalEntry]) -> Vec<PatternFinding> {
    if entries.len() < MIN_TEMPORAL_ENTRIES {
        return Vec::new();
    }

    let mut by_slot = EmotionGroups::new();
    let mut by_day = EmotionGroups::new();

    for entry in entries {
        let Some(timestamp) = entry.timestamp() else {
            tracing::debug!(date = %entry.date, "skipping entry with malformed timestamp");
            continue;
        };

        let slot = TimeSlot::from_hour(timestamp.hour());
        by_slot.group_mut(slot.as_str()).extend(entry.emotion_names());

        let day = day_name(timestamp.weekday());
        by_day.group_mut(day).extend(entry.emotion_names());
    }

    let mut findings = Vec::new();
    findings.extend(insight::group_finding(
        FindingKind::TemporalTime,
        by_slot.significant(MIN_BUCKET_SUPPORT),
    ));
    findings.extend(insight::group_finding(
        FindingKind::TemporalDay,
        by_day.significant(MIN_BUCKET_SUPPORT),
    ));
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::EmotionTag;

    fn at(timestamp: &str, emotions: &[&str]) -> JournalEntry {
        JournalEntry::new(
            &timestamp[..10],
            "",
            emotions.iter().map(|n| EmotionTag::new(*n, 0.5)).collect(),
        )
        .with_created_at(timestamp)
    }

    #[test]
    fn test_slot_boundaries() {
        assert_eq!(TimeSlot::from_hour(0), TimeSlot::Night);
        assert_eq!(TimeSlot::from_hour(5), TimeSlot::Night);
        assert_eq!(TimeSlot::from_hour(6), TimeSlot::Morning);
        assert_eq!(TimeSlot::from_hour(11), TimeSlot::Morning);
        assert_eq!(TimeSlot::from_hour(12), TimeSlot::Afternoon);
        assert_eq!(TimeSlot::from_hour(17), TimeSlot::Afternoon);
        assert_eq!(TimeSlot::from_hour(18), TimeSlot::Evening);
        assert_eq!(TimeSlot::from_hour(23), TimeSlot::Evening);
    }

    #[test]
    fn test_requires_three_entries() {
        let entries = vec![
            at("2024-01-01T20:00:00", &["fear", "fear"]),
            at("2024-01-02T20:00:00", &["fear"]),
        ];
        assert!(detect_temporal_patterns(&entries).is_empty());
    }

    #[test]
    fn test_evening_pattern() {
        // 2024-01-01 is a Monday
        let entries = vec![
            at("2024-01-01T20:00:00", &["anxiety"]),
            at("2024-01-08T21:30:00", &["anxiety", "calm"]),
            at("2024-01-03T09:00:00", &["joy"]),
        ];
        let findings = detect_temporal_patterns(&entries);
        assert_eq!(findings.len(), 2);

        let time = &findings[0];
        assert_eq!(time.kind, FindingKind::TemporalTime);
        assert_eq!(time.groups().len(), 1);
        assert_eq!(time.groups()[0].key, "evening");
        assert_eq!(time.groups()[0].frequency, 3);
        assert_eq!(
            time.insight,
            "\"anxiety\" occurs most often during evening."
        );

        let day = &findings[1];
        assert_eq!(day.kind, FindingKind::TemporalDay);
        assert_eq!(day.groups()[0].key, "Monday");
        assert!(day.insight.starts_with("Mondays show"));
    }

    #[test]
    fn test_never_reports_single_occurrence_bucket() {
        let entries = vec![
            at("2024-01-01T01:00:00", &["a"]),
            at("2024-01-02T07:00:00", &["b"]),
            at("2024-01-03T13:00:00", &["c"]),
            at("2024-01-04T19:00:00", &["d"]),
        ];
        let findings = detect_temporal_patterns(&entries);
        for finding in &findings {
            assert!(finding.groups().iter().all(|g| g.frequency >= 2));
        }
        assert!(findings
            .iter()
            .all(|f| f.kind != FindingKind::TemporalTime));
    }

    #[test]
    fn test_malformed_timestamps_are_skipped() {
        let entries = vec![
            JournalEntry::new("soon", "", vec![EmotionTag::new("joy", 1.0)]),
            JournalEntry::new("later", "", vec![EmotionTag::new("joy", 1.0)]),
            at("2024-01-01T08:00:00", &["joy"]),
        ];
        assert!(detect_temporal_patterns(&entries).is_empty());
    }

    #[test]
    fn test_plain_dates_land_in_night_bucket() {
        let entries = vec![
            JournalEntry::new("2024-01-01", "", vec![EmotionTag::new("calm", 1.0)]),
            JournalEntry::new("2024-01-02", "", vec![EmotionTag::new("calm", 1.0)]),
            JournalEntry::new("2024-01-03", "", vec![]),
        ];
        let findings = detect_temporal_patterns(&entries);
        assert_eq!(findings[0].groups()[0].key, "night");
    }
}
