//! Logging streak and day-to-day emotional consistency

use super::entry::JournalEntry;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Distinct dates needed before consistency is reported
pub const MIN_CONSISTENCY_DATES: usize = 3;

/// How many adjacent-day transitions shared at least one emotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    pub consistent_transitions: usize,
    pub total_transitions: usize,
}

/// Consecutive days with at least one entry, walking back from `today`.
///
/// Entries with malformed dates are ignored. Returns 0 when `today` has no entry.
pub fn current_streak(entries: &[JournalEntry], today: NaiveDate) -> usize {
    let days: BTreeSet<NaiveDate> = entries
        .iter()
        .filter_map(JournalEntry::calendar_date)
        .collect();

    let mut streak = 0;
    let mut cursor = today;
    while days.contains(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }
    streak
}

/// Compare the emotion sets of chronologically adjacent distinct dates.
///
/// All entries of a date contribute to that date's set. `None` when fewer than
/// three distinct dates parse.
pub fn emotional_consistency(entries: &[JournalEntry]) -> Option<ConsistencyReport> {
    let mut by_date: BTreeMap<NaiveDate, BTreeSet<&str>> = BTreeMap::new();
    for entry in entries {
        let Some(date) = entry.calendar_date() else {
            tracing::debug!(date = %entry.date, "skipping entry with malformed date");
            continue;
        };
        by_date.entry(date).or_default().extend(entry.emotion_names());
    }

    if by_date.len() < MIN_CONSISTENCY_DATES {
        return None;
    }

    let days: Vec<&BTreeSet<&str>> = by_date.values().collect();
    let consistent_transitions = days
        .windows(2)
        .filter(|pair| !pair[0].is_disjoint(pair[1]))
        .count();

    Some(ConsistencyReport {
        consistent_transitions,
        total_transitions: days.len() - 1,
    })
}
