//! Journal pattern analyzer
//!
//! Runs every detector over the same borrowed log list and collects the
//! findings. Nothing here does I/O or keeps state between calls.

use super::emotions::{tally_entries, EmotionSummary};
use super::entry::JournalEntry;
use super::findings::{FindingData, FindingKind, PatternFinding};
use super::insight;
use super::streak::emotional_consistency;
use super::temporal::detect_temporal_patterns;
use super::triggers::TriggerVocabulary;
use chrono::NaiveDate;

/// Emotions listed in the frequency finding
pub const TOP_EMOTIONS: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct PatternAnalyzer {
    vocabulary: TriggerVocabulary,
}

impl PatternAnalyzer {
    pub fn new(vocabulary: TriggerVocabulary) -> Self {
        PatternAnalyzer { vocabulary }
    }

    pub fn vocabulary(&self) -> &TriggerVocabulary {
        &self.vocabulary
    }

    /// All findings for `entries`, in a fixed kind order:
    /// frequency, consistency, time of day, day of week, situational, physical.
    pub fn analyze(&self, entries: &[JournalEntry]) -> Vec<PatternFinding> {
        let mut findings = Vec::new();
        findings.extend(frequency_finding(entries));
        findings.extend(consistency_finding(entries));
        findings.extend(detect_temporal_patterns(entries));
        findings.extend(self.vocabulary.detect_situational(entries));
        findings.extend(self.vocabulary.detect_physical(entries));

        tracing::debug!(
            entries = entries.len(),
            findings = findings.len(),
            "pattern analysis complete"
        );
        findings
    }

    /// Aggregate emotion summary for the same input
    pub fn summarize(&self, entries: &[JournalEntry]) -> EmotionSummary {
        EmotionSummary::aggregate(entries)
    }

    /// Current daily streak ending at `today`
    pub fn streak(&self, entries: &[JournalEntry], today: NaiveDate) -> usize {
        super::streak::current_streak(entries, today)
    }
}

fn frequency_finding(entries: &[JournalEntry]) -> Option<PatternFinding> {
    let mut top = tally_entries(entries).ranked();
    top.truncate(TOP_EMOTIONS);
    let insight = insight::frequency(top.first()?);
    Some(PatternFinding::new(
        FindingKind::Frequency,
        FindingData::Frequencies(top),
        insight,
    ))
}

fn consistency_finding(entries: &[JournalEntry]) -> Option<PatternFinding> {
    let report = emotional_consistency(entries)?;
    if report.consistent_transitions == 0 {
        return None;
    }
    Some(PatternFinding::new(
        FindingKind::Consistency,
        FindingData::Consistency(report),
        insight::consistency(&report),
    ))
}
