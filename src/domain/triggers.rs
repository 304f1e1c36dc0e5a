//! Keyword trigger scanning
//!
//! Plain case-insensitive substring matching over a fixed vocabulary: no
//! stemming, no negation. "hardship" matches "hard", "renewal" matches "new".

use super::emotions::EmotionGroups;
use super::entry::JournalEntry;
use super::findings::{FindingKind, PatternFinding};
use super::insight;
use serde::{Deserialize, Serialize};

/// Entries needed before triggers are looked for
pub const MIN_TRIGGER_ENTRIES: usize = 2;

/// Occurrences a term or body area needs to be reported
pub const MIN_TRIGGER_SUPPORT: usize = 2;

const SITUATIONAL_TERMS: [&str; 20] = [
    "work",
    "meeting",
    "deadline",
    "project",
    "family",
    "friend",
    "relationship",
    "social",
    "tired",
    "stressed",
    "overwhelmed",
    "busy",
    "change",
    "new",
    "different",
    "unexpected",
    "loud",
    "bright",
    "crowded",
    "quiet",
];

const PHYSICAL_CATEGORIES: [(&str, &[&str]); 6] = [
    ("head", &["headache", "head", "migraine"]),
    ("stomach", &["stomach", "nausea", "sick", "gut"]),
    ("chest", &["chest", "heart", "breathing", "breath"]),
    ("shoulders", &["shoulders", "neck", "tension", "tight"]),
    ("energy", &["tired", "exhausted", "energy", "fatigue"]),
    ("sleep", &["sleep", "insomnia", "rest", "wake"]),
];

/// A body area and the words that indicate it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalCategory {
    pub name: String,
    pub terms: Vec<String>,
}

impl PhysicalCategory {
    fn matches(&self, lowered_text: &str) -> bool {
        self.terms
            .iter()
            .any(|term| lowered_text.contains(&term.to_lowercase()))
    }
}

/// Keyword tables used by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerVocabulary {
    pub situational_terms: Vec<String>,
    pub physical_categories: Vec<PhysicalCategory>,
}

impl Default for TriggerVocabulary {
    fn default() -> Self {
        TriggerVocabulary {
            situational_terms: SITUATIONAL_TERMS.iter().map(|t| t.to_string()).collect(),
            physical_categories: PHYSICAL_CATEGORIES
                .iter()
                .map(|(name, terms)| PhysicalCategory {
                    name: name.to_string(),
                    terms: terms.iter().map(|t| t.to_string()).collect(),
                })
                .collect(),
        }
    }
}

impl TriggerVocabulary {
    /// Situational trigger finding, if any term reaches the support threshold
    pub fn detect_situational(&self, entries: &[JournalEntry]) -> Option<PatternFinding> {
        if entries.len() < MIN_TRIGGER_ENTRIES {
            return None;
        }

        let mut triggers = EmotionGroups::new();
        for entry in entries {
            let text = entry.text.to_lowercase();
            for term in &self.situational_terms {
                if text.contains(&term.to_lowercase()) {
                    triggers.group_mut(term).extend(entry.emotion_names());
                }
            }
        }

        insight::group_finding(
            FindingKind::Situational,
            triggers.significant(MIN_TRIGGER_SUPPORT),
        )
    }

    /// Physical-emotional correlation finding.
    ///
    /// Only entries that carry emotions open a category.
    pub fn detect_physical(&self, entries: &[JournalEntry]) -> Option<PatternFinding> {
        if entries.len() < MIN_TRIGGER_ENTRIES {
            return None;
        }

        let mut correlations = EmotionGroups::new();
        for entry in entries.iter().filter(|e| !e.emotions.is_empty()) {
            let text = entry.text.to_lowercase();
            for category in &self.physical_categories {
                if category.matches(&text) {
                    correlations
                        .group_mut(&category.name)
                        .extend(entry.emotion_names());
                }
            }
        }

        insight::group_finding(
            FindingKind::Physical,
            correlations.significant(MIN_TRIGGER_SUPPORT),
        )
    }
}
