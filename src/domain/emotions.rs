//! Emotion aggregation: frequency tables, dominant emotion, categories
//!
//! Every table here remembers first-seen order. "Most frequent" ties are
//! always resolved in favour of the name encountered first in the input.

use super::entry::{EmotionTag, JournalEntry};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Occurrence count of a single emotion name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmotionCount {
    pub emotion: String,
    pub count: usize,
}

/// Emotion name -> occurrence count, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct EmotionTally {
    order: Vec<String>,
    counts: HashMap<String, usize>,
    total: usize,
}

impl EmotionTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str) {
        match self.counts.get_mut(name) {
            Some(count) => *count += 1,
            None => {
                self.order.push(name.to_string());
                self.counts.insert(name.to_string(), 1);
            }
        }
        self.total += 1;
    }

    pub fn extend<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.record(name);
        }
    }

    pub fn count(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Total occurrences across all names
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Distinct names in first-seen order
    pub fn distinct(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Highest count wins; on a tie the earliest-seen name is kept.
    pub fn dominant(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for name in &self.order {
            let count = self.counts[name];
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((name, count));
            }
        }
        best.map(|(name, _)| name)
    }

    /// Counts in first-seen order
    pub fn counts(&self) -> Vec<EmotionCount> {
        self.order
            .iter()
            .map(|name| EmotionCount {
                emotion: name.clone(),
                count: self.counts[name],
            })
            .collect()
    }

    /// Counts sorted by count descending; ties stay in first-seen order
    pub fn ranked(&self) -> Vec<EmotionCount> {
        let mut ranked = self.counts();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }
}

/// One qualifying group (time bucket, weekday, trigger term, body area)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupPattern {
    pub key: String,
    /// Distinct emotions seen in the group, first-seen order
    pub emotions: Vec<String>,
    /// Accumulated emotion occurrences
    pub frequency: usize,
    pub dominant_emotion: String,
}

/// Emotion tallies keyed by an arbitrary group label, in first-touch order
#[derive(Debug, Clone, Default)]
pub struct EmotionGroups {
    groups: Vec<(String, EmotionTally)>,
}

impl EmotionGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally for `key`, created on first touch
    pub fn group_mut(&mut self, key: &str) -> &mut EmotionTally {
        let index = match self.groups.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.groups.push((key.to_string(), EmotionTally::new()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index].1
    }

    /// Groups with at least `min_support` occurrences, most active first
    pub fn significant(&self, min_support: usize) -> Vec<GroupPattern> {
        let mut patterns: Vec<GroupPattern> = self
            .groups
            .iter()
            .filter(|(_, tally)| tally.total() >= min_support)
            .filter_map(|(key, tally)| {
                let dominant = tally.dominant()?;
                Some(GroupPattern {
                    key: key.clone(),
                    emotions: tally.distinct(),
                    frequency: tally.total(),
                    dominant_emotion: dominant.to_string(),
                })
            })
            .collect();

        patterns.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        patterns
    }
}

/// Aggregate view of every emotion tag in a log list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionSummary {
    /// Occurrence counts, first-seen order
    pub frequencies: Vec<EmotionCount>,
    /// Distinct names, first-seen order
    pub vocabulary: Vec<String>,
    /// `None` when no emotion was ever detected
    pub dominant: Option<String>,
    /// Mean confidence over all tags, 0 when there are none
    pub average_confidence: f64,
    pub total_tags: usize,
}

impl EmotionSummary {
    pub fn aggregate(entries: &[JournalEntry]) -> Self {
        let tally = tally_entries(entries);
        let tags: Vec<EmotionTag> = entries
            .iter()
            .flat_map(|e| e.emotions.iter().cloned())
            .collect();

        EmotionSummary {
            frequencies: tally.counts(),
            vocabulary: tally.distinct(),
            dominant: tally.dominant().map(str::to_string),
            average_confidence: emotion_intensity(&tags),
            total_tags: tally.total(),
        }
    }

    pub fn has_data(&self) -> bool {
        self.total_tags > 0
    }

    pub fn count(&self, name: &str) -> usize {
        self.frequencies
            .iter()
            .find(|c| c.emotion == name)
            .map_or(0, |c| c.count)
    }
}

/// Tally every emotion occurrence across `entries`
pub fn tally_entries(entries: &[JournalEntry]) -> EmotionTally {
    let mut tally = EmotionTally::new();
    for entry in entries {
        tally.extend(entry.emotion_names());
    }
    tally
}

/// Mean confidence of a set of tags ("intensity"), 0 when empty
pub fn emotion_intensity(tags: &[EmotionTag]) -> f64 {
    let sum: f64 = tags.iter().map(|t| t.confidence).sum();
    average_or_zero(sum, tags.len())
}

fn average_or_zero(sum: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Coarse valence family of an emotion name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    Positive,
    Negative,
    Neutral,
    Complex,
}

const POSITIVE: [&str; 6] = [
    "joy",
    "happiness",
    "excitement",
    "contentment",
    "gratitude",
    "love",
];
const NEGATIVE: [&str; 6] = [
    "sadness",
    "anger",
    "fear",
    "anxiety",
    "frustration",
    "disappointment",
];
const NEUTRAL: [&str; 4] = ["neutral", "calm", "thoughtful", "curious"];
const COMPLEX: [&str; 4] = ["bittersweet", "nostalgic", "conflicted", "overwhelmed"];

impl EmotionCategory {
    pub const ALL: [EmotionCategory; 4] = [
        EmotionCategory::Positive,
        EmotionCategory::Negative,
        EmotionCategory::Neutral,
        EmotionCategory::Complex,
    ];

    /// Case-insensitive lookup; unknown names are neutral
    pub fn of(name: &str) -> Self {
        let lower = name.trim().to_lowercase();
        let lower = lower.as_str();
        if POSITIVE.contains(&lower) {
            EmotionCategory::Positive
        } else if NEGATIVE.contains(&lower) {
            EmotionCategory::Negative
        } else if COMPLEX.contains(&lower) {
            EmotionCategory::Complex
        } else {
            EmotionCategory::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmotionCategory::Positive => "positive",
            EmotionCategory::Negative => "negative",
            EmotionCategory::Neutral => "neutral",
            EmotionCategory::Complex => "complex",
        }
    }
}

impl fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Split tags into the four categories, preserving tag order within each
pub fn group_by_category(tags: &[EmotionTag]) -> Vec<(EmotionCategory, Vec<EmotionTag>)> {
    EmotionCategory::ALL
        .iter()
        .map(|category| {
            let members = tags
                .iter()
                .filter(|t| EmotionCategory::of(&t.name) == *category)
                .cloned()
                .collect();
            (*category, members)
        })
        .collect()
}
