//! Pattern findings produced by the analyzer

use super::emotions::{EmotionCount, GroupPattern};
use super::streak::ConsistencyReport;
use serde::Serialize;
use std::fmt;

/// What a finding describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    Frequency,
    TemporalTime,
    TemporalDay,
    Situational,
    Physical,
    Consistency,
}

impl FindingKind {
    pub fn title(&self) -> &'static str {
        match self {
            FindingKind::Frequency => "Most Common Emotions",
            FindingKind::TemporalTime => "Time of Day Patterns",
            FindingKind::TemporalDay => "Day of Week Patterns",
            FindingKind::Situational => "Situational Triggers",
            FindingKind::Physical => "Physical-Emotional Correlations",
            FindingKind::Consistency => "Emotional Consistency",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FindingKind::Frequency => "frequency",
            FindingKind::TemporalTime => "temporal_time",
            FindingKind::TemporalDay => "temporal_day",
            FindingKind::Situational => "situational",
            FindingKind::Physical => "physical",
            FindingKind::Consistency => "consistency",
        };
        f.write_str(name)
    }
}

/// Kind-specific payload of a finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FindingData {
    /// Top emotions, most frequent first
    Frequencies(Vec<EmotionCount>),
    /// Buckets, trigger terms or body areas, most active first
    Groups(Vec<GroupPattern>),
    Consistency(ConsistencyReport),
}

/// A named pattern with its human-readable summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternFinding {
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub title: String,
    pub data: FindingData,
    pub insight: String,
}

impl PatternFinding {
    pub fn new(kind: FindingKind, data: FindingData, insight: String) -> Self {
        PatternFinding {
            kind,
            title: kind.title().to_string(),
            data,
            insight,
        }
    }

    /// Group payload, if this finding carries one
    pub fn groups(&self) -> &[GroupPattern] {
        match &self.data {
            FindingData::Groups(groups) => groups,
            _ => &[],
        }
    }
}
