//! Insight sentences: one fixed template per finding kind
//!
//! Values are interpolated verbatim; emotion names keep the casing the
//! detector gave them.

use super::emotions::{EmotionCount, GroupPattern};
use super::findings::{FindingData, FindingKind, PatternFinding};
use super::streak::ConsistencyReport;

pub fn frequency(top: &EmotionCount) -> String {
    format!(
        "Your most frequently detected emotion is \"{}\" appearing {} times.",
        top.emotion, top.count
    )
}

pub fn time_of_day(top: &GroupPattern) -> String {
    format!(
        "\"{}\" occurs most often during {}.",
        top.dominant_emotion, top.key
    )
}

pub fn day_of_week(top: &GroupPattern) -> String {
    format!(
        "{}s show the highest emotional activity, with \"{}\" being most common.",
        top.key, top.dominant_emotion
    )
}

pub fn situational(top: &GroupPattern) -> String {
    format!(
        "\"{}\" appears to be a significant situational trigger, often associated with \"{}\".",
        top.key, top.dominant_emotion
    )
}

pub fn physical(top: &GroupPattern) -> String {
    format!(
        "{} sensations frequently correlate with \"{}\" emotional experiences.",
        top.key, top.dominant_emotion
    )
}

pub fn consistency(report: &ConsistencyReport) -> String {
    format!(
        "You showed consistent emotional patterns across {} of {} day transitions.",
        report.consistent_transitions, report.total_transitions
    )
}

/// Wrap ranked groups into a finding; `None` when nothing qualified
pub fn group_finding(kind: FindingKind, groups: Vec<GroupPattern>) -> Option<PatternFinding> {
    let top = groups.first()?;
    let insight = match kind {
        FindingKind::TemporalTime => time_of_day(top),
        FindingKind::TemporalDay => day_of_week(top),
        FindingKind::Situational => situational(top),
        FindingKind::Physical => physical(top),
        FindingKind::Frequency | FindingKind::Consistency => return None,
    };
    Some(PatternFinding::new(kind, FindingData::Groups(groups), insight))
}
