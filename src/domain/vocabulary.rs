//! Emotional vocabulary growth and metaphor extraction

use super::emotions::tally_entries;
use super::entry::JournalEntry;
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Metaphors kept per report
pub const MAX_METAPHORS: usize = 10;

/// Characters of surrounding text kept on each side of a metaphor
const CONTEXT_RADIUS: usize = 50;

fn metaphor_regexes() -> &'static [Regex; 3] {
    static REGEXES: OnceLock<[Regex; 3]> = OnceLock::new();
    REGEXES.get_or_init(|| {
        [
            Regex::new(r"like (a|an) ([^.!?]+)").unwrap(),
            Regex::new(r"feels? like ([^.!?]+)").unwrap(),
            Regex::new(r"as if ([^.!?]+)").unwrap(),
        ]
    })
}

/// A figurative phrase lifted from an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metaphor {
    pub text: String,
    pub date: String,
    pub context: String,
}

/// Dates on which an emotion was detected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmotionTimeline {
    pub emotion: String,
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct VocabularyReport {
    pub vocabulary_size: usize,
    pub unique_emotions: Vec<String>,
    pub evolution: Vec<EmotionTimeline>,
    pub metaphors: Vec<Metaphor>,
    /// Distinct emotions per entry; 0 for fewer than two entries
    pub growth_rate: f64,
}

impl VocabularyReport {
    pub fn analyze(entries: &[JournalEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let unique_emotions = tally_entries(entries).distinct();

        let mut evolution: Vec<EmotionTimeline> = unique_emotions
            .iter()
            .map(|emotion| EmotionTimeline {
                emotion: emotion.clone(),
                dates: Vec::new(),
            })
            .collect();
        for entry in entries {
            let Some(date) = entry.calendar_date() else {
                continue;
            };
            for name in entry.emotion_names() {
                if let Some(timeline) = evolution.iter_mut().find(|t| t.emotion == name) {
                    timeline.dates.push(date);
                }
            }
        }

        let mut metaphors = Vec::new();
        for entry in entries {
            collect_metaphors(entry, &mut metaphors);
        }
        metaphors.truncate(MAX_METAPHORS);

        let vocabulary_size = unique_emotions.len();
        let growth_rate = if entries.len() > 1 {
            vocabulary_size as f64 / entries.len() as f64
        } else {
            0.0
        };

        VocabularyReport {
            vocabulary_size,
            unique_emotions,
            evolution,
            metaphors,
            growth_rate,
        }
    }
}

fn collect_metaphors(entry: &JournalEntry, output: &mut Vec<Metaphor>) {
    let lowered = entry.text.to_lowercase();
    // Context is cut from the raw text whenever match offsets line up with it
    let source = if same_layout(&entry.text, &lowered) {
        entry.text.as_str()
    } else {
        lowered.as_str()
    };

    for regex in metaphor_regexes() {
        for found in regex.find_iter(&lowered) {
            output.push(Metaphor {
                text: found.as_str().to_string(),
                date: entry.date.clone(),
                context: context_around(source, found.start()),
            });
        }
    }
}

/// True when every char of `raw` lowercases to a single char of equal width
fn same_layout(raw: &str, lowered: &str) -> bool {
    raw.len() == lowered.len()
        && raw.chars().count() == lowered.chars().count()
        && raw
            .chars()
            .zip(lowered.chars())
            .all(|(a, b)| a.len_utf8() == b.len_utf8())
}

/// Up to `CONTEXT_RADIUS` characters either side of byte offset `at`
fn context_around(text: &str, at: usize) -> String {
    let before: Vec<char> = text[..at].chars().collect();
    let skip = before.len().saturating_sub(CONTEXT_RADIUS);
    let mut context: String = before[skip..].iter().collect();
    context.extend(text[at..].chars().take(CONTEXT_RADIUS));
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::EmotionTag;

    #[test]
    fn test_empty_report() {
        let report = VocabularyReport::analyze(&[]);
        assert_eq!(report.vocabulary_size, 0);
        assert!(report.metaphors.is_empty());
        assert_eq!(report.growth_rate, 0.0);
    }

    #[test]
    fn test_vocabulary_and_evolution() {
        let entries = vec![
            JournalEntry::new("2024-01-01", "", vec![EmotionTag::new("joy", 0.9)]),
            JournalEntry::new(
                "2024-01-02",
                "",
                vec![EmotionTag::new("joy", 0.9), EmotionTag::new("awe", 0.3)],
            ),
            JournalEntry::new("broken", "", vec![EmotionTag::new("awe", 0.3)]),
            JournalEntry::new("2024-01-04", "", vec![]),
        ];
        let report = VocabularyReport::analyze(&entries);
        assert_eq!(report.vocabulary_size, 2);
        assert_eq!(report.unique_emotions, vec!["joy", "awe"]);
        assert_eq!(report.evolution[0].dates.len(), 2);
        assert_eq!(report.evolution[1].dates.len(), 1);
        assert!((report.growth_rate - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_metaphor_extraction() {
        let entries = vec![JournalEntry::new(
            "2024-01-01",
            "I felt like a storm was inside my chest. It feels like fog!",
            vec![],
        )];
        let report = VocabularyReport::analyze(&entries);
        let texts: Vec<&str> = report.metaphors.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["like a storm was inside my chest", "feels like fog"]
        );
        assert_eq!(report.metaphors[0].date, "2024-01-01");
        assert!(report.metaphors[0].context.starts_with("I felt like a storm"));
    }

    #[test]
    fn test_context_keeps_original_casing() {
        let entries = vec![JournalEntry::new(
            "2024-01-01",
            "Monday FEELS LIKE Groundhog Day",
            vec![],
        )];
        let report = VocabularyReport::analyze(&entries);
        assert_eq!(report.metaphors[0].text, "feels like groundhog day");
        assert_eq!(report.metaphors[0].context, "Monday FEELS LIKE Groundhog Day");
    }

    #[test]
    fn test_context_falls_back_when_lowercasing_changes_width() {
        // 'İ' lowercases to two chars, so offsets no longer line up
        let entries = vec![JournalEntry::new("2024-01-01", "İt feels like rain", vec![])];
        let report = VocabularyReport::analyze(&entries);
        assert_eq!(report.metaphors[0].text, "feels like rain");
        assert_eq!(report.metaphors[0].context, "i\u{307}t feels like rain");
    }

    #[test]
    fn test_metaphors_are_capped() {
        let text = "as if it rained. ".repeat(15);
        let entries = vec![JournalEntry::new("2024-01-01", text, vec![])];
        let report = VocabularyReport::analyze(&entries);
        assert_eq!(report.metaphors.len(), MAX_METAPHORS);
    }

    #[test]
    fn test_context_respects_char_boundaries() {
        let text = "ééééé like a wave";
        let at = text.find("like").unwrap();
        assert_eq!(context_around(text, at), text);
    }
}
