//! Output formatting utilities

use crate::application::AnalysisReport;
use crate::domain::assessment::{Subscale, QUESTIONS, SCALE_LABELS};
use crate::domain::{DashboardStats, FindingData, PatternFinding, VocabularyReport};
use crate::infrastructure::{AssessmentRecord, LogRecord, StoredLog};

/// Format dashboard statistics for display
pub fn format_stats(stats: &DashboardStats) -> String {
    if stats.total_entries == 0 {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("Total entries:   {}\n", stats.total_entries));
    output.push_str(&format!(
        "Avg emotions:    {:.1}\n",
        stats.avg_emotions_per_entry
    ));
    output.push_str(&format!(
        "Most common:     {}\n",
        stats.most_common_emotion.as_deref().unwrap_or("None yet")
    ));
    output.push_str(&format!("Current streak:  {} days\n", stats.streak_days));
    output.push_str(&format!(
        "Avg confidence:  {:.2}\n",
        stats.average_confidence
    ));
    output.push_str(&format!("Vocabulary:      {} emotions\n", stats.vocabulary_size));

    if !stats.distribution.is_empty() {
        output.push_str("\nDistribution:\n");
        for count in &stats.distribution {
            output.push_str(&format!("  {:<16}{}\n", count.emotion, count.count));
        }
    }

    let categories: Vec<String> = stats
        .category_counts
        .iter()
        .filter(|c| c.count > 0)
        .map(|c| format!("{} {}", c.category, c.count))
        .collect();
    if !categories.is_empty() {
        output.push_str(&format!("\nCategories: {}\n", categories.join(", ")));
    }

    output.push_str("\nLast 7 days:\n");
    for point in &stats.trend {
        output.push_str(&format!(
            "  {}  {}\n",
            point.date.format("%d-%m-%Y"),
            point.emotions
        ));
    }

    output
}

/// Format pattern findings for display
pub fn format_findings(findings: &[PatternFinding]) -> String {
    if findings.is_empty() {
        return "No patterns found yet".to_string();
    }

    let mut output = String::new();
    for finding in findings {
        output.push_str(&format!("{}\n", finding.title));
        match &finding.data {
            FindingData::Frequencies(counts) => {
                let listed: Vec<String> = counts
                    .iter()
                    .map(|c| format!("{} ({})", c.emotion, c.count))
                    .collect();
                output.push_str(&format!("  {}\n", listed.join(", ")));
            }
            FindingData::Groups(groups) => {
                for group in groups {
                    output.push_str(&format!(
                        "  {}: {} occurrences, mostly \"{}\" ({})\n",
                        group.key,
                        group.frequency,
                        group.dominant_emotion,
                        group.emotions.join(", ")
                    ));
                }
            }
            FindingData::Consistency(report) => {
                output.push_str(&format!(
                    "  {} of {} day transitions shared an emotion\n",
                    report.consistent_transitions, report.total_transitions
                ));
            }
        }
        output.push_str(&format!("  > {}\n\n", finding.insight));
    }
    output
}

/// Format the vocabulary section
pub fn format_vocabulary(report: &VocabularyReport) -> String {
    if report.vocabulary_size == 0 {
        return "No emotions detected yet".to_string();
    }

    let mut output = format!(
        "You've used {} different emotional descriptors: {}\n",
        report.vocabulary_size,
        report.unique_emotions.join(", ")
    );
    if !report.metaphors.is_empty() {
        output.push_str("\nMetaphors:\n");
        for metaphor in &report.metaphors {
            output.push_str(&format!("  \"{}\" ({})\n", metaphor.text, metaphor.date));
        }
    }
    output
}

/// Format a full analysis report
pub fn format_report(report: &AnalysisReport) -> String {
    let mut output = format!(
        "Journal analysis {} to {}\n\n",
        report.from.format("%d-%m-%Y"),
        report.today.format("%d-%m-%Y")
    );
    output.push_str(&format_stats(&report.stats));
    if report.stats.total_entries == 0 {
        output.push('\n');
        return output;
    }

    output.push_str("\nPatterns\n\n");
    output.push_str(&format_findings(&report.findings));
    output.push_str("\nEmotional vocabulary\n\n");
    output.push_str(&format_vocabulary(&report.vocabulary));
    output
}

fn emotion_list(log: &StoredLog) -> String {
    let names: Vec<&str> = log
        .detected_emotions
        .iter()
        .flatten()
        .map(|e| e.emotion.as_str())
        .collect();
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

/// Format a list of logs, one per line
pub fn format_log_list(records: &[LogRecord]) -> String {
    if records.is_empty() {
        return "No logs found".to_string();
    }

    let mut output = String::new();
    for record in records {
        let preview: String = record.log.user_text.chars().take(40).collect();
        let ellipsis = if record.log.user_text.chars().count() > 40 {
            "..."
        } else {
            ""
        };
        output.push_str(&format!(
            "{:<16}{}{}  [{}]\n",
            record.id,
            preview,
            ellipsis,
            emotion_list(&record.log)
        ));
    }
    output
}

/// Format one log in full
pub fn format_log(record: &LogRecord) -> String {
    let log = &record.log;
    let mut output = format!("Log {}\n", record.id);
    output.push_str(&format!("Date:        {}\n", log.date));
    if let Some(created) = &log.created_at {
        output.push_str(&format!("Created:     {}\n", created));
    }
    if let Some(updated) = &log.updated_at {
        output.push_str(&format!("Updated:     {}\n", updated));
    }
    output.push_str(&format!("Emotions:    {}\n", emotion_list(log)));

    if let Some(metadata) = &log.emotion_metadata {
        output.push_str(&format!("Intensity:   {}\n", metadata.intensity));
        output.push_str(&format!("Complexity:  {}\n", metadata.complexity));
        if !metadata.sensory_elements.is_empty() {
            output.push_str(&format!(
                "Sensory:     {}\n",
                metadata.sensory_elements.join(", ")
            ));
        }
        if !metadata.cognitive_patterns.is_empty() {
            output.push_str(&format!(
                "Cognitive:   {}\n",
                metadata.cognitive_patterns.join(", ")
            ));
        }
    }
    if log.questionnaire.is_some() {
        output.push_str("Questionnaire attached\n");
    }
    if log.chat_session.is_some() {
        output.push_str("Chat session attached\n");
    }

    output.push_str(&format!("\n{}\n", log.user_text));
    output
}

/// Format the TAS-20 statements with their numbers
pub fn format_questions() -> String {
    let mut output = String::from("Answer each statement from 1 to 5:\n");
    for (value, label) in SCALE_LABELS.iter().enumerate() {
        output.push_str(&format!("  {} = {}\n", value + 1, label));
    }
    output.push('\n');
    for question in &QUESTIONS {
        output.push_str(&format!("{:>2}. {}\n", question.id, question.text));
    }
    output
}

/// Format a scored assessment
pub fn format_assessment(record: &AssessmentRecord) -> String {
    let results = &record.results;
    let mut output = format!(
        "TAS-20 score: {} ({})\n",
        results.total_score, results.interpretation
    );
    for (subscale, points) in [
        (Subscale::Dif, results.dif_score),
        (Subscale::Ddf, results.ddf_score),
        (Subscale::Eot, results.eot_score),
    ] {
        output.push_str(&format!("  {:<34}{}\n", subscale.label(), points));
    }
    output.push_str(&format!(
        "Completed {}\n",
        record.completed_at.format("%d-%m-%Y %H:%M")
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmotionTag, JournalEntry, PatternAnalyzer};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    fn entries() -> Vec<JournalEntry> {
        vec![
            JournalEntry::new("2024-01-03", "work", vec![EmotionTag::new("sadness", 0.7)]),
            JournalEntry::new("2024-01-02", "work", vec![EmotionTag::new("joy", 0.8)]),
            JournalEntry::new("2024-01-01", "", vec![EmotionTag::new("joy", 0.9)]),
        ]
    }

    #[test]
    fn test_format_empty_stats() {
        let stats = DashboardStats::compute(&[], today());
        assert_eq!(format_stats(&stats), "No entries found");
    }

    #[test]
    fn test_format_stats() {
        let stats = DashboardStats::compute(&entries(), today());
        let output = format_stats(&stats);
        assert!(output.contains("Total entries:   3"));
        assert!(output.contains("Most common:     joy"));
        assert!(output.contains("Current streak:  3 days"));
        assert!(output.contains("positive 2, negative 1"));
        assert!(output.contains("03-01-2024  1"));
    }

    #[test]
    fn test_format_no_findings() {
        assert_eq!(format_findings(&[]), "No patterns found yet");
    }

    #[test]
    fn test_format_findings() {
        let findings = PatternAnalyzer::default().analyze(&entries());
        let output = format_findings(&findings);
        assert!(output.contains("Most Common Emotions\n  joy (2), sadness (1)"));
        assert!(output.contains("Emotional Consistency\n  1 of 2 day transitions"));
        assert!(output.contains("  work: 2 occurrences, mostly \"sadness\" (sadness, joy)"));
        assert!(output.contains("> Your most frequently detected emotion is \"joy\""));
    }

    #[test]
    fn test_format_log_with_metadata() {
        use crate::infrastructure::{DetectedEmotion, EmotionMetadata};

        let record = LogRecord {
            id: "2025-01-17-1".to_string(),
            log: StoredLog {
                user_text: "Tight chest before the meeting".to_string(),
                date: "2025-01-17".to_string(),
                detected_emotions: Some(vec![DetectedEmotion::new("anxiety", 0.7)]),
                emotion_metadata: Some(EmotionMetadata {
                    intensity: 6.0,
                    complexity: "mixed".to_string(),
                    sensory_elements: vec!["tight chest".to_string()],
                    cognitive_patterns: vec![],
                }),
                ..Default::default()
            },
        };

        let output = format_log(&record);
        assert!(output.starts_with("Log 2025-01-17-1\n"));
        assert!(output.contains("Emotions:    anxiety"));
        assert!(output.contains("Intensity:   6"));
        assert!(output.contains("Sensory:     tight chest"));
        assert!(!output.contains("Cognitive"));
        assert!(output.ends_with("Tight chest before the meeting\n"));

        let listed = format_log_list(std::slice::from_ref(&record));
        assert!(listed.starts_with("2025-01-17-1    Tight chest before the meeting  [anxiety]"));
        assert_eq!(format_log_list(&[]), "No logs found");
    }

    #[test]
    fn test_format_assessment() {
        use crate::domain::assessment::score;
        use chrono::{TimeZone, Utc};

        let record = AssessmentRecord::new(
            [3; 20],
            score(&[3; 20]),
            Utc.with_ymd_and_hms(2025, 1, 17, 20, 0, 0).unwrap(),
        );
        let output = format_assessment(&record);
        assert!(output.starts_with("TAS-20 score: 60 (Possible alexithymic)"));
        assert!(output.contains("Difficulty identifying feelings   18"));
        assert!(output.contains("Completed 17-01-2025 20:00"));

        let questions = format_questions();
        assert!(questions.contains("1 = Strongly disagree"));
        assert!(questions.contains("20. Looking for hidden meanings"));
    }

    #[test]
    fn test_format_vocabulary() {
        let report = VocabularyReport::analyze(&entries());
        let output = format_vocabulary(&report);
        assert!(output.starts_with("You've used 2 different emotional descriptors: sadness, joy"));
        assert_eq!(
            format_vocabulary(&VocabularyReport::default()),
            "No emotions detected yet"
        );
    }
}
