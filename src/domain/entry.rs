//! Journal entries as seen by the analyzer

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single detected emotion with the detector's confidence in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionTag {
    pub name: String,
    pub confidence: f64,
}

impl EmotionTag {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        EmotionTag {
            name: name.into(),
            confidence,
        }
    }
}

/// A journal entry, already validated at the storage/detector boundary
///
/// `date` and `created_at` are kept as the raw strings the store handed us:
/// an unparseable date only excludes the entry from date-based computations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Calendar date the entry is attributed to
    pub date: String,
    pub text: String,
    #[serde(default)]
    pub emotions: Vec<EmotionTag>,
    /// Creation timestamp, when the store recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl JournalEntry {
    pub fn new(date: impl Into<String>, text: impl Into<String>, emotions: Vec<EmotionTag>) -> Self {
        JournalEntry {
            date: date.into(),
            text: text.into(),
            emotions,
            created_at: None,
        }
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Calendar date of the entry, if `date` parses
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Timestamp used for time-of-day bucketing.
    ///
    /// `created_at` wins when present, even if it does not parse.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(self.created_at.as_deref().unwrap_or(&self.date))
    }

    /// Names of the detected emotions, in detection order
    pub fn emotion_names(&self) -> impl Iterator<Item = &str> {
        self.emotions.iter().map(|e| e.name.as_str())
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-ish date or timestamp.
///
/// RFC 3339 timestamps keep the wall-clock time of their recorded offset.
/// Plain dates resolve to midnight.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse the calendar date part of an ISO-ish date or timestamp
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    parse_timestamp(input).map(|dt| dt.date())
}
