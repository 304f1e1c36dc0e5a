//! Record a journal entry use case

use crate::error::{MoodjourError, Result};
use crate::infrastructure::payload::{normalize_emotions, DetectedEmotion, DetectionPayload};
use crate::infrastructure::{FileSystemStore, StoredLog};
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::fs;
use std::path::PathBuf;

/// Options for recording an entry
#[derive(Debug, Clone, Default)]
pub struct AddEntryOptions {
    pub text: String,

    /// Date the entry is attributed to (default: today)
    pub date: Option<NaiveDate>,

    /// Emotions given as NAME or NAME:CONFIDENCE
    pub emotions: Vec<String>,

    /// Detector payload file whose `primaryEmotions` are attached
    pub detection: Option<PathBuf>,
}

/// Service for recording entries
pub struct AddEntryService {
    store: FileSystemStore,
}

impl AddEntryService {
    pub fn new(store: FileSystemStore) -> Self {
        AddEntryService { store }
    }

    /// Validate and persist an entry created at `now`.
    ///
    /// Returns the stored file name together with the stored log.
    pub fn execute(
        &self,
        options: AddEntryOptions,
        now: DateTime<FixedOffset>,
    ) -> Result<(String, StoredLog)> {
        let text = options.text.trim();
        if text.is_empty() {
            return Err(MoodjourError::EmptyText);
        }

        let mut raw: Vec<DetectedEmotion> = options
            .emotions
            .iter()
            .map(|arg| parse_emotion_arg(arg))
            .collect::<Result<_>>()?;

        let mut emotion_metadata = None;
        if let Some(path) = &options.detection {
            let json = fs::read_to_string(path)?;
            let payload = DetectionPayload::from_json(&path.display().to_string(), &json)?;
            emotion_metadata = Some(payload.metadata());
            raw.extend(payload.primary_emotions);
        }

        let detected = normalize_emotions(&raw)
            .into_iter()
            .map(|tag| DetectedEmotion::new(tag.name, tag.confidence))
            .collect();

        let date = options.date.unwrap_or_else(|| now.date_naive());
        let log = StoredLog {
            user_text: text.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            created_at: Some(now.to_rfc3339()),
            detected_emotions: Some(detected),
            emotion_metadata,
            ..Default::default()
        };

        let filename = self.store.append_log(&log)?;
        Ok((filename, log))
    }
}

/// Parse `NAME` or `NAME:CONFIDENCE`; a bare name gets full confidence
pub fn parse_emotion_arg(arg: &str) -> Result<DetectedEmotion> {
    let invalid = || MoodjourError::InvalidEmotion(arg.to_string());

    let (name, confidence) = match arg.rsplit_once(':') {
        Some((name, raw)) => {
            let confidence: f64 = raw.trim().parse().map_err(|_| invalid())?;
            if !(0.0..=1.0).contains(&confidence) {
                return Err(invalid());
            }
            (name.trim(), confidence)
        }
        None => (arg.trim(), 1.0),
    };

    if name.is_empty() {
        return Err(invalid());
    }

    Ok(DetectedEmotion::new(name, confidence))
}

/// Parse a `--date` argument (YYYY-MM-DD)
pub fn parse_date_arg(arg: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(arg.trim(), "%Y-%m-%d")
        .map_err(|_| MoodjourError::InvalidDate(arg.to_string()))
}
