//! Boundary schemas: stored log documents and emotion-detector payloads
//!
//! Both arrive as loosely-shaped JSON. They are validated here, once, so the
//! analyzer can rely on `JournalEntry` without defensive checks.

use crate::domain::assessment::QUESTION_COUNT;
use crate::domain::{EmotionTag, JournalEntry, Tas20Score};
use crate::error::{MoodjourError, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_COMPLEXITY: &str = "simple";

/// One emotion as the detector (or an old stored log) reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DetectedEmotion {
    #[serde(default)]
    pub emotion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indicators: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl DetectedEmotion {
    pub fn new(emotion: impl Into<String>, confidence: f64) -> Self {
        DetectedEmotion {
            emotion: emotion.into(),
            confidence: Some(confidence),
            ..Default::default()
        }
    }
}

/// Response body of the emotion detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DetectionPayload {
    #[serde(default)]
    pub primary_emotions: Vec<DetectedEmotion>,
    #[serde(default)]
    pub intensity: Option<f64>,
    #[serde(default)]
    pub complexity: Option<String>,
    #[serde(default)]
    pub sensory_elements: Vec<String>,
    #[serde(default)]
    pub cognitive_patterns: Vec<String>,
}

impl DetectionPayload {
    /// Parse a detector response; `source_name` labels errors
    pub fn from_json(source_name: &str, json: &str) -> Result<Self> {
        parse_json(source_name, json)
    }

    pub fn emotion_tags(&self) -> Vec<EmotionTag> {
        normalize_emotions(&self.primary_emotions)
    }

    /// Everything besides the emotions, with the stored defaults filled in
    pub fn metadata(&self) -> EmotionMetadata {
        EmotionMetadata {
            intensity: self.intensity.filter(|i| i.is_finite()).unwrap_or(0.0),
            complexity: self
                .complexity
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_COMPLEXITY.to_string()),
            sensory_elements: self.sensory_elements.clone(),
            cognitive_patterns: self.cognitive_patterns.clone(),
        }
    }
}

/// Detector extras kept alongside a stored log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionMetadata {
    #[serde(default)]
    pub intensity: f64,
    #[serde(default = "default_complexity")]
    pub complexity: String,
    #[serde(default)]
    pub sensory_elements: Vec<String>,
    #[serde(default)]
    pub cognitive_patterns: Vec<String>,
}

fn default_complexity() -> String {
    DEFAULT_COMPLEXITY.to_string()
}

/// A journal log document as persisted by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoredLog {
    #[serde(default)]
    pub user_text: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_emotions: Option<Vec<DetectedEmotion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion_metadata: Option<EmotionMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questionnaire: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_session: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// The only fields a log accepts after it is recorded.
///
/// Anything else in an update document is ignored; `null` counts as absent.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LogUpdate {
    #[serde(default)]
    pub questionnaire: Option<Value>,
    #[serde(default)]
    pub chat_session: Option<Value>,
}

impl LogUpdate {
    pub fn from_json(source_name: &str, json: &str) -> Result<Self> {
        parse_json(source_name, json)
    }

    pub fn is_empty(&self) -> bool {
        self.questionnaire.is_none() && self.chat_session.is_none()
    }
}

impl StoredLog {
    pub fn from_json(source_name: &str, json: &str) -> Result<Self> {
        parse_json(source_name, json)
    }

    /// Overwrite the whitelisted fields present in `update` and stamp `updated_at`
    pub fn apply_update(&mut self, update: LogUpdate, updated_at: String) -> Result<()> {
        if update.is_empty() {
            return Err(MoodjourError::NoChanges);
        }
        if let Some(questionnaire) = update.questionnaire {
            self.questionnaire = Some(questionnaire);
        }
        if let Some(chat_session) = update.chat_session {
            self.chat_session = Some(chat_session);
        }
        self.updated_at = Some(updated_at);
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validated entry; a missing emotion list becomes empty
    pub fn into_entry(self) -> JournalEntry {
        let emotions = self
            .detected_emotions
            .as_deref()
            .map(normalize_emotions)
            .unwrap_or_default();

        JournalEntry {
            date: self.date,
            text: self.user_text,
            emotions,
            created_at: self.created_at,
        }
    }
}

/// A completed TAS-20 answer sheet as persisted by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub responses: Vec<u8>,
    pub results: Tas20Score,
    pub completed_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub const KIND: &'static str = "TAS-20";

    pub fn new(
        responses: [u8; QUESTION_COUNT],
        results: Tas20Score,
        completed_at: DateTime<Utc>,
    ) -> Self {
        AssessmentRecord {
            kind: Self::KIND.to_string(),
            responses: responses.to_vec(),
            results,
            completed_at,
        }
    }

    pub fn from_json(source_name: &str, json: &str) -> Result<Self> {
        parse_json(source_name, json)
    }
}

fn parse_json<T: DeserializeOwned>(source_name: &str, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| MoodjourError::Payload {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

/// Apply the defaulting rules to raw detections.
///
/// Names are trimmed and blank ones dropped; a missing or NaN confidence is 0
/// and the rest are clamped to [0, 1]; a repeated name keeps its first
/// position and its highest confidence.
pub fn normalize_emotions(raw: &[DetectedEmotion]) -> Vec<EmotionTag> {
    let mut tags: Vec<EmotionTag> = Vec::with_capacity(raw.len());

    for detected in raw {
        let name = detected.emotion.trim();
        if name.is_empty() {
            continue;
        }
        let confidence = clamp_confidence(detected.confidence);

        match tags.iter_mut().find(|t| t.name == name) {
            Some(existing) => existing.confidence = existing.confidence.max(confidence),
            None => tags.push(EmotionTag::new(name, confidence)),
        }
    }

    tags
}

fn clamp_confidence(raw: Option<f64>) -> f64 {
    match raw {
        Some(value) if value.is_finite() => value.clamp(0.0, 1.0),
        _ => 0.0,
    }
}
