//! Error types for moodjour

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for moodjour
///
/// The pattern analyzer never produces these: it degrades to "no finding".
/// Errors come from the storage, config and payload boundaries.
#[derive(Debug, Error)]
pub enum MoodjourError {
    #[error("Not a moodjour directory: {0}")]
    NotMoodjourDirectory(PathBuf),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid emotion: {0}")]
    InvalidEmotion(String),

    #[error("Entry text is required")]
    EmptyText,

    #[error("Invalid log ID: {0}")]
    InvalidLogId(String),

    #[error("Log not found: {0}")]
    LogNotFound(String),

    #[error("No changes made")]
    NoChanges,

    #[error("Invalid assessment: {0}")]
    InvalidAssessment(String),

    #[error("Invalid payload in {source_name}: {message}")]
    Payload {
        source_name: String,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config.toml: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl MoodjourError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MoodjourError::NotMoodjourDirectory(_) => 2,
            MoodjourError::InvalidDate(_)
            | MoodjourError::InvalidEmotion(_)
            | MoodjourError::EmptyText
            | MoodjourError::InvalidLogId(_)
            | MoodjourError::NoChanges
            | MoodjourError::InvalidAssessment(_) => 3,
            MoodjourError::LogNotFound(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            MoodjourError::NotMoodjourDirectory(path) => {
                format!(
                    "Not a moodjour directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'moodjour init' in this directory to create a new journal\n\
                    • Navigate to an existing moodjour directory\n\
                    • Set MOODJOUR_ROOT environment variable to your journal path",
                    path.display()
                )
            }
            MoodjourError::InvalidDate(input) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Expected format: YYYY-MM-DD\n\
                    Example: moodjour add \"Long day\" --date 2025-01-17",
                    input
                )
            }
            MoodjourError::InvalidEmotion(input) => {
                format!(
                    "Invalid emotion: '{}'\n\n\
                    Expected NAME or NAME:CONFIDENCE with confidence between 0 and 1\n\
                    Examples:\n\
                    moodjour add \"Long day\" --emotion tired\n\
                    moodjour add \"Long day\" --emotion anxiety:0.7",
                    input
                )
            }
            MoodjourError::Payload {
                source_name,
                message,
            } => {
                format!(
                    "Invalid payload in {}: {}\n\n\
                    Suggestions:\n\
                    • Detector payloads must be JSON with a \"primaryEmotions\" list\n\
                    • Each emotion needs an \"emotion\" name; \"confidence\" is optional",
                    source_name, message
                )
            }
            MoodjourError::InvalidLogId(id) => {
                format!(
                    "Invalid log ID: '{}'\n\n\
                    Log IDs are file names under logs/ without .json, e.g. 2025-01-17-1",
                    id
                )
            }
            MoodjourError::LogNotFound(id) => {
                format!(
                    "Log not found: '{}'\n\n\
                    Run 'moodjour list' to see recorded logs",
                    id
                )
            }
            MoodjourError::NoChanges => "No changes made\n\n\
                Only \"questionnaire\" and \"chatSession\" can be updated"
                .to_string(),
            MoodjourError::InvalidAssessment(msg) => {
                format!(
                    "Invalid assessment: {}\n\n\
                    Expected 20 answers from 1 (strongly disagree) to 5 (strongly agree)\n\
                    Example: moodjour assess 3,4,2,1,5,3,3,2,4,1,3,2,4,4,3,2,3,1,2,3\n\
                    Run 'moodjour assess --questions' to see the statements",
                    msg
                )
            }
            MoodjourError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!("{}\n\nValid keys: range_days, limit, created", msg)
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using MoodjourError
pub type Result<T> = std::result::Result<T, MoodjourError>;
