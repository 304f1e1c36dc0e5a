//! moodjour - Emotion-aware terminal journal
//!
//! Records free-text daily reflections tagged with detected emotions and
//! analyzes them for patterns: frequent emotions, time-of-day and weekday
//! activity, situational and physical triggers, streaks and consistency.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use domain::{JournalEntry, PatternAnalyzer, PatternFinding};
pub use error::MoodjourError;
