//! Infrastructure layer - storage, configuration and boundary payloads

pub mod config;
pub mod payload;
pub mod repository;

pub use config::{AnalysisConfig, Config, MAX_RANGE_DAYS};
pub use payload::{
    AssessmentRecord, DetectedEmotion, DetectionPayload, EmotionMetadata, LogUpdate, StoredLog,
};
pub use repository::{EntryStore, FileSystemStore, JournalRepository, LogRecord};
