//! Domain layer - journal entries and the pattern analyzer

pub mod analyzer;
pub mod assessment;
pub mod emotions;
pub mod entry;
pub mod findings;
pub mod insight;
pub mod stats;
pub mod streak;
pub mod temporal;
pub mod triggers;
pub mod vocabulary;

pub use analyzer::PatternAnalyzer;
pub use assessment::{Interpretation, Tas20Score};
pub use emotions::{EmotionCategory, EmotionCount, EmotionSummary, GroupPattern};
pub use entry::{EmotionTag, JournalEntry};
pub use findings::{FindingData, FindingKind, PatternFinding};
pub use stats::DashboardStats;
pub use streak::ConsistencyReport;
pub use triggers::{PhysicalCategory, TriggerVocabulary};
pub use vocabulary::VocabularyReport;
