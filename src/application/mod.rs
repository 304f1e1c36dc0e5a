//! Application layer - Use cases and orchestration

pub mod add_entry;
pub mod analyze;
pub mod assess;
pub mod init;
pub mod manage_config;
pub mod manage_logs;

pub use add_entry::{AddEntryOptions, AddEntryService};
pub use analyze::{AnalysisReport, AnalyzeOptions, AnalyzeService};
pub use assess::AssessService;
pub use init::InitService;
pub use manage_config::ConfigService;
pub use manage_logs::LogService;
