//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};
pub use output::{
    format_assessment, format_findings, format_log, format_log_list, format_questions,
    format_report, format_stats,
};
