//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "moodjour")]
#[command(about = "Emotion-aware terminal journal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new journal
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Record a journal entry
    Add {
        /// What happened and how it felt
        text: String,

        /// Date the entry belongs to (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Detected emotion as NAME or NAME:CONFIDENCE (repeatable)
        #[arg(short, long = "emotion", value_name = "EMOTION")]
        emotions: Vec<String>,

        /// Emotion-detector JSON payload to attach
        #[arg(long, value_name = "FILE")]
        detection: Option<PathBuf>,
    },

    /// Show statistics and emotional patterns for recent entries
    Analyze {
        /// Days back from today (default: config range_days)
        #[arg(long)]
        days: Option<u32>,

        /// Maximum number of entries to analyze (default: config limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recorded logs, newest first
    List {
        /// Earliest date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Latest date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Maximum number of logs (default: 10)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show one recorded log
    Show {
        /// Log ID, e.g. 2025-01-17-1
        id: String,

        /// Print the stored document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Attach questionnaire or chat session data to a log
    Update {
        /// Log ID, e.g. 2025-01-17-1
        id: String,

        /// Update document as inline JSON
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        json: Option<String>,

        /// Read the update document from a file
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Delete a recorded log
    Delete {
        /// Log ID, e.g. 2025-01-17-1
        id: String,
    },

    /// Take the TAS-20 alexithymia self-assessment
    Assess {
        /// Twenty answers from 1 (strongly disagree) to 5 (strongly agree)
        #[arg(required_unless_present_any = ["questions", "last"])]
        answers: Option<String>,

        /// Print the statements and the answer scale
        #[arg(long, conflicts_with_all = ["answers", "last"])]
        questions: bool,

        /// Show the most recent stored result
        #[arg(long, conflicts_with = "answers")]
        last: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
