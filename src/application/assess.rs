//! TAS-20 self-assessment use case

use crate::domain::assessment::{score, validate_responses, QUESTION_COUNT};
use crate::error::{MoodjourError, Result};
use crate::infrastructure::{AssessmentRecord, FileSystemStore};
use chrono::{DateTime, Utc};

/// Service for scoring and storing assessments
pub struct AssessService {
    store: FileSystemStore,
}

impl AssessService {
    pub fn new(store: FileSystemStore) -> Self {
        AssessService { store }
    }

    /// Score an answer sheet and store the result
    pub fn execute(&self, answers: &str, now: DateTime<Utc>) -> Result<AssessmentRecord> {
        let responses = parse_answers(answers)?;
        let record = AssessmentRecord::new(responses, score(&responses), now);
        self.store.append_assessment(&record)?;
        Ok(record)
    }

    /// Most recent stored result
    pub fn latest(&self) -> Result<Option<AssessmentRecord>> {
        self.store.latest_assessment()
    }
}

/// Parse answers separated by commas or whitespace, or as 20 bare digits
pub fn parse_answers(input: &str) -> Result<[u8; QUESTION_COUNT]> {
    let tokens: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    let values: Vec<u8> = match tokens.as_slice() {
        [compact] if compact.len() == QUESTION_COUNT && compact.chars().all(|c| c.is_ascii_digit()) => {
            compact.bytes().map(|b| b - b'0').collect()
        }
        _ => tokens
            .iter()
            .map(|t| {
                t.parse::<u8>()
                    .map_err(|_| MoodjourError::InvalidAssessment(format!("'{}' is not a number", t)))
            })
            .collect::<Result<_>>()?,
    };

    validate_responses(&values).map_err(MoodjourError::InvalidAssessment)
}
