//! TAS-20 alexithymia self-assessment
//!
//! Twenty statements answered on a 1-5 agreement scale. Reverse-keyed items
//! score `6 - response`; the total is the sum of three subscales.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const QUESTION_COUNT: usize = 20;
pub const MIN_RESPONSE: u8 = 1;
pub const MAX_RESPONSE: u8 = 5;

/// Highest total still read as non-alexithymic
pub const NON_ALEXITHYMIC_MAX: u32 = 51;
/// Highest total still read as possibly alexithymic
pub const POSSIBLE_ALEXITHYMIC_MAX: u32 = 61;

pub const SCALE_LABELS: [&str; 5] = [
    "Strongly disagree",
    "Moderately disagree",
    "Neither agree nor disagree",
    "Moderately agree",
    "Strongly agree",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Subscale {
    /// Difficulty identifying feelings
    Dif,
    /// Difficulty describing feelings
    Ddf,
    /// Externally oriented thinking
    Eot,
}

impl Subscale {
    pub fn label(&self) -> &'static str {
        match self {
            Subscale::Dif => "Difficulty identifying feelings",
            Subscale::Ddf => "Difficulty describing feelings",
            Subscale::Eot => "Externally oriented thinking",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: u8,
    pub text: &'static str,
    pub subscale: Subscale,
    pub reverse: bool,
}

impl Question {
    const fn new(id: u8, text: &'static str, subscale: Subscale, reverse: bool) -> Self {
        Question {
            id,
            text,
            subscale,
            reverse,
        }
    }

    /// Points contributed by `response`
    pub fn score(&self, response: u8) -> u32 {
        if self.reverse {
            u32::from((MIN_RESPONSE + MAX_RESPONSE).saturating_sub(response))
        } else {
            u32::from(response)
        }
    }
}

pub const QUESTIONS: [Question; QUESTION_COUNT] = [
    Question::new(1, "I have feelings that I can't quite identify.", Subscale::Dif, false),
    Question::new(2, "It is difficult for me to find the right words for my feelings.", Subscale::Ddf, false),
    Question::new(3, "I have physical sensations that even doctors don't understand.", Subscale::Eot, false),
    Question::new(4, "I am able to describe my feelings easily.", Subscale::Ddf, true),
    Question::new(5, "I prefer to analyze problems rather than just describe them.", Subscale::Eot, false),
    Question::new(6, "When I am upset, I don't know if I am sad, frightened, or angry.", Subscale::Dif, false),
    Question::new(7, "I am often puzzled by sensations in my body.", Subscale::Dif, false),
    Question::new(8, "I prefer to just let things happen rather than to understand why they turned out that way.", Subscale::Eot, true),
    Question::new(9, "I have some of my feelings that I don't quite understand.", Subscale::Dif, false),
    Question::new(10, "Being in touch with emotions is essential.", Subscale::Eot, true),
    Question::new(11, "I find it hard to describe how I feel about people.", Subscale::Ddf, false),
    Question::new(12, "People tell me to describe my feelings more.", Subscale::Ddf, false),
    Question::new(13, "I don't know what's going on inside me.", Subscale::Dif, false),
    Question::new(14, "I often don't know why I am angry.", Subscale::Dif, false),
    Question::new(15, "I prefer talking to people about their daily activities rather than their feelings.", Subscale::Eot, false),
    Question::new(16, "I prefer entertainment shows rather than psychological dramas.", Subscale::Eot, false),
    Question::new(17, "It is difficult for me to reveal my innermost feelings, even to close friends.", Subscale::Ddf, false),
    Question::new(18, "I can feel close to someone, even in moments of silence.", Subscale::Eot, true),
    Question::new(19, "I find examination of my feelings useful in solving personal problems.", Subscale::Eot, true),
    Question::new(20, "Looking for hidden meanings in movies or plays distracts from their enjoyment.", Subscale::Eot, false),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpretation {
    #[serde(rename = "Non-alexithymic")]
    NonAlexithymic,
    #[serde(rename = "Possible alexithymic")]
    PossibleAlexithymic,
    #[serde(rename = "Alexithymic")]
    Alexithymic,
}

impl Interpretation {
    pub fn from_total(total: u32) -> Self {
        if total <= NON_ALEXITHYMIC_MAX {
            Interpretation::NonAlexithymic
        } else if total <= POSSIBLE_ALEXITHYMIC_MAX {
            Interpretation::PossibleAlexithymic
        } else {
            Interpretation::Alexithymic
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Interpretation::NonAlexithymic => "Non-alexithymic",
            Interpretation::PossibleAlexithymic => "Possible alexithymic",
            Interpretation::Alexithymic => "Alexithymic",
        }
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tas20Score {
    pub total_score: u32,
    pub dif_score: u32,
    pub ddf_score: u32,
    pub eot_score: u32,
    pub interpretation: Interpretation,
}

/// Check a full answer sheet, in question order
pub fn validate_responses(values: &[u8]) -> Result<[u8; QUESTION_COUNT], String> {
    let responses: [u8; QUESTION_COUNT] = values.try_into().map_err(|_| {
        format!(
            "expected {} answers, got {}",
            QUESTION_COUNT,
            values.len()
        )
    })?;

    if let Some((index, value)) = responses
        .iter()
        .enumerate()
        .find(|(_, v)| !(MIN_RESPONSE..=MAX_RESPONSE).contains(*v))
    {
        return Err(format!(
            "answer {} is {}, expected {}-{}",
            index + 1,
            value,
            MIN_RESPONSE,
            MAX_RESPONSE
        ));
    }

    Ok(responses)
}

/// Score a validated answer sheet
pub fn score(responses: &[u8; QUESTION_COUNT]) -> Tas20Score {
    let mut dif_score = 0;
    let mut ddf_score = 0;
    let mut eot_score = 0;

    for (question, response) in QUESTIONS.iter().zip(responses) {
        let points = question.score(*response);
        match question.subscale {
            Subscale::Dif => dif_score += points,
            Subscale::Ddf => ddf_score += points,
            Subscale::Eot => eot_score += points,
        }
    }

    let total_score = dif_score + ddf_score + eot_score;
    Tas20Score {
        total_score,
        dif_score,
        ddf_score,
        eot_score,
        interpretation: Interpretation::from_total(total_score),
    }
}
