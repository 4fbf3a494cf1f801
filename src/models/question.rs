// src/models/question.rs

use serde::{Deserialize, Serialize};

/// How a question is answered and, in turn, how it is graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    /// Pick one of the listed options.
    #[serde(rename = "MCQ")]
    Mcq,
    #[serde(rename = "short_answer")]
    ShortAnswer,
    #[serde(rename = "long_answer")]
    LongAnswer,
    #[serde(rename = "fill_in_blank")]
    FillInBlank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// One entry of the static question bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,

    /// Mapped from the JSON key 'type' since `type` is a reserved keyword in Rust.
    #[serde(rename = "type")]
    pub question_type: QuestionType,

    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub question_text: String,

    /// Choices shown to the candidate. Present for MCQ only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// The canonical answer text.
    pub answer: String,

    /// Worked explanation shown after evaluation.
    pub solution: String,

    pub marks: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}
