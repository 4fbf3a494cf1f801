// src/models/answer.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// One submitted response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserAnswer {
    #[validate(length(min = 1))]
    pub question_id: String,

    pub answer: String,

    /// Seconds spent on the question.
    #[validate(range(min = 0.0))]
    pub time_spent: f64,
}

/// Request body for evaluation: a bare JSON array of answers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet(pub Vec<UserAnswer>);

impl Validate for AnswerSheet {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.0.iter().try_for_each(Validate::validate)
    }
}
