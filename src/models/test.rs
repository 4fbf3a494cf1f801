// src/models/test.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    config::MAX_QUESTIONS,
    models::question::{Difficulty, Question, QuestionType},
};

/// Selection criteria for a practice test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TestConfig {
    #[validate(custom(function = validate_subjects))]
    pub subjects: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Vec<Difficulty>>,

    #[validate(range(min = 1, max = MAX_QUESTIONS))]
    pub num_questions: u32,

    #[serde(
        rename = "questionTypes",
        alias = "question_types",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub question_types: Option<Vec<QuestionType>>,
}

fn validate_subjects(subjects: &[String]) -> Result<(), validator::ValidationError> {
    if subjects.is_empty() {
        return Err(validator::ValidationError::new("select_at_least_one_subject"));
    }
    if subjects.iter().any(|s| s.trim().is_empty()) {
        return Err(validator::ValidationError::new("subject_cannot_be_blank"));
    }
    Ok(())
}

/// A generated practice test. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Test {
    pub test_id: String,
    pub config: TestConfig,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(subjects: &[&str], num_questions: u32) -> TestConfig {
        TestConfig {
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            topics: None,
            difficulty: None,
            num_questions,
            question_types: None,
        }
    }

    #[test]
    fn accepts_bounds() {
        assert!(config(&["os"], 1).validate().is_ok());
        assert!(config(&["os"], 100).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_counts() {
        assert!(config(&["os"], 0).validate().is_err());
        assert!(config(&["os"], 101).validate().is_err());
    }

    #[test]
    fn rejects_missing_or_blank_subjects() {
        assert!(config(&[], 10).validate().is_err());
        assert!(config(&["os", "  "], 10).validate().is_err());
    }

    #[test]
    fn reads_camel_case_question_types() {
        let raw = r#"{"subjects":["os"],"num_questions":5,"questionTypes":["MCQ"]}"#;
        let parsed: TestConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.question_types, Some(vec![QuestionType::Mcq]));

        let snake = r#"{"subjects":["os"],"num_questions":5,"question_types":["long_answer"]}"#;
        let parsed: TestConfig = serde_json::from_str(snake).unwrap();
        assert_eq!(parsed.question_types, Some(vec![QuestionType::LongAnswer]));
    }
}
