// src/models/result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::question::{Difficulty, Question};

/// Evaluation outcome for a single question of a test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: String,
    pub question: Question,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub marks_awarded: u32,
    pub time_spent: f64,
}

/// Correct/total counter used by the breakdowns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: u32,
    pub total: u32,
}

impl Tally {
    pub fn record(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.correct += 1;
        }
    }

    /// Percentage of correct answers; 0 when nothing was counted.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.correct) * 100.0 / f64::from(self.total)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyBreakdown {
    pub easy: Tally,
    pub medium: Tally,
    pub hard: Tally,
}

impl DifficultyBreakdown {
    pub fn bucket(&self, difficulty: Difficulty) -> &Tally {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn bucket_mut(&mut self, difficulty: Difficulty) -> &mut Tally {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectBreakdown {
    pub subject: String,
    pub correct: u32,
    pub total: u32,
    pub percentage: f64,
}

/// Full scored outcome of a test.
///
/// Results posted back by clients are checked for internal consistency
/// before a report is built from them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_counts))]
pub struct TestResult {
    #[validate(length(min = 1))]
    pub test_id: String,
    pub completed_at: DateTime<Utc>,
    pub total_questions: u32,
    pub total_marks: u32,
    pub marks_obtained: u32,
    #[validate(range(min = 0.0, max = 100.0))]
    pub score_percentage: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub accuracy: f64,
    /// Seconds, summed over every submitted answer.
    #[validate(range(min = 0.0))]
    pub total_time: f64,
    pub question_results: Vec<QuestionResult>,
    pub strong_topics: Vec<String>,
    pub weak_topics: Vec<String>,
    pub difficulty_breakdown: DifficultyBreakdown,
    pub subject_breakdown: Vec<SubjectBreakdown>,
}

impl TestResult {
    pub fn correct_count(&self) -> usize {
        self.question_results.iter().filter(|r| r.is_correct).count()
    }
}

fn validate_counts(result: &TestResult) -> Result<(), ValidationError> {
    if result.marks_obtained > result.total_marks {
        return Err(ValidationError::new("marks_obtained_exceeds_total_marks"));
    }
    if result.question_results.len() > result.total_questions as usize {
        return Err(ValidationError::new("more_results_than_questions"));
    }
    let buckets = &result.difficulty_breakdown;
    if [buckets.easy, buckets.medium, buckets.hard]
        .iter()
        .any(|tally| tally.correct > tally.total)
    {
        return Err(ValidationError::new("difficulty_correct_exceeds_total"));
    }
    if result
        .subject_breakdown
        .iter()
        .any(|subject| subject.correct > subject.total)
    {
        return Err(ValidationError::new("subject_correct_exceeds_total"));
    }
    Ok(())
}
