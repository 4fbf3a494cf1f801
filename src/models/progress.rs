// src/models/progress.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Version written by this crate. Records without a version are version 0,
/// the camelCase layout stored by the browser client.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Longitudinal practice record, folded forward after every completed test.
///
/// Every field has a default so records written before a field existed still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub schema_version: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(alias = "totalTests")]
    pub total_tests: u32,

    #[serde(alias = "totalQuestions")]
    pub total_questions_attempted: u32,

    /// Unweighted mean of the accuracies in `test_history`.
    #[serde(alias = "overallAccuracy")]
    pub overall_accuracy: f64,

    #[serde(alias = "testHistory")]
    pub test_history: Vec<TestHistoryEntry>,

    #[serde(alias = "topicMastery")]
    pub topic_mastery: Vec<TopicMastery>,

    #[serde(alias = "difficultyProgress")]
    pub difficulty_progress: DifficultyProgress,

    #[serde(alias = "subjectProgress")]
    pub subject_progress: Vec<SubjectProgress>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Progress {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            created_at: now,
            updated_at: now,
            ..Default::default()
        }
    }

    /// Brings a deserialized record up to the current schema version.
    pub fn migrate(mut self) -> Self {
        if self.schema_version < CURRENT_SCHEMA_VERSION {
            // v0 keys are mapped by the serde aliases above.
            self.schema_version = CURRENT_SCHEMA_VERSION;
        }
        self
    }

    pub fn topic(&self, topic: &str) -> Option<&TopicMastery> {
        self.topic_mastery.iter().find(|tm| tm.topic == topic)
    }

    pub fn subject(&self, subject: &str) -> Option<&SubjectProgress> {
        self.subject_progress.iter().find(|sp| sp.subject == subject)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestHistoryEntry {
    pub test_id: String,
    /// Calendar day the test was completed.
    pub date: NaiveDate,
    pub score: f64,
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicMastery {
    pub topic: String,
    #[serde(default)]
    pub subject: String,
    pub attempts: u32,
    pub correct: u32,
    pub accuracy: f64,
    pub last_practiced: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectProgress {
    pub subject: String,
    pub total_questions: u32,
    pub correct: u32,
    pub accuracy: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyProgress {
    pub easy: DifficultyRecord,
    pub medium: DifficultyRecord,
    pub hard: DifficultyRecord,
}

/// Running counts for one difficulty bucket.
///
/// Also loads from a bare number, the accuracy-only layout of earlier records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredDifficultyRecord")]
pub struct DifficultyRecord {
    pub correct: u32,
    pub total: u32,
    pub accuracy: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDifficultyRecord {
    Counts {
        #[serde(default)]
        correct: u32,
        #[serde(default)]
        total: u32,
        #[serde(default)]
        accuracy: f64,
    },
    Accuracy(f64),
}

impl From<StoredDifficultyRecord> for DifficultyRecord {
    fn from(stored: StoredDifficultyRecord) -> Self {
        match stored {
            StoredDifficultyRecord::Counts {
                correct,
                total,
                accuracy,
            } => Self {
                correct,
                total,
                accuracy,
            },
            // No counts were kept; the next merge recomputes accuracy from totals.
            StoredDifficultyRecord::Accuracy(accuracy) => Self {
                accuracy,
                ..Self::default()
            },
        }
    }
}
