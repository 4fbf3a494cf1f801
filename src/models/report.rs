// src/models/report.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::video::VideoLink;

/// Study guidance produced from a finished test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyReport {
    pub test_id: String,
    pub motivational_message: String,
    pub study_recommendations: Vec<String>,
    pub recommended_videos: Vec<VideoLink>,
    pub next_steps: Vec<String>,
    pub generated_at: DateTime<Utc>,
}
