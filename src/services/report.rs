// src/services/report.rs

use chrono::Utc;

use crate::{
    models::{
        question::Difficulty,
        report::StudyReport,
        result::TestResult,
        video::{Video, VideoLink},
    },
    services::{catalog::Catalog, coach::TextGenerator},
};

pub const FALLBACK_MESSAGE: &str = "Great effort on your practice test! Keep practicing \
consistently and reviewing the topics where you need improvement. Your dedication will pay off!";

const MAX_RECOMMENDED_TOPICS: usize = 3;
const VIDEOS_PER_TOPIC: usize = 2;
const MAX_VIDEOS: usize = 6;

/// Builds study reports from evaluated tests.
pub struct ReportBuilder<'a> {
    catalog: &'a Catalog,
    generator: &'a dyn TextGenerator,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(catalog: &'a Catalog, generator: &'a dyn TextGenerator) -> Self {
        Self { catalog, generator }
    }

    pub async fn build(&self, result: &TestResult) -> StudyReport {
        StudyReport {
            test_id: result.test_id.clone(),
            motivational_message: self.motivational_message(result).await,
            study_recommendations: study_recommendations(result),
            recommended_videos: self.recommended_videos(result),
            next_steps: next_steps(result),
            generated_at: Utc::now(),
        }
    }

    /// Generated message, or [`FALLBACK_MESSAGE`] when generation fails or is empty.
    async fn motivational_message(&self, result: &TestResult) -> String {
        match self.generator.generate(&coach_prompt(result)).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                tracing::warn!(generator = self.generator.name(), "coach returned no text");
                FALLBACK_MESSAGE.to_string()
            }
            Err(e) => {
                tracing::warn!(generator = self.generator.name(), "coach unavailable: {}", e);
                FALLBACK_MESSAGE.to_string()
            }
        }
    }

    fn recommended_videos(&self, result: &TestResult) -> Vec<VideoLink> {
        let mut picked: Vec<Video> = Vec::new();
        for topic in &result.weak_topics {
            let fresh: Vec<Video> = self
                .catalog
                .videos_by_topic(topic)
                .into_iter()
                .filter(|v| !picked.iter().any(|p| p.id == v.id))
                .take(VIDEOS_PER_TOPIC)
                .collect();
            picked.extend(fresh);
            if picked.len() >= MAX_VIDEOS {
                break;
            }
        }
        picked.truncate(MAX_VIDEOS);
        picked.into_iter().map(VideoLink::from).collect()
    }
}

fn coach_prompt(result: &TestResult) -> String {
    let list = |topics: &[String]| {
        if topics.is_empty() {
            "None identified".to_string()
        } else {
            topics.join(", ")
        }
    };

    format!(
        "You are a supportive GATE CSE exam coach. A student just completed a practice test.\n\n\
         Score: {:.1}%\n\
         Accuracy: {:.1}%\n\
         Correct: {}/{}\n\
         Strong Topics: {}\n\
         Weak Topics: {}\n\n\
         Write a warm, motivating report of at most 200 words in three short paragraphs: \
         acknowledge the effort and strengths, name the areas to improve without discouraging, \
         and give concrete next steps.",
        result.score_percentage,
        result.accuracy,
        result.correct_count(),
        result.total_questions,
        list(&result.strong_topics),
        list(&result.weak_topics),
    )
}

fn study_recommendations(result: &TestResult) -> Vec<String> {
    if result.weak_topics.is_empty() {
        return vec!["Consolidate your strong areas with mixed-difficulty tests".to_string()];
    }
    result
        .weak_topics
        .iter()
        .take(MAX_RECOMMENDED_TOPICS)
        .map(|topic| format!("{} - Complete Tutorial", topic))
        .collect()
}

fn next_steps(result: &TestResult) -> Vec<String> {
    let mut steps = Vec::new();

    if result.accuracy < 50.0 {
        steps.push("Revisit the fundamentals before attempting another full test".to_string());
    } else if result.accuracy < 80.0 {
        steps.push("Review every incorrect answer alongside its solution".to_string());
    } else {
        steps.push("Move on to harder questions and timed full-length tests".to_string());
    }

    if let Some(topic) = result.weak_topics.first() {
        steps.push(format!("Take a focused test on {}", topic));
    }

    let weakest = Difficulty::ALL
        .into_iter()
        .map(|d| (d, result.difficulty_breakdown.bucket(d)))
        .filter(|(_, tally)| tally.total > 0 && tally.correct < tally.total)
        .min_by(|(_, a), (_, b)| a.percentage().total_cmp(&b.percentage()));
    if let Some((difficulty, tally)) = weakest {
        steps.push(format!(
            "Practice more {} questions ({}/{} correct this time)",
            difficulty.as_str(),
            tally.correct,
            tally.total
        ));
    }

    steps
}
