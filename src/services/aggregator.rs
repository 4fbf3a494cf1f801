// src/services/aggregator.rs

//! Summary statistics over the per-question results of one test.

use crate::{
    config::{STRONG_TOPIC_THRESHOLD, WEAK_TOPIC_THRESHOLD},
    models::result::{DifficultyBreakdown, QuestionResult, SubjectBreakdown, Tally},
};

/// Strength label derived from a topic's accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicStrength {
    Strong,
    Weak,
    /// Between the weak and strong thresholds. Reported in neither list.
    Unclassified,
}

pub fn classify(accuracy: f64) -> TopicStrength {
    if accuracy >= STRONG_TOPIC_THRESHOLD {
        TopicStrength::Strong
    } else if accuracy < WEAK_TOPIC_THRESHOLD {
        TopicStrength::Weak
    } else {
        TopicStrength::Unclassified
    }
}

/// Counts results per key, keeping keys in first-seen order.
fn tally_by<'a, F>(results: &'a [QuestionResult], key: F) -> Vec<(&'a str, Tally)>
where
    F: Fn(&'a QuestionResult) -> &'a str,
{
    let mut tallies: Vec<(&str, Tally)> = Vec::new();
    for result in results {
        let k = key(result);
        match tallies.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, tally)) => tally.record(result.is_correct),
            None => {
                let mut tally = Tally::default();
                tally.record(result.is_correct);
                tallies.push((k, tally));
            }
        }
    }
    tallies
}

pub fn topic_tallies(results: &[QuestionResult]) -> Vec<(&str, Tally)> {
    tally_by(results, |r| r.question.topic.as_str())
}

/// Splits topics into `(strong, weak)` lists, in first-seen order.
pub fn classify_topics(results: &[QuestionResult]) -> (Vec<String>, Vec<String>) {
    let mut strong = Vec::new();
    let mut weak = Vec::new();
    for (topic, tally) in topic_tallies(results) {
        match classify(tally.percentage()) {
            TopicStrength::Strong => strong.push(topic.to_string()),
            TopicStrength::Weak => weak.push(topic.to_string()),
            TopicStrength::Unclassified => {}
        }
    }
    (strong, weak)
}

pub fn difficulty_breakdown(results: &[QuestionResult]) -> DifficultyBreakdown {
    let mut breakdown = DifficultyBreakdown::default();
    for result in results {
        breakdown
            .bucket_mut(result.question.difficulty)
            .record(result.is_correct);
    }
    breakdown
}

pub fn subject_breakdown(results: &[QuestionResult]) -> Vec<SubjectBreakdown> {
    tally_by(results, |r| r.question.subject.as_str())
        .into_iter()
        .map(|(subject, tally)| SubjectBreakdown {
            subject: subject.to_string(),
            correct: tally.correct,
            total: tally.total,
            percentage: tally.percentage(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::question::{Difficulty, QuestionType},
        services::catalog::tests::question,
    };
    use pretty_assertions::assert_eq;

    fn result(subject: &str, topic: &str, difficulty: Difficulty, is_correct: bool) -> QuestionResult {
        let q = question("q", QuestionType::ShortAnswer, subject, topic, difficulty, "x");
        QuestionResult {
            question_id: q.id.clone(),
            correct_answer: q.answer.clone(),
            question: q,
            user_answer: String::new(),
            is_correct,
            marks_awarded: 0,
            time_spent: 0.0,
        }
    }

    /// `correct` right answers out of `total` on one topic.
    fn topic_results(topic: &str, correct: usize, total: usize) -> Vec<QuestionResult> {
        (0..total)
            .map(|i| result("os", topic, Difficulty::Easy, i < correct))
            .collect()
    }

    #[test]
    fn seventy_percent_is_strong() {
        let (strong, weak) = classify_topics(&topic_results("Paging", 7, 10));
        assert_eq!(strong, vec!["Paging".to_string()]);
        assert!(weak.is_empty());
    }

    #[test]
    fn fifty_percent_is_unclassified() {
        let (strong, weak) = classify_topics(&topic_results("Paging", 1, 2));
        assert!(strong.is_empty());
        assert!(weak.is_empty());
    }

    #[test]
    fn just_under_fifty_is_weak() {
        let (strong, weak) = classify_topics(&topic_results("Paging", 49, 100));
        assert!(strong.is_empty());
        assert_eq!(weak, vec!["Paging".to_string()]);
    }

    #[test]
    fn classification_thresholds() {
        assert_eq!(classify(100.0), TopicStrength::Strong);
        assert_eq!(classify(69.99), TopicStrength::Unclassified);
        assert_eq!(classify(50.0), TopicStrength::Unclassified);
        assert_eq!(classify(0.0), TopicStrength::Weak);
    }

    #[test]
    fn topics_keep_first_seen_order() {
        let mut results = topic_results("Deadlock", 0, 1);
        results.extend(topic_results("Paging", 1, 1));
        results.extend(topic_results("Threads", 0, 2));
        results.extend(topic_results("Deadlock", 0, 1));

        let (strong, weak) = classify_topics(&results);
        assert_eq!(strong, vec!["Paging".to_string()]);
        assert_eq!(weak, vec!["Deadlock".to_string(), "Threads".to_string()]);
    }

    #[test]
    fn difficulty_buckets_count_each_level() {
        let results = vec![
            result("os", "a", Difficulty::Easy, true),
            result("os", "a", Difficulty::Easy, false),
            result("os", "a", Difficulty::Hard, true),
        ];
        let breakdown = difficulty_breakdown(&results);
        assert_eq!(breakdown.easy, Tally { correct: 1, total: 2 });
        assert_eq!(breakdown.medium, Tally::default());
        assert_eq!(breakdown.hard, Tally { correct: 1, total: 1 });
    }

    #[test]
    fn subject_breakdown_reports_percentages() {
        let results = vec![
            result("Databases", "a", Difficulty::Easy, true),
            result("Operating Systems", "a", Difficulty::Easy, false),
            result("Databases", "b", Difficulty::Medium, false),
            result("Databases", "b", Difficulty::Medium, true),
        ];
        let breakdown = subject_breakdown(&results);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].subject, "Databases");
        assert_eq!((breakdown[0].correct, breakdown[0].total), (2, 3));
        assert!((breakdown[0].percentage - 66.666).abs() < 0.01);
        assert_eq!(breakdown[1].subject, "Operating Systems");
        assert_eq!(breakdown[1].percentage, 0.0);
    }

    #[test]
    fn empty_results_produce_empty_summaries() {
        assert_eq!(classify_topics(&[]), (Vec::new(), Vec::new()));
        assert_eq!(difficulty_breakdown(&[]), DifficultyBreakdown::default());
        assert!(subject_breakdown(&[]).is_empty());
    }
}
