// src/services/progress.rs

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::models::{
    progress::{DifficultyRecord, Progress, SubjectProgress, TestHistoryEntry, TopicMastery},
    question::Difficulty,
    result::{Tally, TestResult},
};

/// An error returned when reading or writing a progress record.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("cannot access progress file {0}: {1}")]
    Io(PathBuf, #[source] io::Error),

    #[error("progress file {0} is corrupt: {1}")]
    Corrupt(PathBuf, #[source] serde_json::Error),
}

fn percentage(correct: u32, total: u32) -> f64 {
    Tally { correct, total }.percentage()
}

/// Folds a finished test into the running progress record.
///
/// * History gains one entry dated by the calendar day of `now`.
/// * `overall_accuracy` is the plain mean of history accuracies, not weighted by
///   question count.
/// * Topic, subject and difficulty accuracies are recomputed from summed counts.
pub fn update(prior: Progress, result: &TestResult, now: DateTime<Utc>) -> Progress {
    let mut progress = prior.migrate();

    progress.test_history.push(TestHistoryEntry {
        test_id: result.test_id.clone(),
        date: now.date_naive(),
        score: result.score_percentage,
        accuracy: result.accuracy,
    });

    progress.total_tests += 1;
    progress.total_questions_attempted += result.total_questions;

    let history_len = progress.test_history.len() as f64;
    progress.overall_accuracy =
        progress.test_history.iter().map(|t| t.accuracy).sum::<f64>() / history_len;

    merge_topics(&mut progress, result, now);
    merge_subjects(&mut progress, result);
    merge_difficulties(&mut progress, result);

    progress.updated_at = now;
    progress
}

fn merge_topics(progress: &mut Progress, result: &TestResult, now: DateTime<Utc>) {
    // (topic, subject of first result on that topic, tally)
    let mut seen: Vec<(&str, &str, Tally)> = Vec::new();
    for qr in &result.question_results {
        let topic = qr.question.topic.as_str();
        match seen.iter_mut().find(|(t, _, _)| *t == topic) {
            Some((_, _, tally)) => tally.record(qr.is_correct),
            None => {
                let mut tally = Tally::default();
                tally.record(qr.is_correct);
                seen.push((topic, qr.question.subject.as_str(), tally));
            }
        }
    }

    for (topic, subject, tally) in seen {
        match progress.topic_mastery.iter_mut().find(|tm| tm.topic == topic) {
            Some(existing) => {
                existing.attempts += tally.total;
                existing.correct += tally.correct;
                existing.accuracy = percentage(existing.correct, existing.attempts);
                existing.last_practiced = now;
            }
            None => progress.topic_mastery.push(TopicMastery {
                topic: topic.to_string(),
                subject: subject.to_string(),
                attempts: tally.total,
                correct: tally.correct,
                accuracy: tally.percentage(),
                last_practiced: now,
            }),
        }
    }
}

fn merge_subjects(progress: &mut Progress, result: &TestResult) {
    for sb in &result.subject_breakdown {
        match progress
            .subject_progress
            .iter_mut()
            .find(|sp| sp.subject == sb.subject)
        {
            Some(existing) => {
                existing.total_questions += sb.total;
                existing.correct += sb.correct;
                existing.accuracy = percentage(existing.correct, existing.total_questions);
            }
            None => progress.subject_progress.push(SubjectProgress {
                subject: sb.subject.clone(),
                total_questions: sb.total,
                correct: sb.correct,
                accuracy: percentage(sb.correct, sb.total),
            }),
        }
    }
}

fn merge_difficulties(progress: &mut Progress, result: &TestResult) {
    for difficulty in Difficulty::ALL {
        let added = result.difficulty_breakdown.bucket(difficulty);
        if added.total == 0 {
            continue;
        }
        let record: &mut DifficultyRecord = match difficulty {
            Difficulty::Easy => &mut progress.difficulty_progress.easy,
            Difficulty::Medium => &mut progress.difficulty_progress.medium,
            Difficulty::Hard => &mut progress.difficulty_progress.hard,
        };
        record.correct += added.correct;
        record.total += added.total;
        record.accuracy = percentage(record.correct, record.total);
    }
}

/// Progress record persisted as a single JSON file.
///
/// Saves replace the whole file atomically (temp file + rename); the last
/// write wins.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored record, or a fresh one if nothing was saved yet.
    pub fn load(&self) -> Result<Progress, ProgressError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Progress::new(Utc::now()));
            }
            Err(err) => return Err(ProgressError::Io(self.path.clone(), err)),
        };

        let progress: Progress = serde_json::from_str(&raw)
            .map_err(|err| ProgressError::Corrupt(self.path.clone(), err))?;
        Ok(progress.migrate())
    }

    pub fn save(&self, progress: &Progress) -> Result<(), ProgressError> {
        let io_err = |err| ProgressError::Io(self.path.clone(), err);

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(io_err)?;

        let json = serde_json::to_vec_pretty(progress)
            .map_err(|err| ProgressError::Corrupt(self.path.clone(), err))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;
        tmp.write_all(&json).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|err| io_err(err.error))?;
        Ok(())
    }

    /// Load, fold in `result`, save. Returns the updated record.
    pub fn record(&self, result: &TestResult) -> Result<Progress, ProgressError> {
        let updated = update(self.load()?, result, Utc::now());
        self.save(&updated)?;
        tracing::debug!(
            tests = updated.total_tests,
            accuracy = updated.overall_accuracy,
            "Progress saved to {}",
            self.path.display()
        );
        Ok(updated)
    }

    /// Deletes the stored record. Missing files are fine.
    pub fn reset(&self) -> Result<(), ProgressError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ProgressError::Io(self.path.clone(), err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{
            answer::UserAnswer,
            question::{Question, QuestionType},
            test::{Test, TestConfig},
        },
        services::{catalog::tests::question, evaluator::evaluate},
    };
    use chrono::{Duration, NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, 9, 30, 0).unwrap()
    }

    fn test_of(id: &str, questions: Vec<Question>) -> Test {
        Test {
            test_id: id.to_string(),
            config: TestConfig {
                subjects: vec!["any".to_string()],
                topics: None,
                difficulty: None,
                num_questions: questions.len() as u32,
                question_types: None,
            },
            questions,
            created_at: at(1),
        }
    }

    /// A scored test with `correct` right answers out of `total` questions,
    /// all on topic `topic` of subject `subject`.
    fn scored(id: &str, subject: &str, topic: &str, correct: usize, total: usize) -> TestResult {
        let questions: Vec<Question> = (0..total)
            .map(|i| {
                question(
                    &format!("{}-{}", id, i),
                    QuestionType::Mcq,
                    subject,
                    topic,
                    Difficulty::Medium,
                    "A",
                )
            })
            .collect();
        let answers: Vec<UserAnswer> = questions
            .iter()
            .enumerate()
            .map(|(i, q)| UserAnswer {
                question_id: q.id.clone(),
                answer: if i < correct { "A" } else { "B" }.to_string(),
                time_spent: 1.0,
            })
            .collect();
        evaluate(&test_of(id, questions), &answers, at(1))
    }

    #[test]
    fn overall_accuracy_is_an_unweighted_mean() {
        let first = scored("t1", "Operating Systems", "Paging", 4, 5); // 80%
        let second = scored("t2", "Operating Systems", "Paging", 6, 10); // 60%

        let progress = update(Progress::new(at(1)), &first, at(1));
        let progress = update(progress, &second, at(2));

        assert_eq!(progress.overall_accuracy, 70.0);
        assert_eq!(progress.total_tests, 2);
        assert_eq!(progress.total_questions_attempted, 15);
    }

    #[test]
    fn topic_mastery_sums_counts() {
        let first = scored("t1", "Operating Systems", "Paging", 4, 5);
        let second = scored("t2", "Operating Systems", "Paging", 6, 10);

        let progress = update(Progress::new(at(1)), &first, at(1));
        let progress = update(progress, &second, at(2));

        let paging = progress.topic("Paging").unwrap();
        assert_eq!((paging.correct, paging.attempts), (10, 15));
        assert!((paging.accuracy - 66.666).abs() < 0.01);
        assert_eq!(paging.subject, "Operating Systems");
        assert_eq!(paging.last_practiced, at(2));
    }

    #[test]
    fn subject_accuracy_is_weighted_unlike_overall() {
        let first = scored("t1", "Databases", "Normalization", 4, 5);
        let second = scored("t2", "Databases", "Transactions", 6, 10);

        let progress = update(Progress::new(at(1)), &first, at(1));
        let progress = update(progress, &second, at(2));

        let databases = progress.subject("Databases").unwrap();
        assert_eq!(databases.total_questions, 15);
        assert_eq!(databases.correct, 10);
        assert!((databases.accuracy - 66.666).abs() < 0.01);
        assert_eq!(progress.overall_accuracy, 70.0);
        assert_eq!(progress.topic_mastery.len(), 2);
    }

    #[test]
    fn history_records_calendar_day() {
        let result = scored("t1", "Algorithms", "Sorting", 1, 2);
        let progress = update(Progress::new(at(1)), &result, at(5) + Duration::hours(10));

        let entry = &progress.test_history[0];
        assert_eq!(entry.test_id, "t1");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
        assert_eq!(entry.accuracy, 50.0);
        assert_eq!(entry.score, 50.0);
    }

    #[test]
    fn difficulty_progress_accumulates() {
        let first = scored("t1", "Algorithms", "Sorting", 1, 2);
        let second = scored("t2", "Algorithms", "Sorting", 2, 2);

        let progress = update(Progress::new(at(1)), &first, at(1));
        let progress = update(progress, &second, at(2));

        let medium = progress.difficulty_progress.medium;
        assert_eq!((medium.correct, medium.total), (3, 4));
        assert_eq!(medium.accuracy, 75.0);
        assert_eq!(progress.difficulty_progress.easy.total, 0);
    }

    #[test]
    fn store_round_trips_and_resets() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProgressStore::new(dir.path().join("nested").join("progress.json"));

        let fresh = store.load().unwrap();
        assert_eq!(fresh.total_tests, 0);

        store.record(&scored("t1", "Algorithms", "Sorting", 1, 1)).unwrap();
        let updated = store.record(&scored("t2", "Algorithms", "Sorting", 0, 1)).unwrap();
        assert_eq!(updated.total_tests, 2);

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, updated);
        assert_eq!(reloaded.overall_accuracy, 50.0);

        store.reset().unwrap();
        assert_eq!(store.load().unwrap().total_tests, 0);
        store.reset().unwrap();
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ProgressStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ProgressError::Corrupt(..)));
    }

    #[test]
    fn legacy_record_is_migrated_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(
            &path,
            r#"{"totalTests": 1, "totalQuestions": 4, "overallAccuracy": 50,
                "testHistory": [{"test_id": "old", "date": "2026-01-10", "score": 50, "accuracy": 50}],
                "topicMastery": [], "subjectProgress": []}"#,
        )
        .unwrap();

        let store = ProgressStore::new(&path);
        let updated = store.record(&scored("new", "Algorithms", "Sorting", 2, 2)).unwrap();

        assert_eq!(updated.schema_version, crate::models::progress::CURRENT_SCHEMA_VERSION);
        assert_eq!(updated.total_tests, 2);
        assert_eq!(updated.total_questions_attempted, 6);
        assert_eq!(updated.overall_accuracy, 75.0);
    }

    #[test]
    fn accuracy_only_difficulty_file_loads_and_merges() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(
            &path,
            r#"{"total_tests": 1, "total_questions_attempted": 2, "overall_accuracy": 50,
                "test_history": [{"test_id": "old", "date": "2026-01-10", "score": 50, "accuracy": 50}],
                "topic_mastery": [], "subject_progress": [],
                "difficulty_progress": {"easy": 100, "medium": 0, "hard": 0}}"#,
        )
        .unwrap();

        let store = ProgressStore::new(&path);
        assert_eq!(store.load().unwrap().difficulty_progress.easy.accuracy, 100.0);

        let updated = store.record(&scored("new", "Algorithms", "Sorting", 1, 2)).unwrap();
        let medium = updated.difficulty_progress.medium;
        assert_eq!((medium.correct, medium.total), (1, 2));
        assert_eq!(medium.accuracy, 50.0);
        assert_eq!(updated.difficulty_progress.easy.accuracy, 100.0);
    }
}
