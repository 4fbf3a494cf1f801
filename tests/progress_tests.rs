// tests/progress_tests.rs

use std::time::Duration;

use chrono::Utc;
use gateprep::{
    ProgressStore,
    models::{answer::UserAnswer, test::TestConfig},
    services::{
        assembler::TestAssembler, catalog::Catalog, evaluator, test_store::TestStore,
    },
};
use pretty_assertions::assert_eq;
use rand::{SeedableRng, rngs::StdRng};

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

fn databases_config() -> TestConfig {
    TestConfig {
        subjects: vec!["Databases".to_string()],
        topics: None,
        difficulty: None,
        num_questions: 5,
        question_types: None,
    }
}

#[test]
fn practice_sessions_accumulate_on_disk() {
    let catalog = Catalog::load(DATA_DIR).expect("Failed to load bundled data");
    let store = TestStore::new(10, Duration::from_secs(60));
    let assembler = TestAssembler::new(&catalog, &store);
    let mut rng = StdRng::seed_from_u64(42);

    let dir = tempfile::tempdir().unwrap();
    let progress = ProgressStore::new(dir.path().join("nested").join("progress.json"));

    // First session: everything right.
    let first = assembler.generate(databases_config(), &mut rng).unwrap();
    let answers: Vec<UserAnswer> = first
        .questions
        .iter()
        .map(|q| UserAnswer {
            question_id: q.id.clone(),
            answer: q.answer.clone(),
            time_spent: 20.0,
        })
        .collect();
    let perfect = evaluator::evaluate(&first, &answers, Utc::now());
    progress.record(&perfect).unwrap();

    // Second session: nothing answered.
    let second = assembler.generate(databases_config(), &mut rng).unwrap();
    let blank = evaluator::evaluate(&second, &[], Utc::now());
    progress.record(&blank).unwrap();

    let saved = progress.load().unwrap();
    assert_eq!(saved.total_tests, 2);
    assert_eq!(saved.total_questions_attempted, 10);
    assert_eq!(saved.test_history.len(), 2);
    assert_eq!(saved.overall_accuracy, 50.0);

    let subject = saved.subject("Databases").unwrap();
    assert_eq!(subject.total_questions, 10);
    assert_eq!(subject.correct, 5);
    assert_eq!(subject.accuracy, 50.0);

    let normalization = saved.topic("Normalization").unwrap();
    assert_eq!(normalization.attempts, 2);
    assert_eq!(normalization.correct, 1);
}

#[test]
fn reset_starts_over() {
    let dir = tempfile::tempdir().unwrap();
    let progress = ProgressStore::new(dir.path().join("progress.json"));

    let catalog = Catalog::load(DATA_DIR).unwrap();
    let store = TestStore::new(10, Duration::from_secs(60));
    let test = TestAssembler::new(&catalog, &store)
        .generate(databases_config(), &mut StdRng::seed_from_u64(1))
        .unwrap();
    progress
        .record(&evaluator::evaluate(&test, &[], Utc::now()))
        .unwrap();
    assert!(progress.path().exists());

    progress.reset().unwrap();

    assert!(!progress.path().exists());
    assert_eq!(progress.load().unwrap().total_tests, 0);
    // Resetting twice is harmless.
    progress.reset().unwrap();
}
