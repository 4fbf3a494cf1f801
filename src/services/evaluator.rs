// src/services/evaluator.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{
    models::{
        answer::UserAnswer,
        question::{Question, QuestionType},
        result::{QuestionResult, TestResult},
        test::Test,
    },
    services::aggregator,
    utils::text::{keywords, normalize_answer},
};

/// Grades one answer against the question's canonical answer.
///
/// Both sides are lowercased and trimmed. A blank answer is never correct.
/// * MCQ / fill-in-blank: exact match.
/// * Short answer: either string contains the other.
/// * Long answer: at least half of the canonical keywords (tokens longer than
///   three characters) appear in the answer; with no keywords, exact match.
pub fn is_answer_correct(question: &Question, user_answer: &str) -> bool {
    let given = normalize_answer(user_answer);
    if given.is_empty() {
        return false;
    }
    let expected = normalize_answer(&question.answer);

    match question.question_type {
        QuestionType::Mcq | QuestionType::FillInBlank => given == expected,
        QuestionType::ShortAnswer => given.contains(&expected) || expected.contains(&given),
        QuestionType::LongAnswer => {
            let wanted = keywords(&expected);
            if wanted.is_empty() {
                return given == expected;
            }
            let matched = wanted.iter().filter(|kw| given.contains(*kw)).count();
            matched * 2 >= wanted.len()
        }
    }
}

/// Scores `answers` against `test`.
///
/// Questions are visited in test order; answers are matched by question id
/// (the last submission for an id wins) and a missing answer counts as blank.
/// `total_time` sums every submitted answer, including ones for questions not
/// in the test.
pub fn evaluate(test: &Test, answers: &[UserAnswer], completed_at: DateTime<Utc>) -> TestResult {
    let by_question: HashMap<&str, &UserAnswer> = answers
        .iter()
        .map(|a| (a.question_id.as_str(), a))
        .collect();

    let mut total_marks = 0;
    let mut marks_obtained = 0;

    let question_results: Vec<QuestionResult> = test
        .questions
        .iter()
        .map(|question| {
            let submitted = by_question.get(question.id.as_str());
            let user_answer = submitted.map(|a| a.answer.clone()).unwrap_or_default();
            let is_correct = is_answer_correct(question, &user_answer);
            let marks_awarded = if is_correct { question.marks } else { 0 };

            total_marks += question.marks;
            marks_obtained += marks_awarded;

            QuestionResult {
                question_id: question.id.clone(),
                question: question.clone(),
                user_answer,
                correct_answer: question.answer.clone(),
                is_correct,
                marks_awarded,
                time_spent: submitted.map(|a| a.time_spent).unwrap_or(0.0),
            }
        })
        .collect();

    let total_questions = question_results.len() as u32;
    let correct = question_results.iter().filter(|r| r.is_correct).count() as u32;

    let score_percentage = if total_marks > 0 {
        f64::from(marks_obtained) * 100.0 / f64::from(total_marks)
    } else {
        0.0
    };
    let accuracy = if total_questions > 0 {
        f64::from(correct) * 100.0 / f64::from(total_questions)
    } else {
        0.0
    };

    let (strong_topics, weak_topics) = aggregator::classify_topics(&question_results);
    let difficulty_breakdown = aggregator::difficulty_breakdown(&question_results);
    let subject_breakdown = aggregator::subject_breakdown(&question_results);

    tracing::info!(
        test_id = %test.test_id,
        correct,
        total = total_questions,
        marks = marks_obtained,
        "Test evaluated"
    );

    TestResult {
        test_id: test.test_id.clone(),
        completed_at,
        total_questions,
        total_marks,
        marks_obtained,
        score_percentage,
        accuracy,
        total_time: answers.iter().map(|a| a.time_spent).sum(),
        question_results,
        strong_topics,
        weak_topics,
        difficulty_breakdown,
        subject_breakdown,
    }
}
