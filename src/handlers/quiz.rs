// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    error::AppError,
    models::{answer::AnswerSheet, test::TestConfig},
    services::{assembler::TestAssembler, evaluator, test_store::TestStore},
    state::AppState,
    utils::extract::ValidatedJson,
};

/// Generates a randomized practice test.
///
/// * Validates the config (at least one subject, 1-100 questions).
/// * Samples matching questions and stores the test for later evaluation.
/// * Responds 400 when no question matches.
pub async fn generate_test(
    State(state): State<AppState>,
    ValidatedJson(config): ValidatedJson<TestConfig>,
) -> Result<impl IntoResponse, AppError> {
    let assembler = TestAssembler::new(&state.catalog, &state.tests);
    let test = {
        let mut rng = state.rng.lock();
        assembler.generate(config, &mut *rng)?
    };

    Ok(Json(test))
}

/// Scores submitted answers against a previously generated test.
///
/// Unknown or expired test ids are a 400, like any other bad submission.
pub async fn evaluate_test(
    State(tests): State<Arc<TestStore>>,
    Path(test_id): Path<String>,
    ValidatedJson(sheet): ValidatedJson<AnswerSheet>,
) -> Result<impl IntoResponse, AppError> {
    let test = tests
        .get(&test_id)
        .ok_or_else(|| AppError::TestNotFound(test_id.clone()))?;

    let result = evaluator::evaluate(&test, &sheet.0, Utc::now());

    Ok(Json(result))
}
