// src/handlers/report.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    models::result::TestResult,
    services::report::ReportBuilder,
    state::AppState,
    utils::extract::ValidatedJson,
};

/// Builds a study report for an evaluated test.
///
/// Coach failures never fail the request; the report falls back to a fixed message.
pub async fn create_report(
    State(state): State<AppState>,
    ValidatedJson(result): ValidatedJson<TestResult>,
) -> Result<impl IntoResponse, AppError> {
    let report = ReportBuilder::new(&state.catalog, state.coach.as_ref())
        .build(&result)
        .await;

    Ok(Json(report))
}
