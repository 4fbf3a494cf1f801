// src/handlers/catalog.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{services::catalog::Catalog, state::AppState};

/// Returns the exam syllabus.
pub async fn get_syllabus(State(catalog): State<Arc<Catalog>>) -> impl IntoResponse {
    Json(catalog.syllabus().clone())
}

/// Dumps the whole question bank. Diagnostic only.
pub async fn list_questions(State(catalog): State<Arc<Catalog>>) -> impl IntoResponse {
    Json(catalog.all_questions().to_vec())
}

/// Liveness probe with catalog and test store sizes.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "questions": state.catalog.all_questions().len(),
        "tests": state.tests.len(),
    }))
}
