// src/handlers/video.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::services::catalog::Catalog;

/// Lists every study video.
pub async fn list_videos(State(catalog): State<Arc<Catalog>>) -> impl IntoResponse {
    Json(catalog.videos().to_vec())
}

/// Videos whose subject loosely matches the path segment.
pub async fn videos_by_subject(
    State(catalog): State<Arc<Catalog>>,
    Path(subject): Path<String>,
) -> impl IntoResponse {
    Json(catalog.videos_by_subject(&subject))
}

pub async fn videos_by_topic(
    State(catalog): State<Arc<Catalog>>,
    Path(topic): Path<String>,
) -> impl IntoResponse {
    Json(catalog.videos_by_topic(&topic))
}
