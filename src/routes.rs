// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{catalog, quiz, report, video},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (catalog, tests, videos, reports).
/// * Applies global middleware (Trace, CORS).
/// * Serves the built client from `STATIC_DIR` when configured.
/// * Injects global state.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let test_routes = Router::new()
        .route("/generate", post(quiz::generate_test))
        .route("/{test_id}/evaluate", post(quiz::evaluate_test));

    let video_routes = Router::new()
        .route("/", get(video::list_videos))
        .route("/subject/{subject}", get(video::videos_by_subject))
        .route("/topic/{topic}", get(video::videos_by_topic));

    let api = Router::new()
        .route("/health", get(catalog::health))
        .route("/syllabus", get(catalog::get_syllabus))
        .route("/questions", get(catalog::list_questions))
        .route("/reports", post(report::create_report))
        .nest("/tests", test_routes)
        .nest("/videos", video_routes);

    let mut app = Router::new().nest("/api", api);

    if let Some(dir) = &state.config.static_dir {
        tracing::info!("Serving client files from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    // Global Middleware (applied from outside in)
    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    )
    .with_state(state)
}
