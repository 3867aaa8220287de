use axum::{
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

pub mod admin;
pub mod discover;
pub mod insights;
pub mod movies;
pub mod preferences;
pub mod ratings;
pub mod recommend;
pub mod watched;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(movies::list))
        .route("/movies/:id", get(movies::get))
        .route("/ratings", get(ratings::get).post(ratings::submit))
        .route("/watched", get(watched::list).post(watched::mark))
        .route("/watched/:content_id", delete(watched::unmark))
        .route(
            "/preferences",
            get(preferences::get).put(preferences::update),
        )
        .route("/discover", get(discover::recommendations))
        .route("/recommend", post(recommend::recommend))
        .route("/search", post(insights::search))
        .route("/analytics", post(insights::analytics))
        .route("/admin/dashboard", get(admin::dashboard))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
