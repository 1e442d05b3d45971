use axum::{
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span, request_id_middleware};
use crate::AppState;

pub mod profiles;
pub mod recommendations;

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span))
        // Request IDs are assigned outside the trace layer so spans see them
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profiles", post(profiles::register))
        .route("/profiles/:username", get(profiles::get_profile))
        .route("/profiles/:username/hobbies", put(profiles::update_hobbies))
        .route(
            "/profiles/:username/free-time",
            put(profiles::update_free_time),
        )
        .route("/recommendations", get(recommendations::generate))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
