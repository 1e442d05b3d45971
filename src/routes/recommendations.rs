use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::SlotRecommendation, AppState,
};

/// Query parameters for the recommendation endpoint; the username is an
/// explicit parameter, not ambient session state
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub username: String,
}

/// Handler for generating weekly recommendations
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<SlotRecommendation>>> {
    tracing::info!(
        request_id = %request_id,
        username = %query.username,
        "Processing recommendation request"
    );

    let profile = state.store.find(&query.username).await?;
    let recommendations = state.recommender.generate(&profile).await?;

    tracing::info!(
        request_id = %request_id,
        username = %query.username,
        slots = recommendations.len(),
        "Recommendation request completed"
    );

    Ok(Json(recommendations))
}
