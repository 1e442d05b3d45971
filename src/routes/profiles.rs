use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Profile, TimeSlot},
    AppState,
};

/// Request body for profile registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
}

/// Request body for replacing a profile's hobbies
#[derive(Debug, Deserialize)]
pub struct UpdateHobbiesRequest {
    pub hobbies: Vec<String>,
}

/// Request body for replacing free-time slots; the location rides along
/// because the client captures both on the same screen
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFreeTimeRequest {
    pub free_time: Vec<TimeSlot>,
    pub location: String,
}

/// Handler for profile registration
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Profile>)> {
    let username = request.username.trim();
    if username.is_empty() {
        return Err(AppError::InvalidInput(
            "username must not be empty".to_string(),
        ));
    }

    let profile = state.store.create(username).await?;

    tracing::info!(username = %profile.username, "Profile registered");

    Ok((StatusCode::CREATED, Json(profile)))
}

/// Handler for fetching a stored profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> AppResult<Json<Profile>> {
    let profile = state.store.find(&username).await?;
    Ok(Json(profile))
}

/// Handler for replacing a profile's hobby selection
pub async fn update_hobbies(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Json(request): Json<UpdateHobbiesRequest>,
) -> AppResult<Json<Profile>> {
    // Blank entries from the client UI are dropped rather than rejected
    let hobbies: Vec<String> = request
        .hobbies
        .into_iter()
        .map(|hobby| hobby.trim().to_string())
        .filter(|hobby| !hobby.is_empty())
        .collect();

    let profile = state.store.update_hobbies(&username, hobbies).await?;

    tracing::info!(
        username = %username,
        hobbies = profile.hobbies.len(),
        "Hobbies updated"
    );

    Ok(Json(profile))
}

/// Handler for replacing a profile's free-time slots and home location
pub async fn update_free_time(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Json(request): Json<UpdateFreeTimeRequest>,
) -> AppResult<Json<Profile>> {
    if request.location.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "location must not be empty".to_string(),
        ));
    }
    for slot in &request.free_time {
        slot.validate()?;
    }

    let profile = state
        .store
        .update_free_time(
            &username,
            request.free_time,
            request.location.trim().to_string(),
        )
        .await?;

    tracing::info!(
        username = %username,
        slots = profile.free_time.len(),
        "Free time updated"
    );

    Ok(Json(profile))
}
