//! Weekly activity planner API
//!
//! Stores user profiles (hobbies, weekly free-time slots, home location)
//! and generates per-slot venue recommendations by pairing each slot with
//! a hobby and searching for matching venues near the user.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use std::sync::Arc;

use services::recommendation::RecommendationService;
use store::ProfileStore;

/// Shared application state.
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub recommender: RecommendationService,
}
