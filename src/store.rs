use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::{Profile, TimeSlot};

/// Storage for user profiles.
///
/// The recommendation pipeline only reads; the profile endpoints write.
/// Each write replaces the targeted section of the profile wholesale.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Looks up a profile by username.
    async fn find(&self, username: &str) -> AppResult<Profile>;

    /// Creates an empty profile. Usernames are unique.
    async fn create(&self, username: &str) -> AppResult<Profile>;

    /// Replaces the profile's hobby selection.
    async fn update_hobbies(&self, username: &str, hobbies: Vec<String>) -> AppResult<Profile>;

    /// Replaces the profile's free-time slots and home location together.
    async fn update_free_time(
        &self,
        username: &str,
        free_time: Vec<TimeSlot>,
        location: String,
    ) -> AppResult<Profile>;
}

/// Profile store backed by a process-local map
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl InMemoryProfileStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find(&self, username: &str) -> AppResult<Profile> {
        let profiles = self.profiles.read().await;
        profiles
            .get(username)
            .cloned()
            .ok_or_else(|| AppError::ProfileNotFound(username.to_string()))
    }

    async fn create(&self, username: &str) -> AppResult<Profile> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(username) {
            return Err(AppError::InvalidInput(format!(
                "username {} is already taken",
                username
            )));
        }

        let profile = Profile::new(username.to_string());
        profiles.insert(username.to_string(), profile.clone());
        Ok(profile)
    }

    async fn update_hobbies(&self, username: &str, hobbies: Vec<String>) -> AppResult<Profile> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(username)
            .ok_or_else(|| AppError::ProfileNotFound(username.to_string()))?;

        profile.hobbies = hobbies;
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }

    async fn update_free_time(
        &self,
        username: &str,
        free_time: Vec<TimeSlot>,
        location: String,
    ) -> AppResult<Profile> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(username)
            .ok_or_else(|| AppError::ProfileNotFound(username.to_string()))?;

        profile.free_time = free_time;
        profile.location = location;
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }
}
