use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{AppError, AppResult};
use crate::models::{Profile, RecommendedVenue, SlotRecommendation};
use crate::services::assignment::assign_hobbies;
use crate::services::geocoding::Geocoder;
use crate::services::keywords::hobby_to_keyword;
use crate::services::places::VenueFinder;
use crate::services::retry::{call_with_retry, RetryPolicy};

/// Venues returned per slot, regardless of how many the provider found
pub const MAX_VENUES_PER_SLOT: usize = 3;

/// Orchestrates the recommendation pipeline: validate the profile, geocode
/// its location once, assign hobbies to slots, then search venues per slot.
pub struct RecommendationService {
    geocoder: Arc<dyn Geocoder>,
    finder: Arc<dyn VenueFinder>,
    retry: RetryPolicy,
    search_radius_m: u32,
    shuffle_seed: Option<u64>,
}

impl RecommendationService {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        finder: Arc<dyn VenueFinder>,
        retry: RetryPolicy,
        search_radius_m: u32,
    ) -> Self {
        Self {
            geocoder,
            finder,
            retry,
            search_radius_m,
            shuffle_seed: None,
        }
    }

    /// Fixes the hobby-shuffle seed so assignments become reproducible
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Generates one recommendation entry per free-time slot, in the order
    /// the slots are stored on the profile.
    pub async fn generate(&self, profile: &Profile) -> AppResult<Vec<SlotRecommendation>> {
        validate_profile(profile)?;

        tracing::info!(
            username = %profile.username,
            hobbies = profile.hobbies.len(),
            slots = profile.free_time.len(),
            "Generating recommendations"
        );

        // One geocode per request: every slot searches around the same
        // point, and without coordinates there is nothing to search
        let coordinates = call_with_retry(&self.retry, "geocoding", || {
            self.geocoder.resolve(&profile.location)
        })
        .await?;

        let mut rng = match self.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let assigned = assign_hobbies(&profile.hobbies, profile.free_time.len(), &mut rng)?;

        let mut results = Vec::with_capacity(profile.free_time.len());

        for (slot, hobby) in profile.free_time.iter().zip(assigned) {
            let keyword = hobby_to_keyword(&hobby);

            // A failed search costs this slot its venues, not the request
            let venues = match call_with_retry(&self.retry, "venue search", || {
                self.finder
                    .search(coordinates, &keyword, self.search_radius_m)
            })
            .await
            {
                Ok(venues) => venues,
                Err(err) => {
                    tracing::warn!(
                        slot = %slot.label(),
                        keyword = %keyword,
                        error = %err,
                        "Venue search failed, slot gets no recommendations"
                    );
                    Vec::new()
                }
            };

            results.push(SlotRecommendation {
                time_slot: slot.label(),
                hobby,
                recommendations: venues
                    .iter()
                    .take(MAX_VENUES_PER_SLOT)
                    .map(RecommendedVenue::from)
                    .collect(),
            });
        }

        tracing::info!(
            username = %profile.username,
            slots = results.len(),
            "Recommendations generated"
        );

        Ok(results)
    }
}

/// Checks the profile carries everything the pipeline needs
fn validate_profile(profile: &Profile) -> AppResult<()> {
    let mut missing = Vec::new();
    if profile.location.trim().is_empty() {
        missing.push("location");
    }
    if profile.hobbies.is_empty() {
        missing.push("hobbies");
    }
    if profile.free_time.is_empty() {
        missing.push("free time slots");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::IncompleteProfile(missing.join(", ")))
    }
}
