//! Venue search provider
//!
//! Wraps the Google Places nearby-search API. Results come back in the
//! provider's relevance order and are passed through untouched; ranking is
//! the provider's job, capping is the caller's.

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{Coordinates, Venue};

/// Finds venues near a point for a search keyword
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait VenueFinder: Send + Sync {
    /// Searches for venues around `coordinates` matching `keyword` within
    /// `radius_m` meters. A non-OK service status means "no venues", not
    /// a failed request.
    async fn search(
        &self,
        coordinates: Coordinates,
        keyword: &str,
        radius_m: u32,
    ) -> AppResult<Vec<Venue>>;
}

/// Raw nearby-search response
#[derive(Debug, Deserialize)]
struct PlacesResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
    #[serde(default)]
    error_message: Option<String>,
}

/// One nearby-search entry; vicinity and rating are not guaranteed upstream
#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: String,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    place_id: String,
}

impl From<PlaceResult> for Venue {
    fn from(place: PlaceResult) -> Self {
        Venue {
            name: place.name,
            address: place.vicinity.unwrap_or_default(),
            rating: place.rating,
            place_id: place.place_id,
        }
    }
}

/// Google Places nearby-search client
#[derive(Clone)]
pub struct GooglePlacesFinder {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl GooglePlacesFinder {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    /// Applies the non-OK-means-empty policy and converts the entries
    fn convert_response(&self, keyword: &str, payload: PlacesResponse) -> Vec<Venue> {
        if payload.status != "OK" {
            tracing::warn!(
                keyword = %keyword,
                status = %payload.status,
                error_message = payload.error_message.as_deref().unwrap_or(""),
                "Places API returned non-OK status, treating as no venues"
            );
            return Vec::new();
        }

        payload.results.into_iter().map(Venue::from).collect()
    }
}

#[async_trait::async_trait]
impl VenueFinder for GooglePlacesFinder {
    async fn search(
        &self,
        coordinates: Coordinates,
        keyword: &str,
        radius_m: u32,
    ) -> AppResult<Vec<Venue>> {
        let location = coordinates.to_string();
        let radius = radius_m.to_string();

        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("keyword", keyword),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Places API returned status {}: {}",
                status, body
            )));
        }

        let payload: PlacesResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse places response: {}", e)))?;

        let venues = self.convert_response(keyword, payload);

        tracing::info!(
            keyword = %keyword,
            coordinates = %coordinates,
            venues = venues.len(),
            "Nearby venue search completed"
        );

        Ok(venues)
    }
}
