//! Geocoding provider
//!
//! Resolves free-text locations ("Cambridge, MA") to coordinates using the
//! Google Maps Geocoding API. The first candidate wins; ambiguity is not
//! surfaced to the caller.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::Client as HttpClient;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::Coordinates;

/// Resolves location text to geographic coordinates
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves a location string to the coordinates of its first candidate.
    async fn resolve(&self, location: &str) -> AppResult<Coordinates>;
}

/// Raw Geocoding API response; only the first result's geometry is read
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    location: GeocodeLocation,
}

#[derive(Debug, Deserialize)]
struct GeocodeLocation {
    lat: f64,
    lng: f64,
}

/// Google Maps Geocoding API client
#[derive(Clone)]
pub struct GoogleGeocoder {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl GoogleGeocoder {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    /// Turns a parsed geocoding payload into coordinates or the right error
    fn parse_response(&self, location: &str, payload: GeocodeResponse) -> AppResult<Coordinates> {
        if let Some(result) = payload.results.first() {
            return Ok(Coordinates {
                latitude: result.geometry.location.lat,
                longitude: result.geometry.location.lng,
            });
        }

        match payload.status.as_str() {
            // The service understood the text and found nothing for it
            "OK" | "ZERO_RESULTS" => Err(AppError::LocationNotFound(location.to_string())),
            status => Err(AppError::Upstream(format!(
                "Geocoding API returned status {}: {}",
                status,
                payload.error_message.unwrap_or_default()
            ))),
        }
    }
}

#[async_trait::async_trait]
impl Geocoder for GoogleGeocoder {
    async fn resolve(&self, location: &str) -> AppResult<Coordinates> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[("address", location), ("key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Geocoding API returned status {}: {}",
                status, body
            )));
        }

        let payload: GeocodeResponse = response.json().await.map_err(|e| {
            AppError::Upstream(format!("Failed to parse geocoding response: {}", e))
        })?;

        let coordinates = self.parse_response(location, payload)?;

        tracing::info!(
            location = %location,
            coordinates = %coordinates,
            "Location resolved"
        );

        Ok(coordinates)
    }
}

struct CacheEntry {
    coordinates: Coordinates,
    stored_at: Instant,
}

/// TTL cache over an inner geocoder, keyed by normalized location text.
///
/// Within the TTL a profile whose location just changed back and forth can
/// be served slightly stale coordinates; that trade is accepted to keep
/// repeat requests from paying for geocoding every time.
pub struct CachedGeocoder<G> {
    inner: G,
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl<G> CachedGeocoder<G> {
    pub fn new(inner: G, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn cache_key(location: &str) -> String {
        location.trim().to_lowercase()
    }
}

#[async_trait::async_trait]
impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn resolve(&self, location: &str) -> AppResult<Coordinates> {
        let key = Self::cache_key(location);

        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&key) {
                if entry.stored_at.elapsed() < self.ttl {
                    tracing::debug!(location = %location, "Geocode cache hit");
                    return Ok(entry.coordinates);
                }
            }
        }

        // Only successful resolutions are cached; failures stay cheap to retry
        let coordinates = self.inner.resolve(location).await?;

        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        entries.insert(
            key,
            CacheEntry {
                coordinates,
                stored_at: Instant::now(),
            },
        );

        Ok(coordinates)
    }
}
