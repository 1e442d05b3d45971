use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};

use weekly_planner_api::error::{AppError, AppResult};
use weekly_planner_api::models::{Coordinates, Venue};
use weekly_planner_api::routes::create_router;
use weekly_planner_api::services::geocoding::Geocoder;
use weekly_planner_api::services::places::VenueFinder;
use weekly_planner_api::services::recommendation::RecommendationService;
use weekly_planner_api::services::retry::RetryPolicy;
use weekly_planner_api::store::InMemoryProfileStore;
use weekly_planner_api::AppState;

/// How the stub geocoder answers every lookup.
#[derive(Clone, Copy)]
#[allow(dead_code)]
pub enum GeocoderBehavior {
    Resolve,
    NotFound,
    Unavailable,
}

/// Geocoder stub with a fixed answer and an invocation counter.
pub struct StubGeocoder {
    behavior: GeocoderBehavior,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn resolve(&self, location: &str) -> AppResult<Coordinates> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            GeocoderBehavior::Resolve => Ok(Coordinates {
                latitude: 42.3736,
                longitude: -71.1097,
            }),
            GeocoderBehavior::NotFound => Err(AppError::LocationNotFound(location.to_string())),
            GeocoderBehavior::Unavailable => {
                Err(AppError::Upstream("geocoding unavailable".to_string()))
            }
        }
    }
}

/// Venue finder stub returning the same venue list for every search.
pub struct StubFinder {
    venues: Vec<Venue>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl VenueFinder for StubFinder {
    async fn search(
        &self,
        _coordinates: Coordinates,
        _keyword: &str,
        _radius_m: u32,
    ) -> AppResult<Vec<Venue>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.venues.clone())
    }
}

/// Invocation counters for the stubbed upstream providers.
pub struct UpstreamCalls {
    pub geocoder: Arc<AtomicUsize>,
    pub finder: Arc<AtomicUsize>,
}

/// Numbered venue fixtures: "Venue 1" at "1 Main St" rated 4.1, and so on.
#[allow(dead_code)]
pub fn sample_venues(count: usize) -> Vec<Venue> {
    (1..=count)
        .map(|n| Venue {
            name: format!("Venue {}", n),
            address: format!("{} Main St", n),
            rating: Some(4.0 + n as f64 / 10.0),
            place_id: format!("place{}", n),
        })
        .collect()
}

/// Create a test app with stubbed upstream providers and an empty store.
/// Returns the router and the upstream call counters.
#[allow(dead_code)]
pub fn create_test_app(
    geocoder: GeocoderBehavior,
    venues: Vec<Venue>,
) -> (axum::Router, UpstreamCalls) {
    let geocoder_calls = Arc::new(AtomicUsize::new(0));
    let finder_calls = Arc::new(AtomicUsize::new(0));

    let retry = RetryPolicy {
        max_retries: 0,
        base_backoff: Duration::from_millis(1),
        timeout: Duration::from_secs(1),
    };

    let recommender = RecommendationService::new(
        Arc::new(StubGeocoder {
            behavior: geocoder,
            calls: geocoder_calls.clone(),
        }),
        Arc::new(StubFinder {
            venues,
            calls: finder_calls.clone(),
        }),
        retry,
        5000,
    )
    .with_shuffle_seed(7);

    let state = Arc::new(AppState {
        store: Arc::new(InMemoryProfileStore::new()),
        recommender,
    });

    (
        create_router(state),
        UpstreamCalls {
            geocoder: geocoder_calls,
            finder: finder_calls,
        },
    )
}

/// Build a JSON request with the right content type.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a body-less GET request.
#[allow(dead_code)]
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not valid JSON")
}
