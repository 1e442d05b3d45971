use std::sync::Arc;
use std::time::Duration;

use weekly_planner_api::{
    config::Config,
    routes::create_router,
    services::{
        geocoding::{CachedGeocoder, Geocoder, GoogleGeocoder},
        places::GooglePlacesFinder,
        recommendation::RecommendationService,
        retry::RetryPolicy,
    },
    store::InMemoryProfileStore,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting weekly planner API");

    let google_geocoder = GoogleGeocoder::new(
        config.google_maps_api_key.clone(),
        config.geocoding_api_url.clone(),
    );
    let geocoder: Arc<dyn Geocoder> = if config.geocode_cache_ttl_secs > 0 {
        Arc::new(CachedGeocoder::new(
            google_geocoder,
            Duration::from_secs(config.geocode_cache_ttl_secs),
        ))
    } else {
        Arc::new(google_geocoder)
    };

    let finder = Arc::new(GooglePlacesFinder::new(
        config.google_maps_api_key.clone(),
        config.places_api_url.clone(),
    ));

    let retry = RetryPolicy {
        max_retries: config.upstream_max_retries,
        timeout: Duration::from_secs(config.upstream_timeout_secs),
        ..RetryPolicy::default()
    };

    let mut recommender =
        RecommendationService::new(geocoder, finder, retry, config.search_radius_m);
    if let Some(seed) = config.shuffle_seed {
        recommender = recommender.with_shuffle_seed(seed);
    }

    let state = Arc::new(AppState {
        store: Arc::new(InMemoryProfileStore::new()),
        recommender,
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Structured logging with env-driven filtering
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weekly_planner_api=debug,info".into()),
        )
        .init();
}
