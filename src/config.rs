use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Google Maps API key, shared by geocoding and places lookups
    pub google_maps_api_key: String,

    /// Geocoding API base URL
    #[serde(default = "default_geocoding_api_url")]
    pub geocoding_api_url: String,

    /// Places nearby-search API base URL
    #[serde(default = "default_places_api_url")]
    pub places_api_url: String,

    /// Venue search radius in meters
    #[serde(default = "default_search_radius_m")]
    pub search_radius_m: u32,

    /// Lifetime of cached geocoding results in seconds; 0 disables the cache
    #[serde(default = "default_geocode_cache_ttl_secs")]
    pub geocode_cache_ttl_secs: u64,

    /// Budget for a single upstream call in seconds
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,

    /// Retries after the first failed upstream attempt
    #[serde(default = "default_upstream_max_retries")]
    pub upstream_max_retries: u32,

    /// Fixed seed for the hobby shuffle; unset draws from entropy
    #[serde(default)]
    pub shuffle_seed: Option<u64>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_geocoding_api_url() -> String {
    "https://maps.googleapis.com/maps/api/geocode/json".to_string()
}

fn default_places_api_url() -> String {
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json".to_string()
}

fn default_search_radius_m() -> u32 {
    5000
}

fn default_geocode_cache_ttl_secs() -> u64 {
    900
}

fn default_upstream_timeout_secs() -> u64 {
    5
}

fn default_upstream_max_retries() -> u32 {
    2
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
