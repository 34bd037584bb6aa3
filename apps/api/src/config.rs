use anyhow::{Context, Result};

pub const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com/v1";
pub const DEFAULT_OFFICE_ADDRESS: &str = "947 1st Avenue West, Alabaster, Alabama 35007";
pub const DEFAULT_ORIGIN_AIRPORT: &str = "BHM";

/// Application configuration loaded from environment variables.
///
/// Only `PORT` and `PLACES_TIMEOUT_SECS` can fail to parse. A missing Places key is
/// not fatal: proxy routes report `NOT_CONFIGURED` and distance estimation falls
/// back to the static mileage table.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_maps_api_key: Option<String>,
    pub places_base_url: String,
    pub places_timeout_secs: u64,
    pub office_address: String,
    pub origin_airport: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_maps_api_key: optional_env("GOOGLE_MAPS_API_KEY"),
            places_base_url: optional_env("PLACES_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string()),
            places_timeout_secs: std::env::var("PLACES_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u64>()
                .context("PLACES_TIMEOUT_SECS must be a whole number of seconds")?,
            office_address: optional_env("OFFICE_ADDRESS")
                .unwrap_or_else(|| DEFAULT_OFFICE_ADDRESS.to_string()),
            origin_airport: optional_env("ORIGIN_AIRPORT")
                .unwrap_or_else(|| DEFAULT_ORIGIN_AIRPORT.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Configuration used by router tests: no API key, default origin values.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            google_maps_api_key: None,
            places_base_url: DEFAULT_PLACES_BASE_URL.to_string(),
            places_timeout_secs: 1,
            office_address: DEFAULT_OFFICE_ADDRESS.to_string(),
            origin_airport: DEFAULT_ORIGIN_AIRPORT.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

/// Reads an env var, treating unset and blank values the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
