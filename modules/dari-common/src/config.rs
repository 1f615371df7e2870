use std::env;

use crate::types::GeoPoint;

/// Greater Tunis centroid — substituted when geocoding cannot resolve an
/// address.
pub const DEFAULT_REGION_CENTER: GeoPoint = GeoPoint {
    lat: 36.8065,
    lng: 10.1815,
};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // External providers
    pub nominatim_base_url: String,
    pub overpass_base_url: String,

    // Database (Postgres cache store)
    pub database_url: String,

    // Analysis
    pub default_region_center: GeoPoint,
    pub drift_tolerance_deg: f64,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            database_url: required_env("DATABASE_URL"),
            ..Self::ephemeral_from_env()
        }
    }

    /// Load a config for callers using the in-memory cache store
    /// (no DATABASE_URL needed).
    pub fn ephemeral_from_env() -> Self {
        Self {
            nominatim_base_url: env::var("NOMINATIM_BASE_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string()),
            overpass_base_url: env::var("OVERPASS_BASE_URL")
                .unwrap_or_else(|_| "https://overpass-api.de".to_string()),
            database_url: String::new(),
            default_region_center: region_center_from_env(),
            drift_tolerance_deg: env::var("COORD_DRIFT_TOLERANCE_DEG")
                .unwrap_or_else(|_| "0.001".to_string())
                .parse()
                .expect("COORD_DRIFT_TOLERANCE_DEG must be a number"),
        }
    }
}

fn region_center_from_env() -> GeoPoint {
    let lat = env::var("DEFAULT_REGION_LAT").ok();
    let lng = env::var("DEFAULT_REGION_LNG").ok();
    match (lat, lng) {
        (Some(lat), Some(lng)) => GeoPoint {
            lat: lat.parse().expect("DEFAULT_REGION_LAT must be a number"),
            lng: lng.parse().expect("DEFAULT_REGION_LNG must be a number"),
        },
        _ => DEFAULT_REGION_CENTER,
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
