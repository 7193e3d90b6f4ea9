//! Environment-backed configuration.
//!
//! Two secrets come from the environment (the map-provider key and the store
//! key); everything else has a default matching the deployed app.

use std::env;

use crate::error::ConfigError;
use crate::types::LatLng;

pub const ENV_MAPS_API_KEY: &str = "WAYPOST_MAPS_API_KEY";
pub const ENV_STORE_API_KEY: &str = "WAYPOST_STORE_API_KEY";
pub const ENV_COLLECTION: &str = "WAYPOST_COLLECTION";
pub const ENV_MAP_CENTER: &str = "WAYPOST_MAP_CENTER";
pub const ENV_MAP_ZOOM: &str = "WAYPOST_MAP_ZOOM";

const DEFAULT_COLLECTION: &str = "quests";
const DEFAULT_CENTER: LatLng = LatLng {
    lat: 48.8584,
    lng: 2.2945,
};
const DEFAULT_ZOOM: u8 = 8;

#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the external map rendering service.
    pub maps_api_key: String,
    /// API key for the remote document store.
    pub store_api_key: String,
    /// Name of the remote quest collection.
    pub collection: String,
    /// Initial map viewport center.
    pub map_center: LatLng,
    /// Initial map zoom level.
    pub map_zoom: u8,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            maps_api_key: require(ENV_MAPS_API_KEY)?,
            store_api_key: require(ENV_STORE_API_KEY)?,
            collection: optional(ENV_COLLECTION)
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            map_center: match optional(ENV_MAP_CENTER) {
                Some(raw) => parse_center(&raw)?,
                None => DEFAULT_CENTER,
            },
            map_zoom: match optional(ENV_MAP_ZOOM) {
                Some(raw) => parse_zoom(&raw)?,
                None => DEFAULT_ZOOM,
            },
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

/// Unset and empty are both treated as absent.
fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse `"lat,lng"` into a coordinate.
fn parse_center(raw: &str) -> Result<LatLng, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        name: ENV_MAP_CENTER,
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| invalid("expected \"lat,lng\""))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| invalid("latitude is not a number"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| invalid("longitude is not a number"))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(invalid("latitude out of range"));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(invalid("longitude out of range"));
    }
    Ok(LatLng::new(lat, lng))
}

fn parse_zoom(raw: &str) -> Result<u8, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name: ENV_MAP_ZOOM,
        value: raw.to_string(),
        reason: "not an integer zoom level".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
