//! TomTom Search API nearby-search adapter.

use super::adapter::{normalize_entries, PlacesAdapter};
use super::SEARCH_RADIUS_METERS;
use crate::domain::{Coordinate, Restaurant};
use serde::Deserialize;
use serde_json::Value;

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.tomtom.com";

/// TomTom category set for restaurants.
const CATEGORY_SET: &str = "7315";

/// Maximum number of results requested.
const RESULT_LIMIT: u32 = 20;

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: String,
    poi: Poi,
    position: Position,
    #[serde(default)]
    address: Option<Address>,
}

#[derive(Debug, Deserialize)]
struct Poi {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Position {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Address {
    freeform_address: Option<String>,
}

impl SearchResult {
    fn into_restaurant(self) -> Option<Restaurant> {
        Some(Restaurant {
            id: self.id,
            name: self.poi.name,
            latitude: self.position.lat,
            longitude: self.position.lon,
            address: self.address.and_then(|a| a.freeform_address),
        })
    }
}

/// TomTom adapter.
#[derive(Debug, Clone)]
pub struct TomTom {
    base_url: String,
    api_key: String,
}

impl TomTom {
    /// Creates an adapter for `base_url` (trailing slash tolerated).
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

impl PlacesAdapter for TomTom {
    fn name(&self) -> &'static str {
        "tomtom"
    }

    fn request(&self, http: &reqwest::Client, at: Coordinate) -> reqwest::RequestBuilder {
        http.get(format!("{}/search/2/nearbySearch/.json", self.base_url))
            .query(&[
                ("key", self.api_key.clone()),
                ("lat", at.latitude.to_string()),
                ("lon", at.longitude.to_string()),
                ("radius", SEARCH_RADIUS_METERS.to_string()),
                ("limit", RESULT_LIMIT.to_string()),
                ("categorySet", CATEGORY_SET.to_string()),
            ])
    }

    fn normalize(&self, body: &Value) -> Vec<Restaurant> {
        normalize_entries(self.name(), body, "results", SearchResult::into_restaurant)
    }
}
