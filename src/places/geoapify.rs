//! Geoapify Places API v2 adapter.
//!
//! Results arrive as a GeoJSON `FeatureCollection`. Coordinates are
//! `[longitude, latitude]`, so the order flips when normalizing.

use super::adapter::{normalize_entries, PlacesAdapter};
use super::SEARCH_RADIUS_METERS;
use crate::domain::{Coordinate, Restaurant};
use serde::Deserialize;
use serde_json::Value;

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.geoapify.com";

/// Category filter restricting results to food and drink venues.
const CATEGORY: &str = "catering";

/// Maximum number of features requested.
const RESULT_LIMIT: u32 = 40;

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Properties,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Properties {
    place_id: String,
    name: Option<String>,
    address_line2: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<f64>,
}

impl Feature {
    fn into_restaurant(self) -> Option<Restaurant> {
        let [longitude, latitude, ..] = self.geometry.coordinates.as_slice() else {
            return None;
        };

        Some(Restaurant {
            id: self.properties.place_id,
            name: self.properties.name?,
            latitude: *latitude,
            longitude: *longitude,
            address: self.properties.address_line2,
        })
    }
}

/// Geoapify adapter.
#[derive(Debug, Clone)]
pub struct Geoapify {
    base_url: String,
    api_key: String,
}

impl Geoapify {
    /// Creates an adapter for `base_url` (trailing slash tolerated).
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

impl PlacesAdapter for Geoapify {
    fn name(&self) -> &'static str {
        "geoapify"
    }

    fn request(&self, http: &reqwest::Client, at: Coordinate) -> reqwest::RequestBuilder {
        let Coordinate {
            latitude,
            longitude,
        } = at;

        http.get(format!("{}/v2/places", self.base_url)).query(&[
            ("categories", CATEGORY.to_string()),
            (
                "filter",
                format!("circle:{longitude},{latitude},{SEARCH_RADIUS_METERS}"),
            ),
            ("limit", RESULT_LIMIT.to_string()),
            ("bias", format!("proximity:{longitude},{latitude}")),
            ("apiKey", self.api_key.clone()),
        ])
    }

    fn normalize(&self, body: &Value) -> Vec<Restaurant> {
        normalize_entries(self.name(), body, "features", Feature::into_restaurant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn adapter() -> Geoapify {
        Geoapify::new("http://localhost/", "key")
    }

    #[test]
    fn maps_features_in_order() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "place_id": "p1", "name": "Cafe A", "address_line2": "1 Main St" },
                    "geometry": { "type": "Point", "coordinates": [-122.001, 37.001] }
                },
                {
                    "type": "Feature",
                    "properties": { "place_id": "p2", "name": "Diner B" },
                    "geometry": { "type": "Point", "coordinates": [-121.999, 36.999] }
                }
            ]
        });

        let restaurants = adapter().normalize(&body);

        assert_eq!(restaurants.len(), 2);
        assert_eq!(restaurants[0].id, "p1");
        assert_eq!(restaurants[0].latitude, 37.001);
        assert_eq!(restaurants[0].longitude, -122.001);
        assert_eq!(restaurants[0].address.as_deref(), Some("1 Main St"));
        assert_eq!(restaurants[1].id, "p2");
        assert!(restaurants[1].address.is_none());
    }

    #[test]
    fn skips_unnamed_and_pointless_features() {
        let body = json!({
            "features": [
                { "properties": { "place_id": "nameless" }, "geometry": { "coordinates": [0.0, 0.0] } },
                { "properties": { "place_id": "nowhere", "name": "Ghost" }, "geometry": { "coordinates": [] } },
                { "properties": { "name": "No id" }, "geometry": { "coordinates": [0.0, 0.0] } },
                { "properties": { "place_id": "ok", "name": "Kept" }, "geometry": { "coordinates": [1.0, 2.0] } }
            ]
        });

        let restaurants = adapter().normalize(&body);

        assert_eq!(restaurants.len(), 1);
        assert_eq!(restaurants[0].id, "ok");
        assert_eq!(restaurants[0].latitude, 2.0);
    }

    #[test]
    fn missing_features_is_empty() {
        assert!(adapter().normalize(&json!({ "error": "nope" })).is_empty());
        assert!(adapter().normalize(&json!({ "features": "not a list" })).is_empty());
        assert!(adapter().normalize(&json!({ "features": [] })).is_empty());
    }

    #[test]
    fn request_carries_circle_filter_and_key() {
        let http = reqwest::Client::new();
        let request = adapter()
            .request(&http, Coordinate::new(37.5, -122.25))
            .build()
            .unwrap();

        let url = request.url();
        assert_eq!(url.path(), "/v2/places");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("categories".into(), "catering".into())));
        assert!(pairs.contains(&("filter".into(), "circle:-122.25,37.5,1000".into())));
        assert!(pairs.contains(&("limit".into(), "40".into())));
        assert!(pairs.contains(&("bias".into(), "proximity:-122.25,37.5".into())));
        assert!(pairs.contains(&("apiKey".into(), "key".into())));
    }
}
