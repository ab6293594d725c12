//! Provider adapter trait and shared response normalization.

use crate::domain::{Coordinate, Restaurant};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Maps one places API onto the normalized [`Restaurant`] shape.
///
/// Adapters are pure: they build a request and interpret a decoded JSON body,
/// leaving transport and status handling to [`PlacesClient`](super::PlacesClient).
pub trait PlacesAdapter: Send + Sync {
    /// Short provider name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Builds the nearby-search request for `at`.
    fn request(&self, http: &reqwest::Client, at: Coordinate) -> reqwest::RequestBuilder;

    /// Maps a decoded response body onto restaurants.
    ///
    /// Never fails: a missing results collection yields an empty list and
    /// malformed entries are skipped.
    fn normalize(&self, body: &Value) -> Vec<Restaurant>;
}

/// Deserializes each element of `body[field]` as `T` and maps it with `into_restaurant`.
///
/// Elements that fail to deserialize, or that `into_restaurant` rejects, are
/// skipped with a debug log. A missing or non-array `field` yields an empty list.
pub(crate) fn normalize_entries<T, F>(
    provider: &'static str,
    body: &Value,
    field: &str,
    into_restaurant: F,
) -> Vec<Restaurant>
where
    T: DeserializeOwned,
    F: Fn(T) -> Option<Restaurant>,
{
    let Some(entries) = body.get(field).and_then(Value::as_array) else {
        tracing::debug!(provider, field, "response has no results collection");
        return Vec::new();
    };

    let mut restaurants = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let parsed = match T::deserialize(entry) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(provider, index, error = %e, "skipping malformed entry");
                continue;
            }
        };

        match into_restaurant(parsed) {
            Some(restaurant) if is_usable(&restaurant) => restaurants.push(restaurant),
            _ => {
                tracing::debug!(provider, index, "skipping entry without id, name or valid position");
            }
        }
    }

    tracing::debug!(
        provider,
        received = entries.len(),
        kept = restaurants.len(),
        "normalized search response"
    );

    restaurants
}

fn is_usable(restaurant: &Restaurant) -> bool {
    !restaurant.id.is_empty() && !restaurant.name.is_empty() && restaurant.coordinate().is_valid()
}
