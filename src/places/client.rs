//! HTTP client running one nearby search per call.

use super::adapter::PlacesAdapter;
use super::{geoapify, tomtom, Geoapify, PlacesProviderKind, PlacesSearch, TomTom};
use crate::domain::{Coordinate, FoodiePalError, Restaurant, Result};
use crate::Config;
use async_trait::async_trait;
use std::time::Duration;
use tracing::Instrument;

/// Upper bound on a single search request, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Places search client bound to one provider adapter.
///
/// # Examples
///
/// ```no_run
/// use foodiepal::places::{Geoapify, PlacesClient, PlacesSearch};
/// use foodiepal::domain::Coordinate;
///
/// # async fn run() -> foodiepal::Result<()> {
/// let client = PlacesClient::new(Geoapify::new("https://api.geoapify.com", "KEY"))?;
/// let restaurants = client.search_nearby(Coordinate::new(37.0, -122.0)).await?;
/// # Ok(())
/// # }
/// ```
pub struct PlacesClient {
    http: reqwest::Client,
    adapter: Box<dyn PlacesAdapter>,
}

impl PlacesClient {
    /// Creates a client for `adapter` with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed (TLS backend
    /// initialization failure).
    pub fn new(adapter: impl PlacesAdapter + 'static) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            adapter: Box::new(adapter),
        })
    }

    /// Creates a client for the provider selected in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FoodiePalError::Config`] if no places API key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .places_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| FoodiePalError::Config("places_api_key is not set".to_string()))?;

        match config.places_provider {
            PlacesProviderKind::Geoapify => {
                let base = config
                    .places_base_url
                    .as_deref()
                    .unwrap_or(geoapify::DEFAULT_BASE_URL);
                Self::new(Geoapify::new(base, api_key))
            }
            PlacesProviderKind::TomTom => {
                let base = config
                    .places_base_url
                    .as_deref()
                    .unwrap_or(tomtom::DEFAULT_BASE_URL);
                Self::new(TomTom::new(base, api_key))
            }
        }
    }

    /// Name of the provider this client talks to.
    #[must_use]
    pub fn provider(&self) -> &'static str {
        self.adapter.name()
    }
}

impl std::fmt::Debug for PlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesClient")
            .field("provider", &self.adapter.name())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PlacesSearch for PlacesClient {
    async fn search_nearby(&self, at: Coordinate) -> Result<Vec<Restaurant>> {
        let provider = self.adapter.name();
        let span = tracing::debug_span!(
            "search_nearby",
            provider,
            latitude = at.latitude,
            longitude = at.longitude
        );

        async move {
            let response = self.adapter.request(&self.http, at).send().await?;
            let status = response.status();

            if !status.is_success() {
                tracing::debug!(status = %status, "search request rejected");
                return Err(FoodiePalError::Search(format!(
                    "{provider} answered {status}"
                )));
            }

            let bytes = response.bytes().await?;
            let body: serde_json::Value = serde_json::from_slice(&bytes)?;

            Ok(self.adapter.normalize(&body))
        }
        .instrument(span)
        .await
    }
}
