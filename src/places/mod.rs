//! Nearby restaurant search against third-party places APIs.
//!
//! The contract is "coordinates in, normalized restaurants out". Each upstream
//! API is a [`PlacesAdapter`] that knows how to build its request and how to
//! map its response schema onto [`Restaurant`](crate::domain::Restaurant).
//! [`PlacesClient`] owns the HTTP client and runs exactly one request per
//! call, with no retries.
//!
//! # Modules
//!
//! - [`adapter`]: Adapter trait and shared response normalization
//! - [`geoapify`]: Geoapify Places API v2
//! - [`tomtom`]: TomTom Search API nearby search
//! - [`client`]: HTTP client implementing [`PlacesSearch`]
//!
//! # Failure Model
//!
//! - Network error, non-2xx status or undecodable body: [`FoodiePalError::Search`]
//!   or the wrapped transport error
//! - Missing or malformed results collection: empty result, not an error
//! - Malformed individual entries: skipped, remaining entries kept

pub mod adapter;
pub mod client;
pub mod geoapify;
pub mod tomtom;

pub use adapter::PlacesAdapter;
pub use client::PlacesClient;
pub use geoapify::Geoapify;
pub use tomtom::TomTom;

use crate::domain::{Coordinate, FoodiePalError, Restaurant, Result};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

/// Search radius around the fix, in meters.
pub const SEARCH_RADIUS_METERS: u32 = 1000;

/// Anything that can turn a coordinate into nearby restaurants.
///
/// Implemented by [`PlacesClient`]; tests substitute canned implementations.
#[async_trait]
pub trait PlacesSearch: Send + Sync {
    /// Returns restaurants near `at`, in the order the upstream returned them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn search_nearby(&self, at: Coordinate) -> Result<Vec<Restaurant>>;
}

/// Upstream places API to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacesProviderKind {
    #[default]
    Geoapify,
    TomTom,
}

impl PlacesProviderKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Geoapify => "geoapify",
            Self::TomTom => "tomtom",
        }
    }
}

impl fmt::Display for PlacesProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlacesProviderKind {
    type Err = FoodiePalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "geoapify" => Ok(Self::Geoapify),
            "tomtom" => Ok(Self::TomTom),
            other => Err(FoodiePalError::Config(format!(
                "unknown places provider: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_parses_case_insensitively() {
        assert_eq!("TomTom".parse::<PlacesProviderKind>().unwrap(), PlacesProviderKind::TomTom);
        assert_eq!(" geoapify ".parse::<PlacesProviderKind>().unwrap(), PlacesProviderKind::Geoapify);
        assert!("yelp".parse::<PlacesProviderKind>().is_err());
    }
}
