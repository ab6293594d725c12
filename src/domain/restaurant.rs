//! Restaurant, coordinate and camera region models.
//!
//! A [`Restaurant`] is the normalized shape every places provider is mapped
//! into. The set of restaurants is replaced wholesale after each search, so
//! nothing here tracks history or identity beyond the provider's `id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latitude/longitude delta used for close-up camera moves.
pub const CLOSE_UP_DELTA: f64 = 0.01;

/// Fallback camera center when no location fix is available yet.
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    latitude: 37.788_25,
    longitude: -122.4324,
};

/// Fallback camera span when no location fix is available yet.
const DEFAULT_LATITUDE_DELTA: f64 = 0.0922;
const DEFAULT_LONGITUDE_DELTA: f64 = 0.0421;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` if both components are finite and within range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A normalized nearby-search result.
///
/// `id` is unique within one search response and is the key used for map
/// markers, list rows and cross-component selection. If a provider ever
/// returns duplicates, lookups resolve to the first match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
}

impl Restaurant {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        address: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            latitude,
            longitude,
            address,
        }
    }

    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// The device position returned by a location provider.
///
/// `acquired_at` is informational; nothing expires a fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub coordinate: Coordinate,
    pub acquired_at: DateTime<Utc>,
}

impl LocationFix {
    /// Creates a fix stamped with the current time.
    #[must_use]
    pub fn now(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinate: Coordinate::new(latitude, longitude),
            acquired_at: Utc::now(),
        }
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coordinate.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coordinate.longitude
    }
}

/// A camera target: center plus visible span in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    /// Region centered on `center` at close-up zoom.
    ///
    /// # Examples
    ///
    /// ```
    /// use foodiepal::domain::{Coordinate, Region, CLOSE_UP_DELTA};
    ///
    /// let region = Region::close_up(Coordinate::new(37.0, -122.0));
    /// assert_eq!(region.latitude_delta, CLOSE_UP_DELTA);
    /// ```
    #[must_use]
    pub const fn close_up(center: Coordinate) -> Self {
        Self {
            latitude: center.latitude,
            longitude: center.longitude,
            latitude_delta: CLOSE_UP_DELTA,
            longitude_delta: CLOSE_UP_DELTA,
        }
    }

    /// Region used when the map first appears.
    ///
    /// Centers on the fix when one exists, otherwise on [`DEFAULT_CENTER`].
    #[must_use]
    pub fn initial(fix: Option<&LocationFix>) -> Self {
        let center = fix.map_or(DEFAULT_CENTER, |f| f.coordinate);
        Self {
            latitude: center.latitude,
            longitude: center.longitude,
            latitude_delta: DEFAULT_LATITUDE_DELTA,
            longitude_delta: DEFAULT_LONGITUDE_DELTA,
        }
    }

    #[must_use]
    pub const fn center(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Approximate slippy-map zoom level for this region's longitude span.
    #[must_use]
    pub fn zoom_level(&self) -> f64 {
        if self.longitude_delta <= 0.0 {
            return 20.0;
        }
        (360.0 / self.longitude_delta).log2().clamp(0.0, 20.0)
    }
}
