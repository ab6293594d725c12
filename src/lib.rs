//! FoodiePal: nearby restaurant discovery core.
//!
//! FoodiePal finds restaurants around the device and keeps a map and a list
//! of them in step:
//! - Permission → location fix → nearby search, with every failure ending in
//!   a usable, empty screen
//! - A places client with pluggable providers (Geoapify, TomTom)
//! - Selection coupling: picking a restaurant on the map or in the list
//!   moves the camera, opens the marker callout and scrolls the list
//! - "Return to my location"
//! - A persisted signed-in session gating the home screen

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Binary (main.rs)                                   │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Business logic
//! │  - Action dispatching (tokio runtime)               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Render        │   │ Places        │   │ Auth/Storage  │
//! │ (render/)     │   │ (places/)     │   │ (auth/,       │
//! │ - Map/list    │   │ - HTTP client │   │  storage/)    │
//! │   traits      │   │ - Geoapify    │   │ - Session     │
//! │ - Markers     │   │ - TomTom      │   │ - Firebase    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure, Location & Domain Layers           │
//! │  - Data directory (infrastructure/)                 │
//! │  - Location provider trait (location/)              │
//! │  - Restaurant, Region, User, errors (domain/)       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, rotating log file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`auth`]: Identity provider and persisted session
//! - [`domain`]: Core domain types (Restaurant, Region, User, errors)
//! - [`infrastructure`]: Data directory resolution
//! - [`location`]: Location provider abstraction
//! - [`observability`]: Tracing setup
//! - [`places`]: Nearby search client and provider adapters
//! - [`render`]: Renderer traits, view model and terminal renderers
//! - [`storage`]: Key-value persistence
//!
//! # Configuration
//!
//! ```toml
//! places_provider = "tomtom"
//! places_api_key = "..."
//! identity_api_key = "..."
//! trace_level = "debug"
//! latitude = 37.0
//! longitude = -122.0
//! ```
//!
//! Every key can also come from the environment as `FOODIEPAL_<KEY>`.
//!
//! # Examples
//!
//! ```rust
//! use foodiepal::{handle_event, Action, AppState, Event, User};
//!
//! let mut state = AppState::new(Some(User::new("uid", "me@example.com")));
//! let (_, actions) = handle_event(&mut state, &Event::Activate);
//! assert_eq!(actions, vec![Action::RequestPermission { generation: 1 }]);
//! ```

pub mod app;
pub mod auth;
pub mod domain;
pub mod infrastructure;
pub mod location;
pub mod observability;
pub mod places;
pub mod render;
pub mod storage;

pub use app::{handle_event, Action, AppState, Event, Runtime};
pub use domain::{Coordinate, FoodiePalError, LocationFix, Region, Restaurant, Result, User};
pub use places::PlacesProviderKind;

use auth::Session;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use storage::JsonKeyValueStore;

/// Environment variable prefix read by [`Config::from_env`].
pub const ENV_PREFIX: &str = "FOODIEPAL_";

/// Runtime configuration.
///
/// # Example
///
/// ```toml
/// places_provider = "geoapify"
/// places_api_key = "..."
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Which places API to search. Default: Geoapify
    pub places_provider: PlacesProviderKind,

    /// API key for the places provider. Required for searching.
    pub places_api_key: Option<String>,

    /// Overrides the provider's base URL.
    pub places_base_url: Option<String>,

    /// Firebase web API key. Required for sign-in and sign-up.
    pub identity_api_key: Option<String>,

    pub identity_base_url: Option<String>,

    /// Tracing level.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Where the session and log files live. See
    /// [`infrastructure::get_data_dir`] for the fallback.
    pub data_dir: Option<PathBuf>,

    /// Fixed device position used by the command-line binary.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// Unknown keys are ignored. Values that fail to parse fall back to
    /// their defaults, and empty strings count as unset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use foodiepal::{Config, PlacesProviderKind};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("places_provider".to_string(), "tomtom".to_string());
    /// map.insert("latitude".to_string(), "37.0".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.places_provider, PlacesProviderKind::TomTom);
    /// assert_eq!(config.latitude, Some(37.0));
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let number = |key: &str| text(key).and_then(|v| v.parse::<f64>().ok());

        let places_provider = text("places_provider")
            .and_then(|raw| {
                raw.parse::<PlacesProviderKind>()
                    .map_err(|e| tracing::warn!(error = %e, "falling back to default places provider"))
                    .ok()
            })
            .unwrap_or_default();

        Self {
            places_provider,
            places_api_key: text("places_api_key"),
            places_base_url: text("places_base_url"),
            identity_api_key: text("identity_api_key"),
            identity_base_url: text("identity_base_url"),
            trace_level: text("trace_level"),
            data_dir: text("data_dir").map(PathBuf::from),
            latitude: number("latitude"),
            longitude: number("longitude"),
        }
    }

    /// Reads `FOODIEPAL_*` environment variables.
    ///
    /// `FOODIEPAL_PLACES_API_KEY` maps to `places_api_key`, and so on.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let map: BTreeMap<String, String> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|k| (k.to_ascii_lowercase(), value))
            })
            .collect();
        Self::from_map(&map)
    }

    /// Loads a TOML file of top-level `key = value` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`FoodiePalError::Io`] if the file cannot be read and
    /// [`FoodiePalError::Config`] if it is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// # Errors
    ///
    /// Returns [`FoodiePalError::Config`] if `contents` is not valid TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let table: toml::Table = contents
            .parse()
            .map_err(|e: toml::de::Error| FoodiePalError::Config(e.to_string()))?;

        let map: BTreeMap<String, String> = table
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    toml::Value::String(s) => s,
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Float(f) => f.to_string(),
                    toml::Value::Boolean(b) => b.to_string(),
                    other => {
                        tracing::warn!(key = %key, kind = other.type_str(), "ignoring non-scalar config value");
                        return None;
                    }
                };
                Some((key, text))
            })
            .collect();

        Ok(Self::from_map(&map))
    }
}

/// Opens the on-disk session store and restores the signed-in user.
///
/// A store file that is not valid JSON is moved aside and the session starts
/// signed out.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the store
/// file cannot be read or moved.
pub fn restore_session(config: &Config) -> Result<Session<JsonKeyValueStore>> {
    let path = infrastructure::session_file(config);
    let store = JsonKeyValueStore::open_or_reset(path)?;
    Ok(Session::restore(store))
}
