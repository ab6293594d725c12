//! Error types for FoodiePal.
//!
//! This module defines the centralized error type [`FoodiePalError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for FoodiePal operations.
///
/// Consolidates every failure the crate can surface: HTTP and decode failures
/// from the places and identity APIs, local persistence failures, and
/// configuration problems. Wrapped errors convert automatically via `#[from]`.
///
/// # Examples
///
/// ```
/// use foodiepal::FoodiePalError;
///
/// fn validate_key(key: &str) -> Result<(), FoodiePalError> {
///     if key.is_empty() {
///         return Err(FoodiePalError::Config("places_api_key is empty".to_string()));
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Error)]
pub enum FoodiePalError {
    /// Local persistence failed.
    ///
    /// Occurs when reading or writing the key-value store backing the session.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An HTTP request could not be sent or its body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The identity provider rejected a request.
    ///
    /// The string carries the provider's error code (e.g. `EMAIL_NOT_FOUND`).
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The device location could not be determined.
    #[error("Location error: {0}")]
    Location(String),

    /// The places API answered with something other than a usable result.
    #[error("Search error: {0}")]
    Search(String),
}

/// A specialized `Result` type for FoodiePal operations.
pub type Result<T> = std::result::Result<T, FoodiePalError>;
