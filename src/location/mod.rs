//! Device location collaborator.
//!
//! The platform location service is reached through [`LocationProvider`]:
//! one permission prompt and one current-position request per discovery
//! cycle. [`FixedLocation`] serves a configured position, which is what the
//! command-line binary and most tests use.

use crate::domain::{FoodiePalError, LocationFix, Result};
use async_trait::async_trait;

/// Outcome of a foreground location permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Supplies the device's current position, subject to user permission.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Prompts for foreground location permission.
    async fn request_permission(&self) -> PermissionStatus;

    /// Requests a one-shot position fix.
    ///
    /// # Errors
    ///
    /// Returns [`FoodiePalError::Location`] when no fix can be produced
    /// (signal unavailable, provider disabled).
    async fn current_position(&self) -> Result<LocationFix>;
}

/// A location provider answering with a preconfigured position.
///
/// With no position configured, permission is still granted but every fix
/// request fails, which mirrors a device with location services switched off.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLocation {
    permission: PermissionStatus,
    position: Option<(f64, f64)>,
}

impl FixedLocation {
    /// Grants permission and always reports `(latitude, longitude)`.
    #[must_use]
    pub const fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            position: Some((latitude, longitude)),
        }
    }

    /// Denies permission.
    #[must_use]
    pub const fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            position: None,
        }
    }

    /// Grants permission but never produces a fix.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            position: None,
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn request_permission(&self) -> PermissionStatus {
        tracing::debug!(status = ?self.permission, "location permission resolved");
        self.permission
    }

    async fn current_position(&self) -> Result<LocationFix> {
        self.position
            .map(|(latitude, longitude)| LocationFix::now(latitude, longitude))
            .ok_or_else(|| FoodiePalError::Location("no position available".to_string()))
    }
}
