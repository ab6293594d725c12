//! Discovery cycle state machine.
//!
//! One cycle runs permission → fix → search, strictly in that order. Every
//! cycle gets a fresh generation number; results tagged with any other
//! generation are stale and ignored, which is how a refresh supersedes an
//! in-flight cycle and how teardown silences late results.
//!
//! # Phases
//!
//! ```text
//! Idle → PermissionRequested → Denied
//!                            → Granted → LocatingFix → FixFailed
//!                                                    → FixAcquired → SearchingNearby → SearchFailed
//!                                                                                    → SearchSucceeded
//! ```
//!
//! Every failure edge ends in the same user-visible state as an empty
//! search; the distinct [`DiscoveryFailure`] is kept for logs and for the
//! optional notice.

use crate::domain::{Coordinate, LocationFix, Restaurant};
use crate::location::PermissionStatus;

/// Where the current discovery cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryPhase {
    /// No cycle has started, or the screen was torn down.
    Idle,
    PermissionRequested,
    Denied,
    Granted,
    LocatingFix,
    FixFailed,
    FixAcquired,
    SearchingNearby,
    SearchFailed,
    SearchSucceeded,
}

impl DiscoveryPhase {
    /// Returns `true` for phases that end a cycle.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Denied | Self::FixFailed | Self::SearchFailed | Self::SearchSucceeded
        )
    }

    /// Returns `true` while a cycle is waiting on a collaborator.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(
            self,
            Self::PermissionRequested
                | Self::Granted
                | Self::LocatingFix
                | Self::FixAcquired
                | Self::SearchingNearby
        )
    }
}

/// Why a cycle ended without restaurants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryFailure {
    PermissionDenied,
    FixUnavailable(String),
    SearchFailed(String),
}

impl std::fmt::Display for DiscoveryFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => f.write_str("location permission denied"),
            Self::FixUnavailable(reason) => write!(f, "location unavailable: {reason}"),
            Self::SearchFailed(reason) => write!(f, "nearby search failed: {reason}"),
        }
    }
}

/// Tagged result of the latest cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryOutcome<'a> {
    /// The cycle has not finished.
    Pending,
    /// The search returned this many restaurants.
    Found(usize),
    /// The search succeeded with zero matches. Not an error.
    Empty,
    Failed(&'a DiscoveryFailure),
}

/// The next collaborator call a transition asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NextStep {
    RequestFix,
    SearchNearby(Coordinate),
}

/// Discovery controller state.
///
/// Owns the location fix and the restaurant set. Transitions are pure; the
/// runtime performs the collaborator calls they ask for.
#[derive(Debug, Clone)]
pub struct DiscoveryState {
    phase: DiscoveryPhase,
    generation: u64,
    fix: Option<LocationFix>,
    restaurants: Vec<Restaurant>,
    failure: Option<DiscoveryFailure>,
}

impl Default for DiscoveryState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscoveryState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: DiscoveryPhase::Idle,
            generation: 0,
            fix: None,
            restaurants: Vec::new(),
            failure: None,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> DiscoveryPhase {
        self.phase
    }

    /// Generation of the current cycle.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn fix(&self) -> Option<&LocationFix> {
        self.fix.as_ref()
    }

    /// Restaurants from the latest successful search, in upstream order.
    #[must_use]
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    #[must_use]
    pub const fn failure(&self) -> Option<&DiscoveryFailure> {
        self.failure.as_ref()
    }

    #[must_use]
    pub fn outcome(&self) -> DiscoveryOutcome<'_> {
        if let Some(failure) = &self.failure {
            return DiscoveryOutcome::Failed(failure);
        }
        match self.phase {
            DiscoveryPhase::SearchSucceeded if self.restaurants.is_empty() => DiscoveryOutcome::Empty,
            DiscoveryPhase::SearchSucceeded => DiscoveryOutcome::Found(self.restaurants.len()),
            _ => DiscoveryOutcome::Pending,
        }
    }

    /// Starts a new cycle and returns its generation.
    ///
    /// The previous restaurant set is discarded. The previous fix is kept
    /// until a new one arrives so "return to my location" keeps working.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.restaurants.clear();
        self.failure = None;
        self.advance(DiscoveryPhase::PermissionRequested);
        self.generation
    }

    /// Abandons the current cycle, finished or not, and returns to `Idle`.
    ///
    /// Bumps the generation so pending results are recognized as stale. The
    /// last restaurant set stays readable until the next cycle begins.
    pub fn abandon(&mut self) {
        self.generation += 1;
        self.advance(DiscoveryPhase::Idle);
    }

    /// Applies a permission outcome. Returns the next step, if any.
    pub fn permission_resolved(&mut self, generation: u64, status: PermissionStatus) -> Option<NextStep> {
        if !self.accepts(generation, DiscoveryPhase::PermissionRequested) {
            return None;
        }

        match status {
            PermissionStatus::Granted => {
                self.advance(DiscoveryPhase::Granted);
                self.advance(DiscoveryPhase::LocatingFix);
                Some(NextStep::RequestFix)
            }
            PermissionStatus::Denied => {
                tracing::warn!("location permission denied");
                self.fail(DiscoveryPhase::Denied, DiscoveryFailure::PermissionDenied);
                None
            }
        }
    }

    /// Applies a fix outcome. Returns the next step, if any.
    pub fn fix_resolved(
        &mut self,
        generation: u64,
        result: Result<LocationFix, String>,
    ) -> Option<NextStep> {
        if !self.accepts(generation, DiscoveryPhase::LocatingFix) {
            return None;
        }

        match result {
            Ok(fix) => {
                tracing::debug!(
                    latitude = fix.latitude(),
                    longitude = fix.longitude(),
                    "location fix acquired"
                );
                self.fix = Some(fix);
                self.restaurants.clear();
                self.advance(DiscoveryPhase::FixAcquired);
                self.advance(DiscoveryPhase::SearchingNearby);
                Some(NextStep::SearchNearby(fix.coordinate))
            }
            Err(reason) => {
                tracing::warn!(reason = %reason, "location fix failed");
                self.fail(DiscoveryPhase::FixFailed, DiscoveryFailure::FixUnavailable(reason));
                None
            }
        }
    }

    /// Applies a search outcome. Returns `true` if it was accepted.
    pub fn search_resolved(
        &mut self,
        generation: u64,
        result: Result<Vec<Restaurant>, String>,
    ) -> bool {
        if !self.accepts(generation, DiscoveryPhase::SearchingNearby) {
            return false;
        }

        match result {
            Ok(restaurants) => {
                tracing::info!(count = restaurants.len(), "nearby restaurants loaded");
                self.restaurants = restaurants;
                self.advance(DiscoveryPhase::SearchSucceeded);
            }
            Err(reason) => {
                tracing::warn!(reason = %reason, "nearby search failed");
                self.fail(DiscoveryPhase::SearchFailed, DiscoveryFailure::SearchFailed(reason));
            }
        }
        true
    }

    fn accepts(&self, generation: u64, expected: DiscoveryPhase) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "dropping result from superseded cycle"
            );
            return false;
        }
        if self.phase != expected {
            tracing::debug!(phase = ?self.phase, expected = ?expected, "dropping out-of-order result");
            return false;
        }
        true
    }

    fn fail(&mut self, phase: DiscoveryPhase, failure: DiscoveryFailure) {
        self.restaurants.clear();
        self.failure = Some(failure);
        self.advance(phase);
    }

    fn advance(&mut self, next: DiscoveryPhase) {
        tracing::debug!(from = ?self.phase, to = ?next, generation = self.generation, "discovery phase");
        self.phase = next;
    }
}
