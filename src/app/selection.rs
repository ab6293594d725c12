//! Map/list selection coupling.
//!
//! Selecting a restaurant anywhere (a marker tap, a card's "view on map")
//! moves the map camera onto it, opens its callout once the camera has
//! arrived, and scrolls the list so its card is centered.

use super::actions::Action;
use crate::domain::{Region, Restaurant};
use std::time::Duration;

/// Duration of the camera animation, also the callout delay.
pub const CAMERA_ANIMATION: Duration = Duration::from_millis(1000);

/// Delay before a failed scroll is retried.
pub const SCROLL_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Viewport position that centers the scrolled-to card.
pub const CENTERED: f32 = 0.5;

/// Scroll attempts per selection, the first included.
const MAX_SCROLL_ATTEMPTS: u8 = 2;

/// Holds at most one selected restaurant id.
///
/// The id is only ever resolved against the restaurant set passed in by the
/// caller, so a set replaced underneath a stale selection is harmless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSynchronizer {
    selected: Option<String>,
}

impl SelectionSynchronizer {
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: None }
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Returns `true` if `id` is the current selection.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Selects `id` within `restaurants` and returns the renderer commands.
    ///
    /// No-op (empty actions, selection untouched) if `id` is not in the set.
    pub fn select(&mut self, id: &str, restaurants: &[Restaurant]) -> Vec<Action> {
        let Some((index, restaurant)) = restaurants.iter().enumerate().find(|(_, r)| r.id == id) else {
            tracing::debug!(restaurant_id = id, "selection ignored, id not in current results");
            return vec![];
        };

        tracing::debug!(restaurant_id = id, index, name = %restaurant.name, "restaurant selected");
        self.selected = Some(restaurant.id.clone());

        vec![
            Action::AnimateCamera {
                region: Region::close_up(restaurant.coordinate()),
                duration: CAMERA_ANIMATION,
            },
            Action::ScheduleCallout {
                id: restaurant.id.clone(),
                after: CAMERA_ANIMATION,
            },
            Action::ScrollToIndex {
                index,
                view_position: CENTERED,
                attempt: 1,
            },
        ]
    }

    /// Clears the selection. Returns `true` if something was selected.
    pub fn clear(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Handles the callout timer firing for `id`.
    ///
    /// The callout only opens if `id` is still the selection and still has a
    /// marker in `restaurants`.
    #[must_use]
    pub fn callout_due(&self, id: &str, restaurants: &[Restaurant]) -> Vec<Action> {
        if !self.is_selected(id) {
            tracing::debug!(restaurant_id = id, "selection moved on, skipping callout");
            return vec![];
        }
        if !restaurants.iter().any(|r| r.id == id) {
            tracing::debug!(restaurant_id = id, "restaurant left the result set, skipping callout");
            return vec![];
        }
        vec![Action::ShowCallout { id: id.to_string() }]
    }

    /// Handles a failed scroll: one delayed retry, then give up.
    #[must_use]
    pub fn scroll_failed(&self, index: usize, attempt: u8, reason: &str) -> Vec<Action> {
        if attempt >= MAX_SCROLL_ATTEMPTS {
            tracing::debug!(index, attempt, reason, "scroll retry failed, giving up");
            return vec![];
        }

        tracing::debug!(index, attempt, reason, "scroll failed, retrying");
        vec![Action::ScheduleScrollRetry {
            index,
            after: SCROLL_RETRY_DELAY,
            attempt: attempt + 1,
        }]
    }
}
