//! Home screen state and view model computation.
//!
//! [`AppState`] is the single source of truth for the discovery screen: who
//! is signed in, where the discovery cycle stands, which restaurant is
//! selected, and where the camera was last sent. Renderers only ever see the
//! [`HomeViewModel`] computed from it.

use super::discovery::{DiscoveryFailure, DiscoveryOutcome, DiscoveryState};
use super::selection::SelectionSynchronizer;
use crate::domain::{Region, Restaurant, User};
use crate::render::markers::{should_show_label, should_show_marker, Importance};
use crate::render::viewmodel::{CardView, HomeViewModel, MapView, MarkerView, Notice, ScreenStatus};

/// Central home screen state.
///
/// Mutated only by the event handler. The user is passed in explicitly when
/// the screen is built rather than looked up from ambient state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Signed-in user, if any. Discovery refuses to start without one.
    pub user: Option<User>,

    /// Discovery controller state: phase, fix, restaurants.
    pub discovery: DiscoveryState,

    /// Selected restaurant id.
    pub selection: SelectionSynchronizer,

    /// Last region the camera was sent to.
    pub camera: Option<Region>,

    /// Set when activation was attempted with no user.
    pub sign_in_required: bool,
}

impl AppState {
    /// Creates the home screen state for `user`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use foodiepal::app::AppState;
    /// use foodiepal::domain::User;
    ///
    /// let state = AppState::new(Some(User::new("uid", "me@example.com")));
    /// assert!(state.restaurants().is_empty());
    /// ```
    #[must_use]
    pub const fn new(user: Option<User>) -> Self {
        Self {
            user,
            discovery: DiscoveryState::new(),
            selection: SelectionSynchronizer::new(),
            camera: None,
            sign_in_required: false,
        }
    }

    #[must_use]
    pub fn restaurants(&self) -> &[Restaurant] {
        self.discovery.restaurants()
    }

    /// Returns the selected restaurant, if it is in the current set.
    #[must_use]
    pub fn selected_restaurant(&self) -> Option<&Restaurant> {
        let id = self.selection.selected_id()?;
        self.restaurants().iter().find(|r| r.id == id)
    }

    /// Computes the renderable screen snapshot.
    ///
    /// Marker visibility is evaluated at the zoom of the last camera target,
    /// or of the initial region if the camera has not moved yet.
    #[must_use]
    pub fn compute_viewmodel(&self) -> HomeViewModel {
        let fix = self.discovery.fix();
        let initial_region = Region::initial(fix);
        let zoom_level = self.camera.unwrap_or(initial_region).zoom_level();

        let markers = self
            .restaurants()
            .iter()
            .map(|restaurant| {
                let importance = Importance::default();
                MarkerView {
                    id: restaurant.id.clone(),
                    title: restaurant.name.clone(),
                    description: restaurant.address.clone(),
                    coordinate: restaurant.coordinate(),
                    is_selected: self.selection.is_selected(&restaurant.id),
                    importance,
                    visible: should_show_marker(zoom_level, importance),
                    show_label: should_show_label(zoom_level),
                }
            })
            .collect();

        let list = self
            .restaurants()
            .iter()
            .map(|restaurant| CardView {
                id: restaurant.id.clone(),
                name: restaurant.name.clone(),
                address: restaurant.address.clone(),
                is_selected: self.selection.is_selected(&restaurant.id),
            })
            .collect();

        let status = self.compute_status();
        let notice = if status == ScreenStatus::ReadyEmpty {
            self.compute_notice()
        } else {
            None
        };

        HomeViewModel {
            status,
            notice,
            map: MapView {
                initial_region,
                user_location: fix.map(|f| f.coordinate),
                zoom_level,
                markers,
            },
            list,
        }
    }

    fn compute_status(&self) -> ScreenStatus {
        if self.user.is_none() {
            return ScreenStatus::SignInRequired;
        }

        let phase = self.discovery.phase();
        if !phase.is_terminal() {
            return ScreenStatus::Loading;
        }

        if self.restaurants().is_empty() {
            ScreenStatus::ReadyEmpty
        } else {
            ScreenStatus::Ready
        }
    }

    fn compute_notice(&self) -> Option<Notice> {
        let (message, subtitle) = match self.discovery.outcome() {
            DiscoveryOutcome::Empty => (
                "No restaurants nearby",
                "Nothing to eat within a kilometer of you.",
            ),
            DiscoveryOutcome::Failed(DiscoveryFailure::PermissionDenied) => (
                "Location access is off",
                "Allow location access to find restaurants around you.",
            ),
            DiscoveryOutcome::Failed(DiscoveryFailure::FixUnavailable(_)) => (
                "Can't find your location",
                "Check that location services are on, then refresh.",
            ),
            DiscoveryOutcome::Failed(DiscoveryFailure::SearchFailed(_)) => (
                "Couldn't load restaurants",
                "Check your connection, then refresh.",
            ),
            DiscoveryOutcome::Pending | DiscoveryOutcome::Found(_) => return None,
        };

        Some(Notice {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, LocationFix};
    use crate::location::PermissionStatus;

    fn ready_with(restaurants: Vec<Restaurant>) -> AppState {
        let mut state = AppState::new(Some(User::new("uid", "me@example.com")));
        let g = state.discovery.begin();
        state.discovery.permission_resolved(g, PermissionStatus::Granted);
        state.discovery.fix_resolved(g, Ok(LocationFix::now(37.0, -122.0)));
        state.discovery.search_resolved(g, Ok(restaurants));
        state
    }

    #[test]
    fn signed_out_state_asks_for_sign_in() {
        let view = AppState::new(None).compute_viewmodel();
        assert_eq!(view.status, ScreenStatus::SignInRequired);
        assert_eq!(view.map.initial_region, Region::initial(None));
    }

    #[test]
    fn pending_cycle_is_loading() {
        let mut state = AppState::new(Some(User::new("uid", "me@example.com")));
        state.discovery.begin();
        let view = state.compute_viewmodel();
        assert_eq!(view.status, ScreenStatus::Loading);
        assert!(view.notice.is_none());
    }

    #[test]
    fn markers_and_cards_follow_selection() {
        let mut state = ready_with(vec![
            Restaurant::new("a", "Cafe A", 37.001, -122.001, Some("1 Main St".into())),
            Restaurant::new("b", "Diner B", 36.999, -121.999, None),
        ]);
        state.selection.select("b", state.discovery.restaurants());

        let view = state.compute_viewmodel();
        assert_eq!(view.status, ScreenStatus::Ready);
        assert_eq!(view.map.user_location, Some(Coordinate::new(37.0, -122.0)));
        assert_eq!(view.map.markers.len(), 2);
        assert!(view.map.markers[1].is_selected);
        assert_eq!(view.list[0].address.as_deref(), Some("1 Main St"));
        assert!(!view.list[0].is_selected);
        assert!(view.list[1].is_selected);
        assert_eq!(state.selected_restaurant().map(|r| r.name.as_str()), Some("Diner B"));
    }

    #[test]
    fn close_up_camera_shows_every_marker_with_labels() {
        let mut state = ready_with(vec![Restaurant::new("a", "Cafe A", 37.0, -122.0, None)]);
        state.camera = Some(Region::close_up(Coordinate::new(37.0, -122.0)));

        let marker = &state.compute_viewmodel().map.markers[0];
        assert!(marker.visible);
        assert!(marker.show_label);
    }

    #[test]
    fn empty_result_gets_a_notice() {
        let view = ready_with(vec![]).compute_viewmodel();
        assert_eq!(view.status, ScreenStatus::ReadyEmpty);
        assert_eq!(
            view.notice.map(|n| n.message),
            Some("No restaurants nearby".to_string())
        );
    }
}
