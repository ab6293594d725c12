//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes screen lifecycle
//! events, user input and collaborator results, translating them into state
//! changes and action sequences.
//!
//! # Architecture
//!
//! 1. Events arrive from the UI or from runtime tasks
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` components
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Lifecycle**: `Activate`, `Refresh`, `Teardown`
//! - **Collaborator results**: `PermissionResolved`, `FixResolved`, `SearchResolved`
//! - **Selection**: `SelectRestaurant`, `ClearSelection`, `GoToMyLocation`
//! - **Timers and renderer feedback**: `CalloutDue`, `ScrollFailed`, `ScrollRetryDue`
//!
//! # Example
//!
//! ```rust
//! use foodiepal::app::{handle_event, Action, AppState, Event};
//! use foodiepal::domain::User;
//!
//! let mut state = AppState::new(Some(User::new("uid", "me@example.com")));
//! let (render, actions) = handle_event(&mut state, &Event::Activate);
//! assert!(render);
//! assert_eq!(actions, vec![Action::RequestPermission { generation: 1 }]);
//! ```

use super::discovery::NextStep;
use super::selection::{CAMERA_ANIMATION, CENTERED};
use crate::app::{Action, AppState};
use crate::domain::{LocationFix, Region, Restaurant};
use crate::location::PermissionStatus;

/// Events triggered by the screen, the user, runtime tasks or renderers.
///
/// Collaborator results carry errors as strings so events stay cloneable and
/// comparable.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The home screen became active. Starts the first discovery cycle.
    Activate,
    /// The user asked for fresh results. Restarts discovery, cancelling any
    /// cycle in flight.
    Refresh,
    /// The home screen is going away. Cancels everything pending.
    Teardown,

    /// The permission prompt was answered.
    PermissionResolved {
        generation: u64,
        status: PermissionStatus,
    },
    /// The location fix request finished.
    FixResolved {
        generation: u64,
        result: Result<LocationFix, String>,
    },
    /// The nearby search finished.
    SearchResolved {
        generation: u64,
        result: Result<Vec<Restaurant>, String>,
    },

    /// A marker was tapped or a card's "view on map" was pressed.
    SelectRestaurant { id: String },
    /// Empty map space was tapped.
    ClearSelection,
    /// The "return to my location" button was pressed.
    GoToMyLocation,

    /// The camera animation for a selection has had time to finish.
    CalloutDue { id: String },
    /// The list refused a scroll.
    ScrollFailed {
        index: usize,
        attempt: u8,
        reason: String,
    },
    /// The retry delay for a failed scroll elapsed.
    ScrollRetryDue { index: usize, attempt: u8 },
}

/// Processes an event, mutates state, and returns `(needs_render, actions)`.
///
/// Never fails: every collaborator failure is folded into discovery state.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Activate => {
            if state.user.is_none() {
                tracing::info!("no signed-in user, routing to sign-in");
                state.sign_in_required = true;
                return (true, vec![Action::RedirectToSignIn]);
            }
            if state.discovery.phase() != super::DiscoveryPhase::Idle {
                tracing::debug!(phase = ?state.discovery.phase(), "already active, ignoring");
                return (false, vec![]);
            }
            let generation = state.discovery.begin();
            (true, vec![Action::RequestPermission { generation }])
        }
        Event::Refresh => {
            if state.user.is_none() {
                state.sign_in_required = true;
                return (true, vec![Action::RedirectToSignIn]);
            }
            let restarting = state.discovery.phase().is_pending();
            let generation = state.discovery.begin();
            tracing::debug!(generation, restarting, "refreshing nearby restaurants");

            let mut actions = vec![];
            if restarting {
                actions.push(Action::CancelPending);
            }
            actions.push(Action::RequestPermission { generation });
            (true, actions)
        }
        Event::Teardown => {
            state.discovery.abandon();
            (false, vec![Action::CancelPending, Action::CancelTimers])
        }
        Event::PermissionResolved { generation, status } => {
            match state.discovery.permission_resolved(*generation, *status) {
                Some(NextStep::RequestFix) => (true, vec![Action::RequestFix { generation: *generation }]),
                Some(NextStep::SearchNearby(_)) => (true, vec![]),
                None => (state.discovery.generation() == *generation, vec![]),
            }
        }
        Event::FixResolved { generation, result } => {
            match state.discovery.fix_resolved(*generation, result.clone()) {
                Some(NextStep::SearchNearby(at)) => (
                    true,
                    vec![Action::SearchNearby {
                        generation: *generation,
                        at,
                    }],
                ),
                Some(NextStep::RequestFix) => (true, vec![]),
                None => (state.discovery.generation() == *generation, vec![]),
            }
        }
        Event::SearchResolved { generation, result } => {
            let accepted = state.discovery.search_resolved(*generation, result.clone());
            (accepted, vec![])
        }
        Event::SelectRestaurant { id } => {
            let actions = state.selection.select(id, state.discovery.restaurants());
            if actions.is_empty() {
                return (false, actions);
            }
            for action in &actions {
                if let Action::AnimateCamera { region, .. } = action {
                    state.camera = Some(*region);
                }
            }
            (true, actions)
        }
        Event::ClearSelection => (state.selection.clear(), vec![]),
        Event::GoToMyLocation => {
            let Some(fix) = state.discovery.fix() else {
                tracing::debug!("no location fix yet, ignoring");
                return (false, vec![]);
            };
            let region = Region::close_up(fix.coordinate);
            state.camera = Some(region);
            (
                true,
                vec![Action::AnimateCamera {
                    region,
                    duration: CAMERA_ANIMATION,
                }],
            )
        }
        Event::CalloutDue { id } => {
            let actions = state.selection.callout_due(id, state.discovery.restaurants());
            (false, actions)
        }
        Event::ScrollFailed {
            index,
            attempt,
            reason,
        } => (false, state.selection.scroll_failed(*index, *attempt, reason)),
        Event::ScrollRetryDue { index, attempt } => (
            false,
            vec![Action::ScrollToIndex {
                index: *index,
                view_position: CENTERED,
                attempt: *attempt,
            }],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DiscoveryPhase;
    use crate::domain::{Coordinate, User};

    fn signed_in() -> AppState {
        AppState::new(Some(User::new("uid", "me@example.com")))
    }

    fn two_restaurants() -> Vec<Restaurant> {
        vec![
            Restaurant::new("a", "Cafe A", 37.001, -122.001, None),
            Restaurant::new("b", "Diner B", 36.999, -121.999, None),
        ]
    }

    fn loaded() -> AppState {
        let mut state = signed_in();
        handle_event(&mut state, &Event::Activate);
        let generation = state.discovery.generation();
        handle_event(
            &mut state,
            &Event::PermissionResolved {
                generation,
                status: PermissionStatus::Granted,
            },
        );
        handle_event(
            &mut state,
            &Event::FixResolved {
                generation,
                result: Ok(LocationFix::now(37.0, -122.0)),
            },
        );
        handle_event(
            &mut state,
            &Event::SearchResolved {
                generation,
                result: Ok(two_restaurants()),
            },
        );
        state
    }

    #[test]
    fn activation_without_user_requires_sign_in() {
        let mut state = AppState::new(None);
        let (render, actions) = handle_event(&mut state, &Event::Activate);
        assert!(render);
        assert_eq!(actions, vec![Action::RedirectToSignIn]);
        assert!(state.sign_in_required);
        assert_eq!(state.discovery.phase(), DiscoveryPhase::Idle);
    }

    #[test]
    fn activation_prompts_once() {
        let mut state = signed_in();
        let (_, first) = handle_event(&mut state, &Event::Activate);
        let (_, second) = handle_event(&mut state, &Event::Activate);
        assert_eq!(first, vec![Action::RequestPermission { generation: 1 }]);
        assert!(second.is_empty());
    }

    #[test]
    fn each_step_requests_the_next() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::Activate);

        let (_, actions) = handle_event(
            &mut state,
            &Event::PermissionResolved {
                generation: 1,
                status: PermissionStatus::Granted,
            },
        );
        assert_eq!(actions, vec![Action::RequestFix { generation: 1 }]);

        let (_, actions) = handle_event(
            &mut state,
            &Event::FixResolved {
                generation: 1,
                result: Ok(LocationFix::now(37.0, -122.0)),
            },
        );
        assert_eq!(
            actions,
            vec![Action::SearchNearby {
                generation: 1,
                at: Coordinate::new(37.0, -122.0),
            }]
        );
    }

    #[test]
    fn denied_permission_stops_the_cycle() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::Activate);
        let (render, actions) = handle_event(
            &mut state,
            &Event::PermissionResolved {
                generation: 1,
                status: PermissionStatus::Denied,
            },
        );
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.discovery.phase(), DiscoveryPhase::Denied);
    }

    #[test]
    fn scenario_selects_second_restaurant() {
        let mut state = loaded();
        let ids: Vec<&str> = state.restaurants().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);

        let (render, actions) = handle_event(&mut state, &Event::SelectRestaurant { id: "b".into() });
        assert!(render);
        assert_eq!(state.selection.selected_id(), Some("b"));
        assert!(actions.contains(&Action::ScrollToIndex {
            index: 1,
            view_position: CENTERED,
            attempt: 1,
        }));
        assert_eq!(state.camera, Some(Region::close_up(Coordinate::new(36.999, -121.999))));
    }

    #[test]
    fn unknown_selection_is_a_no_op() {
        let mut state = loaded();
        let (render, actions) = handle_event(&mut state, &Event::SelectRestaurant { id: "zzz".into() });
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.selection.selected_id(), None);
        assert_eq!(state.camera, None);
    }

    #[test]
    fn refresh_mid_cycle_cancels_and_restarts() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::Activate);

        let (_, actions) = handle_event(&mut state, &Event::Refresh);
        assert_eq!(
            actions,
            vec![
                Action::CancelPending,
                Action::RequestPermission { generation: 2 }
            ]
        );

        let (render, actions) = handle_event(
            &mut state,
            &Event::PermissionResolved {
                generation: 1,
                status: PermissionStatus::Granted,
            },
        );
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn refresh_keeps_stale_selection_harmless() {
        let mut state = loaded();
        handle_event(&mut state, &Event::SelectRestaurant { id: "a".into() });
        handle_event(&mut state, &Event::Refresh);

        assert!(state.restaurants().is_empty());
        assert!(state.selected_restaurant().is_none());
        let (_, actions) = handle_event(&mut state, &Event::SelectRestaurant { id: "b".into() });
        assert!(actions.is_empty());
    }

    #[test]
    fn go_to_my_location_needs_a_fix() {
        let mut state = signed_in();
        let (render, actions) = handle_event(&mut state, &Event::GoToMyLocation);
        assert!(!render);
        assert!(actions.is_empty());

        let mut state = loaded();
        let (_, first) = handle_event(&mut state, &Event::GoToMyLocation);
        let (_, second) = handle_event(&mut state, &Event::GoToMyLocation);
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![Action::AnimateCamera {
                region: Region::close_up(Coordinate::new(37.0, -122.0)),
                duration: CAMERA_ANIMATION,
            }]
        );
    }

    #[test]
    fn teardown_cancels_everything() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::Activate);
        let (_, actions) = handle_event(&mut state, &Event::Teardown);
        assert_eq!(actions, vec![Action::CancelPending, Action::CancelTimers]);
        assert_eq!(state.discovery.phase(), DiscoveryPhase::Idle);

        let (render, _) = handle_event(
            &mut state,
            &Event::PermissionResolved {
                generation: 1,
                status: PermissionStatus::Granted,
            },
        );
        assert!(!render);
    }

    #[test]
    fn activation_after_teardown_starts_a_new_cycle() {
        let mut state = loaded();
        handle_event(&mut state, &Event::Teardown);

        let (render, actions) = handle_event(&mut state, &Event::Activate);
        assert!(render);
        assert_eq!(actions, vec![Action::RequestPermission { generation: 3 }]);
        assert!(state.restaurants().is_empty());
    }

    #[test]
    fn callout_for_replaced_set_is_skipped() {
        let mut state = loaded();
        handle_event(&mut state, &Event::SelectRestaurant { id: "a".into() });
        handle_event(&mut state, &Event::Refresh);

        let (render, actions) = handle_event(&mut state, &Event::CalloutDue { id: "a".into() });
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn scroll_failure_retries_once_then_drops() {
        let mut state = loaded();
        let (_, retry) = handle_event(
            &mut state,
            &Event::ScrollFailed {
                index: 1,
                attempt: 1,
                reason: "not laid out".into(),
            },
        );
        assert_eq!(retry.len(), 1);

        let (_, actions) = handle_event(&mut state, &Event::ScrollRetryDue { index: 1, attempt: 2 });
        assert_eq!(
            actions,
            vec![Action::ScrollToIndex {
                index: 1,
                view_position: CENTERED,
                attempt: 2,
            }]
        );

        let (_, dropped) = handle_event(
            &mut state,
            &Event::ScrollFailed {
                index: 1,
                attempt: 2,
                reason: "not laid out".into(),
            },
        );
        assert!(dropped.is_empty());
    }
}
