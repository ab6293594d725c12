//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event.
//! Actions are the boundary between pure state transitions and effectful
//! work: collaborator calls, renderer commands and timers.
//!
//! # Example
//!
//! ```rust
//! use foodiepal::app::Action;
//!
//! let actions = vec![Action::RequestPermission { generation: 1 }];
//! ```

use crate::domain::{Coordinate, Region};
use std::time::Duration;

/// Commands produced by the event handler and executed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Sends the user to the sign-in screen. Emitted instead of discovery
    /// when no user is signed in.
    RedirectToSignIn,

    /// Prompts for location permission on behalf of cycle `generation`.
    RequestPermission { generation: u64 },

    /// Requests a one-shot location fix on behalf of cycle `generation`.
    RequestFix { generation: u64 },

    /// Runs one nearby search around `at` on behalf of cycle `generation`.
    SearchNearby { generation: u64, at: Coordinate },

    /// Cancels in-flight collaborator calls of the current cycle.
    CancelPending,

    /// Cancels pending callout and scroll-retry timers.
    CancelTimers,

    /// Animates the map camera.
    AnimateCamera { region: Region, duration: Duration },

    /// Opens the marker callout for `id` once `after` has elapsed.
    ScheduleCallout { id: String, after: Duration },

    /// Opens the marker callout for `id` now.
    ShowCallout { id: String },

    /// Scrolls the list to `index`. `attempt` starts at 1.
    ScrollToIndex {
        index: usize,
        view_position: f32,
        attempt: u8,
    },

    /// Re-issues a failed scroll once `after` has elapsed.
    ScheduleScrollRetry {
        index: usize,
        after: Duration,
        attempt: u8,
    },
}
