//! View model types representing renderable screen state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and handed to
//! the renderers. They carry no behavior, only display-ready data.

use super::markers::Importance;
use crate::app::selection::CENTERED;
use crate::domain::{Coordinate, Region};
use std::ops::Range;

/// Complete home screen snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeViewModel {
    /// Coarse screen status.
    pub status: ScreenStatus,

    /// Optional message shown when there is nothing to list.
    ///
    /// Distinguishes "nothing nearby" from "could not search" without
    /// blocking the map.
    pub notice: Option<Notice>,

    /// Map content.
    pub map: MapView,

    /// List cards, in search-result order.
    pub list: Vec<CardView>,
}

impl HomeViewModel {
    /// Cards visible in a viewport `rows` high, centered on the selected card.
    ///
    /// Without a selection the window starts at the top of the list.
    #[must_use]
    pub fn list_window(&self, rows: usize) -> Range<usize> {
        match self.list.iter().position(|card| card.is_selected) {
            Some(index) => list_window(self.list.len(), rows, index, CENTERED),
            None => list_window(self.list.len(), rows, 0, 0.0),
        }
    }
}

/// Window of `rows` items out of `len` with `anchor` at `view_position`.
///
/// `view_position` runs from 0.0 (anchor on the first row) to 1.0 (anchor on
/// the last). The window is pulled back if it would leave empty rows at the
/// bottom.
#[must_use]
pub fn list_window(len: usize, rows: usize, anchor: usize, view_position: f32) -> Range<usize> {
    if len == 0 || rows == 0 {
        return 0..0;
    }

    let rows = rows.min(len);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let offset = ((rows - 1) as f32 * view_position.clamp(0.0, 1.0)).round() as usize;

    let mut start = anchor.min(len - 1).saturating_sub(offset);
    let end = (start + rows).min(len);
    if end - start < rows {
        start = end.saturating_sub(rows);
    }

    start..end
}

/// Coarse screen status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenStatus {
    /// No user is signed in; the screen should route to sign-in.
    SignInRequired,
    /// A discovery cycle is in flight.
    Loading,
    /// Discovery finished with at least one restaurant.
    Ready,
    /// Discovery finished with zero restaurants, for whatever reason.
    ReadyEmpty,
}

/// Empty-list message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Primary message (e.g., "No restaurants nearby").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Map widget content.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    /// Region the map opens on.
    pub initial_region: Region,

    /// Device position, if a fix exists.
    pub user_location: Option<Coordinate>,

    /// Zoom level the marker visibility was computed for.
    pub zoom_level: f64,

    /// One marker per restaurant.
    pub markers: Vec<MarkerView>,
}

/// One restaurant pin.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    /// Restaurant id; the marker key.
    pub id: String,

    /// Callout title.
    pub title: String,

    /// Callout description (the address).
    pub description: Option<String>,

    pub coordinate: Coordinate,
    pub is_selected: bool,
    pub importance: Importance,

    /// Whether the pin is drawn at the current zoom.
    pub visible: bool,

    /// Whether the title label is drawn under the pin.
    pub show_label: bool,
}

/// One list card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Restaurant id; the row key.
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub is_selected: bool,
}
