//! Rendering seams for the map and the restaurant list.
//!
//! The map and list widgets are external collaborators. The runtime drives
//! them through [`MapRenderer`] and [`ListRenderer`] and feeds them
//! display-ready snapshots computed from application state.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → HomeViewModel → MapRenderer::update / ListRenderer::update
//!                 Action::AnimateCamera / ShowCallout / ScrollToIndex → renderer commands
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable screen state
//! - [`markers`]: Zoom and importance based marker visibility
//! - [`terminal`]: Terminal list and logging map used by the binary

pub mod markers;
pub mod terminal;
pub mod viewmodel;

pub use markers::{should_show_label, should_show_marker, Importance, SizeTier};
pub use terminal::{TerminalList, TracingMap};
pub use viewmodel::{CardView, HomeViewModel, MapView, MarkerView, Notice, ScreenStatus};

use crate::domain::Region;
use std::time::Duration;
use thiserror::Error;

/// Map widget commands.
pub trait MapRenderer {
    /// Replaces the displayed markers and user position.
    fn update(&mut self, view: &MapView);

    /// Moves the camera to `region`, animating over `duration`.
    fn animate_to_region(&mut self, region: Region, duration: Duration);

    /// Opens the info callout of the marker keyed by `restaurant_id`.
    fn show_callout(&mut self, restaurant_id: &str);
}

/// List widget commands.
pub trait ListRenderer {
    /// Replaces the displayed cards.
    fn update(&mut self, cards: &[CardView]);

    /// Scrolls so that row `index` sits at `view_position` of the viewport
    /// (`0.0` top, `0.5` centered, `1.0` bottom).
    ///
    /// # Errors
    ///
    /// Returns [`ScrollError`] if the row cannot be scrolled to yet.
    fn scroll_to_index(&mut self, index: usize, view_position: f32) -> Result<(), ScrollError>;
}

/// Why a list refused to scroll.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrollError {
    /// The target row has not been laid out yet.
    #[error("row {index} is not laid out ({laid_out} rows available)")]
    NotLaidOut { index: usize, laid_out: usize },
}
