//! Terminal stand-ins for the map and list widgets.
//!
//! [`TerminalList`] lays restaurant cards out in a fixed number of rows and
//! keeps the scroll target inside the visible window. [`TracingMap`] has no
//! surface at all; it logs camera and callout commands and remembers the last
//! ones so callers can inspect them.

use super::viewmodel::{list_window, CardView, MapView};
use super::{ListRenderer, MapRenderer, ScrollError};
use crate::domain::Region;
use std::io::{self, Write};
use std::ops::Range;
use std::time::Duration;

const BOLD: &str = "\u{001b}[1m";
const DIM: &str = "\u{001b}[2m";
const RESET: &str = "\u{001b}[0m";

/// Fixed-height terminal list.
#[derive(Debug, Clone)]
pub struct TerminalList {
    cards: Vec<CardView>,
    rows: usize,
    anchor: usize,
    view_position: f32,
}

impl TerminalList {
    /// Creates a list showing at most `rows` cards at a time.
    #[must_use]
    pub const fn new(rows: usize) -> Self {
        Self {
            cards: Vec::new(),
            rows,
            anchor: 0,
            view_position: 0.0,
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    /// Index of the row the list last scrolled to.
    #[must_use]
    pub const fn anchor(&self) -> usize {
        self.anchor
    }

    /// Range of card indices currently in the viewport.
    #[must_use]
    pub fn visible_window(&self) -> Range<usize> {
        list_window(self.cards.len(), self.rows, self.anchor, self.view_position)
    }

    /// Formats the visible cards, one line each.
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        self.cards[self.visible_window()]
            .iter()
            .map(|card| {
                let cursor = if card.is_selected { "▶ " } else { "  " };
                match &card.address {
                    Some(address) => format!("{cursor}{BOLD}{}{RESET}  {DIM}{address}{RESET}", card.name),
                    None => format!("{cursor}{BOLD}{}{RESET}", card.name),
                }
            })
            .collect()
    }

    /// Writes the visible cards to `out`.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        for line in self.render_lines() {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}

impl ListRenderer for TerminalList {
    fn update(&mut self, cards: &[CardView]) {
        self.cards = cards.to_vec();
        self.anchor = self.anchor.min(self.cards.len().saturating_sub(1));
    }

    fn scroll_to_index(&mut self, index: usize, view_position: f32) -> Result<(), ScrollError> {
        if self.rows == 0 || index >= self.cards.len() {
            return Err(ScrollError::NotLaidOut {
                index,
                laid_out: self.cards.len(),
            });
        }

        self.anchor = index;
        self.view_position = view_position;
        tracing::debug!(index, view_position, "list scrolled");
        Ok(())
    }
}

/// Map renderer that logs commands instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct TracingMap {
    region: Option<Region>,
    open_callout: Option<String>,
    marker_count: usize,
}

impl TracingMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last camera target.
    #[must_use]
    pub const fn region(&self) -> Option<Region> {
        self.region
    }

    /// Id of the marker whose callout is open.
    #[must_use]
    pub fn open_callout(&self) -> Option<&str> {
        self.open_callout.as_deref()
    }

    #[must_use]
    pub const fn marker_count(&self) -> usize {
        self.marker_count
    }
}

impl MapRenderer for TracingMap {
    fn update(&mut self, view: &MapView) {
        if self.region.is_none() {
            self.region = Some(view.initial_region);
        }
        self.marker_count = view.markers.len();
        self.open_callout = self
            .open_callout
            .take()
            .filter(|id| view.markers.iter().any(|m| &m.id == id));

        tracing::info!(
            markers = view.markers.len(),
            visible = view.markers.iter().filter(|m| m.visible).count(),
            has_user_location = view.user_location.is_some(),
            "map updated"
        );
    }

    fn animate_to_region(&mut self, region: Region, duration: Duration) {
        tracing::info!(
            latitude = region.latitude,
            longitude = region.longitude,
            latitude_delta = region.latitude_delta,
            duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "camera animating"
        );
        self.region = Some(region);
    }

    fn show_callout(&mut self, restaurant_id: &str) {
        tracing::info!(restaurant_id, "callout opened");
        self.open_callout = Some(restaurant_id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(n: usize) -> Vec<CardView> {
        (0..n)
            .map(|i| CardView {
                id: format!("r{i}"),
                name: format!("Restaurant {i}"),
                address: None,
                is_selected: false,
            })
            .collect()
    }

    #[test]
    fn scroll_fails_until_laid_out() {
        let mut list = TerminalList::new(5);
        assert_eq!(
            list.scroll_to_index(2, 0.5),
            Err(ScrollError::NotLaidOut { index: 2, laid_out: 0 })
        );

        list.update(&cards(10));
        assert!(list.scroll_to_index(2, 0.5).is_ok());
        assert_eq!(list.anchor(), 2);
    }

    #[test]
    fn centered_scroll_keeps_target_mid_window() {
        let mut list = TerminalList::new(5);
        list.update(&cards(20));

        list.scroll_to_index(10, 0.5).unwrap();
        assert_eq!(list.visible_window(), 8..13);

        list.scroll_to_index(1, 0.5).unwrap();
        assert_eq!(list.visible_window(), 0..5);

        list.scroll_to_index(19, 0.5).unwrap();
        assert_eq!(list.visible_window(), 15..20);
    }

    #[test]
    fn short_lists_show_everything() {
        let mut list = TerminalList::new(8);
        list.update(&cards(3));
        list.scroll_to_index(2, 0.5).unwrap();
        assert_eq!(list.visible_window(), 0..3);
        assert_eq!(list.render_lines().len(), 3);
    }

    #[test]
    fn selected_card_is_marked() {
        let mut list = TerminalList::new(3);
        let mut cards = cards(2);
        cards[1].is_selected = true;
        cards[1].address = Some("2 Side St".into());
        list.update(&cards);

        let lines = list.render_lines();
        assert!(lines[0].starts_with("  "));
        assert!(lines[1].starts_with("▶ "));
        assert!(lines[1].contains("2 Side St"));
    }

    #[test]
    fn map_drops_callout_for_vanished_marker() {
        let mut map = TracingMap::new();
        map.show_callout("gone");
        map.update(&MapView {
            initial_region: Region::initial(None),
            user_location: None,
            zoom_level: 15.0,
            markers: vec![],
        });
        assert!(map.open_callout().is_none());
        assert_eq!(map.region(), Some(Region::initial(None)));
    }
}
