//! Marker visibility by zoom level and importance.
//!
//! Zoomed out, only the most important pins stay on the map so the view does
//! not drown in markers. Labels only appear at street level.

/// Zoom at which every marker is shown.
const ZOOM_ALL_MARKERS: f64 = 15.0;

/// Zoom above which marker labels are drawn.
const ZOOM_LABELS: f64 = 14.0;

/// Marker importance on a 1 (lowest) to 5 (highest) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Importance(u8);

impl Importance {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(5);

    /// Creates an importance, clamping into `1..=5`.
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self(level.clamp(Self::MIN.0, Self::MAX.0))
    }

    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Pin size tier for this importance.
    #[must_use]
    pub const fn size_tier(self) -> SizeTier {
        match self.0 {
            5 => SizeTier::VeryHigh,
            4 => SizeTier::High,
            3 => SizeTier::Medium,
            2 => SizeTier::Low,
            _ => SizeTier::VeryLow,
        }
    }
}

impl Default for Importance {
    fn default() -> Self {
        Self(3)
    }
}

/// Pin size classes, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

impl SizeTier {
    /// Pin diameter in points.
    #[must_use]
    pub const fn diameter(self) -> u16 {
        match self {
            Self::VeryHigh => 40,
            Self::High => 38,
            Self::Medium => 36,
            Self::Low => 32,
            Self::VeryLow => 28,
        }
    }
}

/// Returns `true` if a marker of `importance` should be drawn at `zoom`.
///
/// # Examples
///
/// ```
/// use foodiepal::render::{should_show_marker, Importance};
///
/// assert!(should_show_marker(15.0, Importance::MIN));
/// assert!(should_show_marker(13.0, Importance::default()));
/// assert!(!should_show_marker(12.0, Importance::default()));
/// assert!(should_show_marker(3.0, Importance::MAX));
/// ```
#[must_use]
pub fn should_show_marker(zoom: f64, importance: Importance) -> bool {
    let level = importance.level();

    if zoom >= ZOOM_ALL_MARKERS {
        return true;
    }

    if zoom >= 13.0 {
        level >= 3
    } else if zoom >= 11.0 {
        level >= 4
    } else {
        level >= 5
    }
}

/// Returns `true` if marker titles should be drawn at `zoom`.
#[must_use]
pub fn should_show_label(zoom: f64) -> bool {
    zoom > ZOOM_LABELS
}
