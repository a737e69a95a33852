//! Sheet tuning constants and the resolved tuning set.

use super::spring::SpringConfig;
use crate::model::DID_PAIR_DURATION;
use std::time::Duration;

/// Dock extent assumed until the first layout measurement arrives.
pub const DEFAULT_DOCK_EXTENT: f64 = 80.0;

/// Layout measurements closer than this to the current minimum are jitter.
pub const LAYOUT_JITTER: f64 = 1.0;

/// A sheet within this distance of the old minimum follows a new minimum.
pub const COLLAPSED_SNAP_WINDOW: f64 = 50.0;

/// A sheet within this distance of the minimum counts as collapsed for
/// keyboard handling.
pub const KEYBOARD_COLLAPSED_TOLERANCE: f64 = 10.0;

/// Fraction of the screen left uncovered at MID.
pub const MID_COVER_RATIO: f64 = 0.33;

/// Keyboard animation duration when the platform supplies none.
pub const DEFAULT_KEYBOARD_DURATION: Duration = DID_PAIR_DURATION;

/// Tuning knobs for one sheet instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetTuning {
    /// Fraction of the screen left uncovered at MID, in `[0, 1]`.
    pub mid_cover_ratio: f64,
    /// Spring used for settling and expand-to-MID.
    pub spring: SpringConfig,
    /// Keyboard animation duration fallback.
    pub keyboard_duration: Duration,
    /// Grow a collapsed sheet by the keyboard height on show, in addition to
    /// shifting the dock. Disabling leaves only the dock shift.
    pub grow_collapsed_sheet: bool,
    /// Dock extent used before the first measurement.
    pub initial_dock_extent: f64,
}

impl Default for SheetTuning {
    fn default() -> Self {
        Self {
            mid_cover_ratio: MID_COVER_RATIO,
            spring: SpringConfig::default(),
            keyboard_duration: DEFAULT_KEYBOARD_DURATION,
            grow_collapsed_sheet: true,
            initial_dock_extent: DEFAULT_DOCK_EXTENT,
        }
    }
}

impl SheetTuning {
    /// Clamp every field into its usable range.
    ///
    /// Non-finite values fall back to the defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let mid_cover_ratio = if self.mid_cover_ratio.is_finite() {
            self.mid_cover_ratio.clamp(0.0, 1.0)
        } else {
            defaults.mid_cover_ratio
        };
        let initial_dock_extent =
            if self.initial_dock_extent.is_finite() && self.initial_dock_extent > 0.0 {
                self.initial_dock_extent
            } else {
                defaults.initial_dock_extent
            };
        Self {
            mid_cover_ratio,
            spring: self.spring.sanitized(),
            keyboard_duration: self.keyboard_duration,
            grow_collapsed_sheet: self.grow_collapsed_sheet,
            initial_dock_extent,
        }
    }
}
