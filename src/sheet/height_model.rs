//! Single source of truth for the sheet extent.

use crate::model::SnapTargets;

/// How a screen extent update changed the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenChange {
    /// Same value as before.
    Unchanged,
    /// First real viewport after an unknown one.
    BecameKnown,
    /// Known viewport changed size (rotation, resize).
    Resized,
    /// Viewport reported as zero or invalid.
    BecameUnknown,
}

/// Current, minimum and screen extents.
///
/// # Invariant
/// `min <= current <= upper_bound()` after every write. `upper_bound()` is the
/// screen extent once known and the minimum before, so a sheet mounted before
/// the first layout pass stays collapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightModel {
    current: f64,
    min: f64,
    screen: f64,
}

impl HeightModel {
    /// Model seeded collapsed at `min_extent` with an unknown screen.
    pub fn new(min_extent: f64) -> Self {
        Self {
            current: min_extent,
            min: min_extent,
            screen: 0.0,
        }
    }

    /// Current sheet extent.
    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Minimum extent (measured dock extent).
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Screen extent, 0 while unknown.
    #[inline]
    pub fn screen(&self) -> f64 {
        self.screen
    }

    /// Whether a real viewport has been reported.
    #[inline]
    pub fn is_screen_known(&self) -> bool {
        self.screen > 0.0
    }

    /// Largest committable extent.
    #[inline]
    pub fn upper_bound(&self) -> f64 {
        if self.is_screen_known() {
            self.screen.max(self.min)
        } else {
            self.min
        }
    }

    /// Clamp a candidate extent into `[min, upper_bound]`.
    #[inline]
    pub fn clamp(&self, extent: f64) -> f64 {
        extent.clamp(self.min, self.upper_bound())
    }

    /// Clamp and commit. Non-finite candidates are dropped.
    ///
    /// Returns the committed extent.
    pub fn commit(&mut self, extent: f64) -> f64 {
        if extent.is_finite() {
            self.current = self.clamp(extent);
        }
        self.current
    }

    /// Replace the minimum extent and re-clamp the current extent.
    pub fn set_min(&mut self, min_extent: f64) {
        if !min_extent.is_finite() || min_extent <= 0.0 {
            return;
        }
        self.min = min_extent;
        self.current = self.clamp(self.current);
    }

    /// Record a new screen extent.
    ///
    /// A zero, negative or non-finite value marks the screen unknown.
    pub fn set_screen(&mut self, screen_extent: f64) -> ScreenChange {
        let next = if screen_extent.is_finite() && screen_extent > 0.0 {
            screen_extent
        } else {
            0.0
        };
        let was_known = self.is_screen_known();
        if next == self.screen {
            return ScreenChange::Unchanged;
        }
        self.screen = next;
        self.current = self.clamp(self.current);
        match (was_known, self.is_screen_known()) {
            (false, true) => ScreenChange::BecameKnown,
            (true, true) => ScreenChange::Resized,
            _ => ScreenChange::BecameUnknown,
        }
    }

    /// Snap targets for the current minimum and screen, if the screen is known.
    pub fn snap_targets(&self, mid_cover_ratio: f64) -> Option<SnapTargets> {
        SnapTargets::derive(self.screen, self.min, mid_cover_ratio)
    }

    /// Whether the current extent is within `tolerance` of the minimum.
    #[inline]
    pub fn is_collapsed_within(&self, tolerance: f64) -> bool {
        (self.current - self.min).abs() < tolerance
    }
}
