//! Canonical sheet extents.

/// One of the three canonical extents a released sheet settles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapPoint {
    /// Only the input dock is visible.
    Min,
    /// Sheet covers roughly two thirds of the screen.
    Mid,
    /// Full-screen sheet.
    Max,
}

/// Snap extents derived from the screen extent and the measured dock extent.
///
/// # Invariant
/// `min <= mid <= max`. Construction clamps `min` and `mid` into range, so a
/// dock taller than the MID cover line collapses MID onto MIN instead of
/// inverting the order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTargets {
    min: f64,
    mid: f64,
    max: f64,
}

impl SnapTargets {
    /// Derive snap targets.
    ///
    /// Returns `None` while the screen extent is unknown (zero, negative or
    /// non-finite); callers skip snapping until a real viewport arrives.
    pub fn derive(screen_extent: f64, min_extent: f64, mid_cover_ratio: f64) -> Option<Self> {
        if !screen_extent.is_finite() || screen_extent <= 0.0 || !min_extent.is_finite() {
            return None;
        }
        let max = screen_extent;
        let min = min_extent.clamp(0.0, max);
        let mid = (screen_extent - screen_extent * mid_cover_ratio).clamp(min, max);
        Some(Self { min, mid, max })
    }

    /// Collapsed extent.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Two-thirds extent.
    pub fn mid(&self) -> f64 {
        self.mid
    }

    /// Full-screen extent.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Extent for the given snap point.
    pub fn get(&self, point: SnapPoint) -> f64 {
        match point {
            SnapPoint::Min => self.min,
            SnapPoint::Mid => self.mid,
            SnapPoint::Max => self.max,
        }
    }
}
