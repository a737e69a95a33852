//! Presentation opacity derived from the sheet extent.
//!
//! Nothing here is stored: the host re-derives on every frame, so opacity can
//! never drift from the extent it was computed from.

use super::height_model::HeightModel;

/// Opacity of the parts of the sheet that fade with height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetOpacity {
    /// Message log container.
    pub log: f64,
    /// Drag handle affordance.
    pub handle: f64,
}

impl SheetOpacity {
    /// Fully transparent (collapsed).
    pub const HIDDEN: Self = Self {
        log: 0.0,
        handle: 0.0,
    };
}

/// Map `extent` linearly from `[min, mid]` onto `[0, 1]`, clamped.
///
/// A degenerate range (MID collapsed onto MIN) is a step at `min`.
pub fn fade(extent: f64, min: f64, mid: f64) -> f64 {
    let span = mid - min;
    if span <= f64::EPSILON {
        return if extent > min { 1.0 } else { 0.0 };
    }
    ((extent - min) / span).clamp(0.0, 1.0)
}

/// Opacity for the model's current extent.
///
/// Hidden while the screen extent is unknown.
pub fn derive_opacity(model: &HeightModel, mid_cover_ratio: f64) -> SheetOpacity {
    let Some(targets) = model.snap_targets(mid_cover_ratio) else {
        return SheetOpacity::HIDDEN;
    };
    let value = fade(model.current(), targets.min(), targets.mid());
    SheetOpacity {
        log: value,
        handle: value,
    }
}
