//! Single-pointer vertical drag state machine.
//!
//! Idle → Dragging on pointer-down, Dragging → Settling on release, Settling →
//! Idle once the spring converges. A pointer-down in any phase re-enters
//! Dragging from the live extent.

use super::height_model::HeightModel;
use super::snap::resolve_snap;
use crate::model::{SnapPoint, SnapTargets};

/// Gesture phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    /// No pointer and no settle in flight.
    Idle,
    /// A pointer is down; the extent tracks it 1:1.
    Dragging {
        /// Extent captured at pointer-down.
        start_extent: f64,
    },
    /// Released; a spring is carrying the extent to `target`.
    Settling {
        /// Snap point being settled to.
        target: SnapPoint,
    },
}

/// Converts drag translation into extent writes.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureHeightController {
    phase: GesturePhase,
}

impl Default for GestureHeightController {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureHeightController {
    /// Controller in `Idle`.
    pub fn new() -> Self {
        Self {
            phase: GesturePhase::Idle,
        }
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Whether a pointer is down.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    /// Pointer-down: capture the live extent as the drag origin.
    pub fn begin(&mut self, model: &HeightModel) {
        self.phase = GesturePhase::Dragging {
            start_extent: model.current(),
        };
    }

    /// Extent for a vertical translation since pointer-down.
    ///
    /// The sheet is anchored to the bottom edge, so moving the finger up
    /// (negative translation) grows it. The result is unclamped; the model
    /// clamps on commit. `None` outside a drag or for non-finite input.
    pub fn extent_for(&self, translation: f64) -> Option<f64> {
        match self.phase {
            GesturePhase::Dragging { start_extent } if translation.is_finite() => {
                Some(start_extent - translation)
            }
            _ => None,
        }
    }

    /// Pointer-up or cancel.
    ///
    /// Resolves the snap point nearest the released extent and enters
    /// `Settling`. Without snap targets (screen unknown) the sheet stays where
    /// it was released and the controller returns to `Idle`.
    pub fn release(&mut self, model: &HeightModel, targets: Option<SnapTargets>) -> Option<SnapPoint> {
        if !self.is_dragging() {
            return None;
        }
        match targets {
            Some(targets) => {
                let target = resolve_snap(model.current(), &targets);
                self.phase = GesturePhase::Settling { target };
                Some(target)
            }
            None => {
                self.phase = GesturePhase::Idle;
                None
            }
        }
    }

    /// The settle finished or was replaced by another writer.
    pub fn finish_settle(&mut self) {
        if matches!(self.phase, GesturePhase::Settling { .. }) {
            self.phase = GesturePhase::Idle;
        }
    }
}
