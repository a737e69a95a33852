//! Adaptive bottom sheet controller (pure).
//!
//! Owns the sheet extent and the dock offset, arbitrates between the writers
//! that move them, and derives presentation values. No I/O and no terminal
//! types: the host feeds events and a frame clock in, and reads
//! [`SheetFrame`] snapshots out.

pub mod arbitration;
pub mod controller;
pub mod gesture;
pub mod height_model;
pub mod keyboard;
pub mod keyboard_bus;
pub mod layout_probe;
pub mod opacity;
pub mod snap;
pub mod spring;
pub mod timing;
pub mod tuning;

// Re-export for convenience
pub use arbitration::{arbitrate, Arbitration, Writer};
pub use controller::{SheetController, SheetFrame, Submission};
pub use gesture::{GestureHeightController, GesturePhase};
pub use height_model::{HeightModel, ScreenChange};
pub use keyboard::{KeyboardHeightCoordinator, KeyboardPlan};
pub use keyboard_bus::{KeyboardBus, KeyboardSubscription, KeyboardSubscriptions};
pub use layout_probe::DockMeasurement;
pub use opacity::{derive_opacity, SheetOpacity};
pub use snap::resolve_snap;
pub use spring::{SpringConfig, SpringMotion};
pub use timing::{ease_in_out_quad, TimingMotion};
pub use tuning::SheetTuning;

/// One sample of an animated value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    /// Position.
    pub value: f64,
    /// Rate of change in units per second.
    pub velocity: f64,
    /// The motion has reached its target and can be dropped.
    pub done: bool,
}
