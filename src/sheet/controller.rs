//! The single owned state cell for one mounted sheet.
//!
//! Every write to the extent goes through [`arbitrate`]; every commit is
//! clamped by [`HeightModel`]. Two animation channels run independently: the
//! extent channel (settle, expand, keyboard growth) and the dock offset
//! channel (keyboard shift). A drag owns the extent channel but never touches
//! the dock offset.

use super::arbitration::{arbitrate, Arbitration, Writer};
use super::gesture::{GestureHeightController, GesturePhase};
use super::height_model::{HeightModel, ScreenChange};
use super::keyboard::KeyboardHeightCoordinator;
use super::keyboard_bus::{KeyboardBus, KeyboardSubscriptions};
use super::layout_probe::{self, DockMeasurement};
use super::opacity::{derive_opacity, SheetOpacity};
use super::spring::SpringMotion;
use super::timing::TimingMotion;
use super::tuning::SheetTuning;
use super::MotionSample;
use crate::model::{KeyboardNotification, SnapPoint, SnapTargets};
use std::time::Duration;
use tracing::{debug, info, trace};

/// Snapshot of every host-facing output for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetFrame {
    /// Sheet extent to size the container with.
    pub extent: f64,
    /// Current minimum (dock) extent.
    pub min_extent: f64,
    /// Screen extent, 0 while unknown.
    pub screen_extent: f64,
    /// Vertical translation of the dock, `<= 0`.
    pub dock_offset: f64,
    /// Log and handle opacity.
    pub opacity: SheetOpacity,
    /// Gesture phase.
    pub phase: GesturePhase,
}

/// Text accepted from the dock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Trimmed, non-empty text.
    pub text: String,
    /// The keyboard is up and the host should dismiss it.
    pub dismiss_keyboard: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Motion {
    Spring(SpringMotion),
    Timing(TimingMotion),
}

impl Motion {
    fn step(&mut self, dt: Duration) -> MotionSample {
        match self {
            Motion::Spring(spring) => spring.step(dt),
            Motion::Timing(timing) => timing.step(dt),
        }
    }

    fn target(&self) -> f64 {
        match self {
            Motion::Spring(spring) => spring.target(),
            Motion::Timing(timing) => timing.target(),
        }
    }

    fn retarget(&mut self, target: f64) {
        match self {
            Motion::Spring(spring) => spring.retarget(target),
            Motion::Timing(timing) => timing.retarget(target),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ExtentAnimation {
    writer: Writer,
    motion: Motion,
    /// Snap point the animation heads to, so it can follow re-derived targets.
    snap: Option<SnapPoint>,
}

/// Adaptive bottom sheet controller.
///
/// Created by [`SheetController::mount`]; dropping it releases the keyboard
/// subscriptions.
#[derive(Debug)]
pub struct SheetController {
    model: HeightModel,
    tuning: SheetTuning,
    gesture: GestureHeightController,
    keyboard: KeyboardHeightCoordinator,
    subscriptions: KeyboardSubscriptions,
    extent_animation: Option<ExtentAnimation>,
    extent_velocity: f64,
    drag_sample: f64,
    dock_offset: f64,
    dock_animation: Option<TimingMotion>,
}

impl SheetController {
    /// Mount a sheet: seed the model collapsed and subscribe to the keyboard.
    pub fn mount(bus: &KeyboardBus, tuning: SheetTuning) -> Self {
        let tuning = tuning.sanitized();
        let model = HeightModel::new(tuning.initial_dock_extent);
        debug!(min_extent = model.min(), "sheet mounted");
        Self {
            drag_sample: model.current(),
            model,
            gesture: GestureHeightController::new(),
            keyboard: KeyboardHeightCoordinator::new(tuning.grow_collapsed_sheet),
            subscriptions: bus.subscribe_all(),
            tuning,
            extent_animation: None,
            extent_velocity: 0.0,
            dock_offset: 0.0,
            dock_animation: None,
        }
    }

    // ===== Reads =====

    /// Current sheet extent.
    pub fn current_extent(&self) -> f64 {
        self.model.current()
    }

    /// Current minimum extent.
    pub fn min_extent(&self) -> f64 {
        self.model.min()
    }

    /// Screen extent, 0 while unknown.
    pub fn screen_extent(&self) -> f64 {
        self.model.screen()
    }

    /// Snap targets, `None` while the screen is unknown.
    pub fn snap_targets(&self) -> Option<SnapTargets> {
        self.model.snap_targets(self.tuning.mid_cover_ratio)
    }

    /// Dock vertical offset.
    pub fn dock_offset(&self) -> f64 {
        self.dock_offset
    }

    /// Log and handle opacity for the current extent.
    pub fn opacities(&self) -> SheetOpacity {
        derive_opacity(&self.model, self.tuning.mid_cover_ratio)
    }

    /// Gesture phase.
    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    /// Tuning in effect.
    pub fn tuning(&self) -> &SheetTuning {
        &self.tuning
    }

    /// Whether a keyboard session is open.
    pub fn is_keyboard_shown(&self) -> bool {
        self.keyboard.is_shown()
    }

    /// Writer currently owning the extent.
    pub fn active_writer(&self) -> Option<Writer> {
        if self.gesture.is_dragging() {
            return Some(Writer::Drag);
        }
        self.extent_animation.as_ref().map(|a| a.writer)
    }

    /// Whether either animation channel is running.
    pub fn is_animating(&self) -> bool {
        self.extent_animation.is_some() || self.dock_animation.is_some()
    }

    /// Snapshot of every output.
    pub fn frame(&self) -> SheetFrame {
        SheetFrame {
            extent: self.model.current(),
            min_extent: self.model.min(),
            screen_extent: self.model.screen(),
            dock_offset: self.dock_offset,
            opacity: self.opacities(),
            phase: self.gesture.phase(),
        }
    }

    // ===== Inputs =====

    /// Report the viewport extent.
    pub fn set_screen_extent(&mut self, screen_extent: f64) {
        match self.model.set_screen(screen_extent) {
            ScreenChange::Unchanged => {}
            ScreenChange::BecameKnown => {
                let min = self.model.min();
                self.model.commit(min);
                debug!(screen = self.model.screen(), "screen extent known");
            }
            ScreenChange::Resized => {
                debug!(screen = self.model.screen(), "screen resized");
                self.retarget_extent_animation();
                self.clamp_dock();
            }
            ScreenChange::BecameUnknown => {
                debug!("screen extent lost");
                if !self.gesture.is_dragging() {
                    self.replace_extent_animation(None);
                }
                self.clamp_dock();
            }
        }
    }

    /// Pointer-down on the sheet. Always preempts any extent animation.
    pub fn pointer_down(&mut self) {
        debug_assert_eq!(
            arbitrate(self.active_writer(), Writer::Drag),
            Arbitration::Preempt
        );
        self.replace_extent_animation(None);
        // The user places the sheet now; a later hide must not pull it back.
        self.keyboard.forfeit_growth();
        self.gesture.begin(&self.model);
        self.extent_velocity = 0.0;
        self.drag_sample = self.model.current();
        debug!(start_extent = self.model.current(), "drag started");
    }

    /// Pointer-move with vertical translation since pointer-down.
    pub fn pointer_move(&mut self, translation: f64) {
        if let Some(extent) = self.gesture.extent_for(translation) {
            let committed = self.model.commit(extent);
            trace!(translation, committed, "drag");
        }
    }

    /// Pointer-up: settle to the nearest snap point.
    pub fn pointer_up(&mut self) {
        self.release();
    }

    /// Pointer-cancel: settles exactly like a release.
    pub fn pointer_cancel(&mut self) {
        self.release();
    }

    /// Spring the sheet to MID, e.g. when the dock gains focus.
    ///
    /// Returns whether the animation started. A no-op while the screen is
    /// unknown or a drag is active.
    pub fn request_expand_to_mid(&mut self) -> bool {
        let Some(targets) = self.snap_targets() else {
            return false;
        };
        let spring = SpringMotion::new(
            self.tuning.spring,
            self.model.current(),
            self.extent_velocity,
            targets.mid(),
        );
        let started =
            self.start_extent_animation(Writer::Expand, Motion::Spring(spring), Some(SnapPoint::Mid));
        if started {
            debug!(target = targets.mid(), "expanding to mid");
            self.keyboard.yield_growth();
        }
        started
    }

    /// Apply a keyboard notification delivered through the bus.
    ///
    /// Returns `false` when no live subscription covers the notification kind.
    pub fn handle_keyboard(&mut self, notification: &KeyboardNotification) -> bool {
        if !self.subscriptions.covers(notification.kind) {
            return false;
        }
        let Some(plan) =
            self.keyboard
                .handle(notification, &self.model, self.tuning.keyboard_duration)
        else {
            return true;
        };

        if let Some(target) = plan.extent_target {
            let timing = TimingMotion::new(
                self.model.current(),
                self.model.clamp(target),
                plan.duration,
            );
            if !self.start_extent_animation(Writer::Keyboard, Motion::Timing(timing), None)
                && notification.kind.is_show()
            {
                debug!("keyboard growth rejected, forfeiting restore");
                self.keyboard.forfeit_growth();
            }
        }
        self.animate_dock(plan.dock_target, plan.duration);
        true
    }

    /// Pull every queued notification from `bus` and apply it.
    pub fn pump_keyboard(&mut self, bus: &KeyboardBus) {
        for notification in bus.drain() {
            self.handle_keyboard(&notification);
        }
    }

    /// Report the measured dock extent after a layout pass.
    pub fn on_dock_layout(&mut self, measured: f64) {
        let DockMeasurement::MinChanged {
            old_min,
            new_min,
            follow_collapsed,
        } = layout_probe::measure(measured, &self.model)
        else {
            return;
        };
        debug!(old_min, new_min, follow_collapsed, "dock re-measured");
        self.model.set_min(new_min);

        if follow_collapsed {
            match arbitrate(self.active_writer(), Writer::Layout) {
                Arbitration::Preempt => {
                    self.replace_extent_animation(None);
                    self.model.commit(new_min);
                }
                Arbitration::Reject => {}
            }
        }
        self.retarget_extent_animation();
    }

    /// Accept dock text.
    ///
    /// Whitespace-only input is ignored.
    pub fn submit(&mut self, raw: &str) -> Option<Submission> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        info!(chars = text.chars().count(), "dock submitted");
        Some(Submission {
            text: text.to_string(),
            dismiss_keyboard: self.keyboard.is_shown(),
        })
    }

    // ===== Frame clock =====

    /// Advance both animation channels by `dt` and commit.
    ///
    /// Returns whether anything is still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.gesture.is_dragging() {
            let secs = dt.as_secs_f64();
            if secs > 0.0 {
                self.extent_velocity = (self.model.current() - self.drag_sample) / secs;
            }
            self.drag_sample = self.model.current();
        }

        if let Some(mut animation) = self.extent_animation.take() {
            let sample = animation.motion.step(dt);
            let committed = self.model.commit(sample.value);
            trace!(writer = ?animation.writer, committed, "extent frame");
            if sample.done {
                debug!(writer = ?animation.writer, extent = committed, "extent animation finished");
                self.extent_velocity = 0.0;
                if animation.writer == Writer::Settle {
                    self.gesture.finish_settle();
                }
            } else {
                self.extent_velocity = sample.velocity;
                self.extent_animation = Some(animation);
            }
        }

        if let Some(mut animation) = self.dock_animation.take() {
            let sample = animation.step(dt);
            self.dock_offset = self.clamp_dock_value(sample.value);
            trace!(dock_offset = self.dock_offset, "dock frame");
            if !sample.done {
                self.dock_animation = Some(animation);
            }
        }

        self.is_animating()
    }

    // ===== Internals =====

    fn release(&mut self) {
        let targets = self.snap_targets();
        let Some(point) = self.gesture.release(&self.model, targets) else {
            return;
        };
        let Some(targets) = targets else {
            return;
        };
        let target = targets.get(point);
        let spring = SpringMotion::new(
            self.tuning.spring,
            self.model.current(),
            self.extent_velocity,
            target,
        );
        debug!(?point, target, velocity = self.extent_velocity, "drag released");
        self.start_extent_animation(Writer::Settle, Motion::Spring(spring), Some(point));
    }

    fn start_extent_animation(
        &mut self,
        writer: Writer,
        motion: Motion,
        snap: Option<SnapPoint>,
    ) -> bool {
        match arbitrate(self.active_writer(), writer) {
            Arbitration::Reject => {
                debug!(?writer, active = ?self.active_writer(), "extent write rejected");
                false
            }
            Arbitration::Preempt => {
                self.replace_extent_animation(Some(ExtentAnimation {
                    writer,
                    motion,
                    snap,
                }));
                true
            }
        }
    }

    /// Every replacement of the extent animation passes through here.
    fn replace_extent_animation(&mut self, next: Option<ExtentAnimation>) {
        let replaced = std::mem::replace(&mut self.extent_animation, next);
        if let Some(previous) = replaced {
            trace!(writer = ?previous.writer, "extent animation cancelled");
            if previous.writer == Writer::Settle {
                self.gesture.finish_settle();
            }
        }
    }

    /// Follow re-derived snap targets or a shrunken range.
    fn retarget_extent_animation(&mut self) {
        let targets = self.snap_targets();
        let Some(animation) = self.extent_animation.as_mut() else {
            return;
        };
        let target = match (animation.snap, targets) {
            (Some(point), Some(targets)) => targets.get(point),
            _ => self.model.clamp(animation.motion.target()),
        };
        if target != animation.motion.target() {
            debug!(writer = ?animation.writer, target, "extent animation retargeted");
            animation.motion.retarget(target);
        }
    }

    fn animate_dock(&mut self, target: f64, duration: Duration) {
        let target = self.clamp_dock_value(target);
        if let Some(animation) = &self.dock_animation {
            if animation.target() == target {
                return;
            }
        } else if self.dock_offset == target {
            return;
        }
        self.dock_animation = Some(TimingMotion::new(self.dock_offset, target, duration));
    }

    fn clamp_dock(&mut self) {
        self.dock_offset = self.clamp_dock_value(self.dock_offset);
        let clamped = self
            .dock_animation
            .as_ref()
            .map(|a| self.clamp_dock_value(a.target()));
        if let (Some(animation), Some(target)) = (self.dock_animation.as_mut(), clamped) {
            if animation.target() != target {
                animation.retarget(target);
            }
        }
    }

    fn clamp_dock_value(&self, offset: f64) -> f64 {
        if self.model.is_screen_known() {
            offset.clamp(-self.model.screen(), 0.0)
        } else {
            offset.min(0.0)
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
