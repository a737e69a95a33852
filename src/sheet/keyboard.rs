//! Keyboard show/hide coordination.
//!
//! Two mechanisms keep the dock clear of the keyboard:
//! - the dock offset moves the dock up by the keyboard height, always;
//! - a collapsed sheet additionally grows by the keyboard height so the panel
//!   background fills the strip between the raised dock and the keyboard.
//!
//! The dock sits at the bottom edge of the sheet, so growing the sheet alone
//! never lifts the dock. The two changes cover different regions and do not
//! add up to a double shift.
//!
//! A show opens a keyboard session; further shows inside the same session
//! retarget rather than compound, and a hide closes it.

use super::height_model::HeightModel;
use super::tuning::{KEYBOARD_COLLAPSED_TOLERANCE, LAYOUT_JITTER};
use crate::model::KeyboardNotification;
use std::time::Duration;
use tracing::{debug, info};

/// Animation targets requested by a keyboard notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardPlan {
    /// Extent to animate to, if the sheet height should change.
    pub extent_target: Option<f64>,
    /// Dock offset to animate to.
    pub dock_target: f64,
    /// Animation duration.
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct KeyboardSession {
    height: f64,
    prior_settled: Option<f64>,
    /// Keyboard growth still decides the extent. Cleared once another writer
    /// moves the sheet.
    growth_owned: bool,
}

/// Turns keyboard notifications into extent and dock offset targets.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardHeightCoordinator {
    session: Option<KeyboardSession>,
    grow_collapsed: bool,
}

impl KeyboardHeightCoordinator {
    /// Coordinator with no keyboard shown.
    ///
    /// `grow_collapsed` enables the collapsed-sheet growth mechanism.
    pub fn new(grow_collapsed: bool) -> Self {
        Self {
            session: None,
            grow_collapsed,
        }
    }

    /// Whether a keyboard session is open.
    pub fn is_shown(&self) -> bool {
        self.session.is_some()
    }

    /// Keyboard height of the open session.
    pub fn keyboard_height(&self) -> Option<f64> {
        self.session.map(|s| s.height)
    }

    /// Extent recorded before keyboard-driven growth, if growth is active.
    pub fn prior_settled_extent(&self) -> Option<f64> {
        self.session.and_then(|s| s.prior_settled)
    }

    /// Plan the response to a notification.
    ///
    /// Returns `None` when nothing should change: a repeated show with the
    /// same height, or a non-finite height.
    pub fn handle(
        &mut self,
        notification: &KeyboardNotification,
        model: &HeightModel,
        default_duration: Duration,
    ) -> Option<KeyboardPlan> {
        let duration = notification.duration_or(default_duration);
        if notification.kind.is_show() {
            self.on_show(notification.height, duration, model)
        } else {
            Some(self.on_hide(duration, model))
        }
    }

    /// Drop the recorded growth: its extent animation was rejected, so a later
    /// hide has nothing to restore.
    pub fn forfeit_growth(&mut self) {
        if let Some(session) = &mut self.session {
            session.prior_settled = None;
            session.growth_owned = false;
        }
    }

    /// Another writer took the extent over (expand-to-MID). Height changes no
    /// longer retarget the growth; a hide still restores the prior extent.
    pub fn yield_growth(&mut self) {
        if let Some(session) = &mut self.session {
            session.growth_owned = false;
        }
    }

    fn on_show(
        &mut self,
        height: f64,
        duration: Duration,
        model: &HeightModel,
    ) -> Option<KeyboardPlan> {
        if !height.is_finite() {
            return None;
        }
        let height = if model.is_screen_known() {
            height.clamp(0.0, model.screen())
        } else {
            height.max(0.0)
        };

        let collapsed = model.is_collapsed_within(KEYBOARD_COLLAPSED_TOLERANCE);
        let grows_now = collapsed && self.grow_collapsed;

        if let Some(session) = &mut self.session {
            if (session.height - height).abs() < LAYOUT_JITTER {
                debug!(height, "keyboard already shown at this height");
                return None;
            }
            debug!(from = session.height, to = height, "keyboard height changed");
            session.height = height;
            let extent_target = match session.prior_settled {
                Some(prior) if session.growth_owned => Some(prior + height),
                _ if grows_now => {
                    session.prior_settled = Some(model.current());
                    session.growth_owned = true;
                    Some(model.current() + height)
                }
                _ => None,
            };
            return Some(KeyboardPlan {
                extent_target,
                dock_target: -height,
                duration,
            });
        }

        let prior_settled = grows_now.then(|| model.current());
        info!(
            height,
            collapsed,
            grows = prior_settled.is_some(),
            "keyboard session opened"
        );
        self.session = Some(KeyboardSession {
            height,
            prior_settled,
            growth_owned: prior_settled.is_some(),
        });
        Some(KeyboardPlan {
            extent_target: prior_settled.map(|prior| prior + height),
            dock_target: -height,
            duration,
        })
    }

    fn on_hide(&mut self, duration: Duration, model: &HeightModel) -> KeyboardPlan {
        let session = self.session.take();
        if session.is_some() {
            info!("keyboard session closed");
        }
        // Restore only if the recorded extent still matches the current
        // minimum: a re-measured dock may have moved it.
        let extent_target = session
            .and_then(|s| s.prior_settled)
            .filter(|prior| (prior - model.min()).abs() < KEYBOARD_COLLAPSED_TOLERANCE);
        KeyboardPlan {
            extent_target,
            dock_target: 0.0,
            duration,
        }
    }
}
