//! Simulated on-screen keyboard.
//!
//! A terminal has no virtual keyboard, so focusing the dock stands one in:
//! it publishes a will-show with the configured height and duration, then the
//! matching did-show once the animation would have finished, the same pair a
//! mobile platform sends.

use crate::model::KeyboardNotification;
use crate::sheet::KeyboardBus;
use std::time::Duration;
use tracing::debug;

/// Publishes keyboard notifications on behalf of the terminal.
#[derive(Debug, Clone)]
pub struct SimulatedKeyboard {
    bus: KeyboardBus,
    height: f64,
    duration: Duration,
    shown: bool,
    /// Did-notification waiting for its will-animation to finish.
    pending: Option<(KeyboardNotification, Duration)>,
}

impl SimulatedKeyboard {
    /// Keyboard of `height` units animating over `duration`.
    pub fn new(bus: KeyboardBus, height: f64, duration: Duration) -> Self {
        Self {
            bus,
            height,
            duration,
            shown: false,
            pending: None,
        }
    }

    /// Whether the keyboard is up (or coming up).
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Whether a did-notification is still to come.
    pub fn is_settling(&self) -> bool {
        self.pending.is_some()
    }

    /// Raise the keyboard. No-op if already up.
    pub fn show(&mut self) {
        if self.shown {
            return;
        }
        self.shown = true;
        debug!(height = self.height, "simulated keyboard will show");
        self.bus.publish(KeyboardNotification::will_show(
            self.height,
            Some(self.duration),
        ));
        self.pending = Some((KeyboardNotification::did_show(self.height), self.duration));
    }

    /// Dismiss the keyboard. No-op if already down.
    pub fn hide(&mut self) {
        if !self.shown {
            return;
        }
        self.shown = false;
        debug!("simulated keyboard will hide");
        self.bus
            .publish(KeyboardNotification::will_hide(Some(self.duration)));
        self.pending = Some((KeyboardNotification::did_hide(), self.duration));
    }

    /// Advance the clock, publishing the did-notification when due.
    pub fn advance(&mut self, dt: Duration) {
        let Some((notification, remaining)) = self.pending.take() else {
            return;
        };
        if dt >= remaining {
            self.bus.publish(notification);
        } else {
            self.pending = Some((notification, remaining - dt));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KeyboardEventKind;

    const DURATION: Duration = Duration::from_millis(250);

    fn keyboard() -> (KeyboardBus, crate::sheet::KeyboardSubscriptions, SimulatedKeyboard) {
        let bus = KeyboardBus::new();
        let subs = bus.subscribe_all();
        let keyboard = SimulatedKeyboard::new(bus.clone(), 192.0, DURATION);
        (bus, subs, keyboard)
    }

    #[test]
    fn show_publishes_will_then_did() {
        let (bus, _subs, mut keyboard) = keyboard();
        keyboard.show();
        let will = bus.drain();
        assert_eq!(will, vec![KeyboardNotification::will_show(192.0, Some(DURATION))]);

        keyboard.advance(Duration::from_millis(100));
        assert!(bus.drain().is_empty());
        assert!(keyboard.is_settling());
        keyboard.advance(Duration::from_millis(150));
        let did = bus.drain();
        assert_eq!(did.len(), 1);
        assert_eq!(did[0].kind, KeyboardEventKind::DidShow);
        assert!(!keyboard.is_settling());
    }

    #[test]
    fn show_twice_publishes_once() {
        let (bus, _subs, mut keyboard) = keyboard();
        keyboard.show();
        keyboard.show();
        assert_eq!(bus.drain().len(), 1);
    }

    #[test]
    fn hide_replaces_pending_did_show() {
        let (bus, _subs, mut keyboard) = keyboard();
        keyboard.show();
        keyboard.hide();
        keyboard.advance(DURATION);
        let kinds: Vec<_> = bus.drain().into_iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                KeyboardEventKind::WillShow,
                KeyboardEventKind::WillHide,
                KeyboardEventKind::DidHide
            ]
        );
    }

    #[test]
    fn hide_when_down_is_noop() {
        let (bus, _subs, mut keyboard) = keyboard();
        keyboard.hide();
        assert!(bus.drain().is_empty());
        assert!(!keyboard.is_shown());
    }
}
