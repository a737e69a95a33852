//! Virtual keyboard lifecycle notifications.

use std::time::Duration;

/// Animation duration for the `Did*` pair, which never carries one.
pub const DID_PAIR_DURATION: Duration = Duration::from_millis(250);

/// The four platform keyboard notifications.
///
/// The `Will*` pair fires before the keyboard animates and may carry the
/// platform's animation duration. The `Did*` pair fires afterwards and is the
/// only pair some platforms deliver; it never carries a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyboardEventKind {
    /// Keyboard is about to appear.
    WillShow,
    /// Keyboard is about to disappear.
    WillHide,
    /// Keyboard finished appearing.
    DidShow,
    /// Keyboard finished disappearing.
    DidHide,
}

impl KeyboardEventKind {
    /// All kinds, in subscription order.
    pub const ALL: [KeyboardEventKind; 4] = [
        KeyboardEventKind::WillShow,
        KeyboardEventKind::WillHide,
        KeyboardEventKind::DidShow,
        KeyboardEventKind::DidHide,
    ];

    /// True for the show pair.
    pub fn is_show(self) -> bool {
        matches!(self, KeyboardEventKind::WillShow | KeyboardEventKind::DidShow)
    }

    /// True for the `Did*` fallback pair.
    pub fn is_fallback(self) -> bool {
        matches!(self, KeyboardEventKind::DidShow | KeyboardEventKind::DidHide)
    }
}

/// A keyboard notification as delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardNotification {
    /// Which notification fired.
    pub kind: KeyboardEventKind,
    /// Target keyboard height in extent units (0 for hide notifications).
    pub height: f64,
    /// Platform animation duration, when supplied.
    pub duration: Option<Duration>,
}

impl KeyboardNotification {
    /// Keyboard-will-show with an optional platform duration.
    pub fn will_show(height: f64, duration: Option<Duration>) -> Self {
        Self {
            kind: KeyboardEventKind::WillShow,
            height,
            duration,
        }
    }

    /// Keyboard-will-hide with an optional platform duration.
    pub fn will_hide(duration: Option<Duration>) -> Self {
        Self {
            kind: KeyboardEventKind::WillHide,
            height: 0.0,
            duration,
        }
    }

    /// Keyboard-did-show (no duration).
    pub fn did_show(height: f64) -> Self {
        Self {
            kind: KeyboardEventKind::DidShow,
            height,
            duration: None,
        }
    }

    /// Keyboard-did-hide (no duration).
    pub fn did_hide() -> Self {
        Self {
            kind: KeyboardEventKind::DidHide,
            height: 0.0,
            duration: None,
        }
    }

    /// Duration to animate with.
    ///
    /// `Did*` notifications always take the fixed [`DID_PAIR_DURATION`]; a
    /// `Will*` notification without a platform duration takes `default`.
    pub fn duration_or(&self, default: Duration) -> Duration {
        if self.kind.is_fallback() {
            return DID_PAIR_DURATION;
        }
        self.duration.unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: Duration = Duration::from_millis(250);

    #[test]
    fn will_show_uses_platform_duration() {
        let n = KeyboardNotification::will_show(300.0, Some(Duration::from_millis(400)));
        assert_eq!(n.duration_or(DEFAULT), Duration::from_millis(400));
    }

    #[test]
    fn missing_duration_falls_back() {
        let n = KeyboardNotification::will_hide(None);
        assert_eq!(n.duration_or(DEFAULT), DEFAULT);
    }

    #[test]
    fn did_pair_ignores_supplied_duration() {
        let mut n = KeyboardNotification::did_show(300.0);
        n.duration = Some(Duration::from_millis(900));
        assert_eq!(n.duration_or(DEFAULT), DID_PAIR_DURATION);
    }

    #[test]
    fn did_pair_ignores_configured_default() {
        let slow = Duration::from_millis(600);
        assert_eq!(KeyboardNotification::did_show(300.0).duration_or(slow), DID_PAIR_DURATION);
        assert_eq!(KeyboardNotification::did_hide().duration_or(slow), DID_PAIR_DURATION);
        assert_eq!(KeyboardNotification::will_hide(None).duration_or(slow), slow);
    }

    #[test]
    fn show_and_fallback_classification() {
        assert!(KeyboardEventKind::WillShow.is_show());
        assert!(KeyboardEventKind::DidShow.is_show());
        assert!(!KeyboardEventKind::WillHide.is_show());
        assert!(KeyboardEventKind::DidHide.is_fallback());
        assert!(!KeyboardEventKind::WillShow.is_fallback());
    }
}
