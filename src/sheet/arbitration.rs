//! Writer arbitration for the sheet extent.
//!
//! Gesture callbacks, the settle spring, keyboard animations and layout
//! corrections all write the same extent. They never run concurrently but
//! they interleave across frames, so every write goes through [`arbitrate`]
//! against whichever writer currently owns the extent.

/// Something that writes the sheet extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Writer {
    /// Finger-tracking drag.
    Drag,
    /// Spring toward the snap point nearest the release extent.
    Settle,
    /// Spring toward MID requested by the host (dock focus).
    Expand,
    /// Timed animation driven by a keyboard notification.
    Keyboard,
    /// Instant correction after the dock was re-measured.
    Layout,
}

/// Outcome of an incoming write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arbitration {
    /// Cancel the active writer and let the incoming one write.
    Preempt,
    /// Drop the incoming write; the active writer keeps the extent.
    Reject,
}

/// Decide whether `incoming` may take the extent from `active`.
///
/// Rules, first match wins:
/// 1. a new drag always preempts, so drag responsiveness never waits on an
///    animation;
/// 2. an active drag rejects every other writer;
/// 3. a layout correction never interrupts an animation in flight;
/// 4. otherwise the newest writer wins.
pub fn arbitrate(active: Option<Writer>, incoming: Writer) -> Arbitration {
    match (active, incoming) {
        (_, Writer::Drag) => Arbitration::Preempt,
        (Some(Writer::Drag), _) => Arbitration::Reject,
        (Some(Writer::Settle | Writer::Expand | Writer::Keyboard), Writer::Layout) => {
            Arbitration::Reject
        }
        _ => Arbitration::Preempt,
    }
}
