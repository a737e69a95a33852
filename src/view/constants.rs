//! Layout and timing constants for the terminal host.

use std::time::Duration;

/// Poll interval while anything is animating or a drag is in progress.
///
/// One frame at ~60fps.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Poll interval while the sheet is at rest.
pub const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// Rows taken by the dock border (top + bottom).
pub const DOCK_CHROME_ROWS: u16 = 2;

/// Columns taken by the dock border (left + right).
pub const DOCK_CHROME_COLS: u16 = 2;

/// Most text rows the dock grows to before it stops growing.
pub const MAX_DOCK_TEXT_ROWS: u16 = 4;

/// Prompt drawn in front of the dock text.
pub const DOCK_PROMPT: &str = "> ";

/// Placeholder shown while the dock is empty.
pub const DOCK_PLACEHOLDER: &str = "Add a todo…";

/// Messages kept in the sheet's log.
pub const LOG_CAPACITY: usize = 200;

/// Glyph of the drag handle.
pub const HANDLE_GLYPH: &str = "━━━━━━";
