//! Domain-level host actions independent of key bindings.

/// Host actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// While the input dock has focus, printable keys go to the dock instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Focus the input dock: expands the sheet to MID and raises the keyboard. Default: i/Tab
    FocusDock,
    /// Leave the input dock and dismiss the keyboard. Default: Esc
    BlurDock,
    /// Submit the dock text. Default: Enter
    Submit,
    /// Expand the sheet to MID without focusing the dock. Default: m
    ExpandToMid,
    /// Quit the application. Default: q
    Quit,
}
