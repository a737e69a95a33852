//! Terminal host for the sheet (impure shell).
//!
//! Maps terminal rows to extent units, mouse drags to gesture events and
//! dock focus to simulated keyboard notifications, then draws whatever the
//! sheet controller reports.

pub mod constants;
mod dock;
mod keyboard;
mod layout;
mod message_log;
mod styles;

pub use dock::{wrap, InputDock};
pub use keyboard::SimulatedKeyboard;
pub use layout::{compute_sheet_layout, render_sheet, units_to_rows, SheetLayout, SheetView};
pub use message_log::{LogMessage, MessageLog};
pub use styles::{grey_level, ColorConfig, SheetStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::KeyAction;
use crate::sheet::{GesturePhase, KeyboardBus, SheetController};
use constants::{FRAME_INTERVAL, IDLE_INTERVAL, LOG_CAPACITY};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Pointer-down origin of a mouse drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragOrigin {
    row: u16,
    on_dock: bool,
    moved: bool,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    bus: KeyboardBus,
    sheet: SheetController,
    keyboard: SimulatedKeyboard,
    key_bindings: KeyBindings,
    styles: SheetStyles,
    units_per_row: f64,
    dock: InputDock,
    dock_focused: bool,
    log: MessageLog,
    todos: Vec<String>,
    drag: Option<DragOrigin>,
    last_layout: Option<SheetLayout>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(config: &ResolvedConfig, colors: ColorConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, config, colors))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Polls at frame rate while
    /// anything moves and backs off while the sheet is at rest.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;
        let mut last_frame = Instant::now();

        loop {
            let timeout = if self.needs_frames() {
                FRAME_INTERVAL
            } else {
                IDLE_INTERVAL
            };

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => {
                        debug!(width, height, "terminal resized");
                    }
                    _ => {}
                }
            }

            let now = Instant::now();
            self.advance(now - last_frame);
            last_frame = now;
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn with_terminal(terminal: Terminal<B>, config: &ResolvedConfig, colors: ColorConfig) -> Self {
        let bus = KeyboardBus::new();
        let tuning = config.tuning();
        let sheet = SheetController::mount(&bus, tuning);
        let keyboard =
            SimulatedKeyboard::new(bus.clone(), config.keyboard_extent(), tuning.keyboard_duration);
        let mut app = Self {
            terminal,
            bus,
            sheet,
            keyboard,
            key_bindings: KeyBindings::default(),
            styles: SheetStyles::new(colors),
            units_per_row: config.row_units(),
            dock: InputDock::new(),
            dock_focused: false,
            log: MessageLog::new(LOG_CAPACITY),
            todos: Vec::new(),
            drag: None,
            last_layout: None,
        };
        app.sync_screen();
        app
    }

    /// Whether the loop should tick at frame rate.
    fn needs_frames(&self) -> bool {
        self.sheet.is_animating()
            || self.keyboard.is_settling()
            || matches!(self.sheet.phase(), GesturePhase::Dragging { .. })
    }

    /// Advance the clock: deliver due keyboard notifications and animate.
    fn advance(&mut self, dt: Duration) {
        self.keyboard.advance(dt);
        self.sheet.pump_keyboard(&self.bus);
        self.sheet.tick(dt);
    }

    /// Report the terminal height as the screen extent.
    fn sync_screen(&mut self) {
        if let Ok(size) = self.terminal.size() {
            self.sheet
                .set_screen_extent(f64::from(size.height) * self.units_per_row);
        }
    }

    /// Handle a key press. Returns true if the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.key_bindings.action_for(key, self.dock_focused) {
            Some(KeyAction::Quit) => return true,
            Some(KeyAction::FocusDock) => self.focus_dock(),
            Some(KeyAction::BlurDock) => self.blur_dock(),
            Some(KeyAction::Submit) => self.submit(),
            Some(KeyAction::ExpandToMid) => {
                self.sheet.request_expand_to_mid();
            }
            None if self.dock_focused => match key.code {
                KeyCode::Char(c) => self.dock.insert(c),
                KeyCode::Backspace => self.dock.backspace(),
                _ => {}
            },
            None => {}
        }
        false
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(layout) = self.last_layout else {
            return;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.keyboard_contains_row(mouse.row) || !layout.sheet_contains_row(mouse.row)
                {
                    return;
                }
                self.drag = Some(DragOrigin {
                    row: mouse.row,
                    on_dock: layout.dock_contains_row(mouse.row),
                    moved: false,
                });
                self.sheet.pointer_down();
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(origin) = self.drag.as_mut() {
                    origin.moved |= mouse.row != origin.row;
                    let rows = f64::from(mouse.row) - f64::from(origin.row);
                    self.sheet.pointer_move(rows * self.units_per_row);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(origin) = self.drag.take() {
                    self.sheet.pointer_up();
                    if origin.on_dock && !origin.moved {
                        self.focus_dock();
                    }
                }
            }
            _ => {}
        }
    }

    /// Focus the dock: raise the keyboard, then expand to MID.
    fn focus_dock(&mut self) {
        if self.dock_focused {
            return;
        }
        self.dock_focused = true;
        self.keyboard.show();
        self.sheet.pump_keyboard(&self.bus);
        self.sheet.request_expand_to_mid();
    }

    fn blur_dock(&mut self) {
        if !self.dock_focused {
            return;
        }
        self.dock_focused = false;
        self.keyboard.hide();
        self.sheet.pump_keyboard(&self.bus);
    }

    fn submit(&mut self) {
        let Some(submission) = self.sheet.submit(self.dock.text()) else {
            return;
        };
        info!(todos = self.todos.len() + 1, "todo added");
        self.log.push(submission.text.clone(), chrono::Local::now());
        self.todos.push(submission.text);
        self.dock.clear();
        if submission.dismiss_keyboard {
            self.blur_dock();
        }
    }

    /// Render the current frame and report the dock's measured extent.
    fn draw(&mut self) -> Result<(), TuiError> {
        self.sync_screen();
        let size = self.terminal.size()?;
        let area = ratatui::layout::Rect::new(0, 0, size.width.max(1), size.height);
        let dock_rows = self.dock.measure_rows(area.width);

        let layout =
            compute_sheet_layout(area, &self.sheet.frame(), dock_rows, self.units_per_row);
        let view = SheetView {
            todos: &self.todos,
            log: &self.log,
            dock: &self.dock,
            dock_focused: self.dock_focused,
            opacity: self.sheet.opacities(),
            styles: &self.styles,
        };
        self.terminal.draw(|frame| render_sheet(frame, &layout, &view))?;
        self.last_layout = Some(layout);

        self.sheet
            .on_dock_layout(f64::from(dock_rows) * self.units_per_row);
        Ok(())
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp around an existing terminal (test-only constructor)
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        config: &ResolvedConfig,
        colors: ColorConfig,
    ) -> Self {
        Self::with_terminal(terminal, config, colors)
    }

    pub(crate) fn sheet(&self) -> &SheetController {
        &self.sheet
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Tick until nothing is animating.
    pub(crate) fn settle(&mut self) {
        let mut frames = 0;
        while self.needs_frames() {
            self.advance(FRAME_INTERVAL);
            frames += 1;
            assert!(frames < 1_000, "host never came to rest");
        }
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal on
/// exit. Logging must be initialized by the caller.
pub fn run(config: &ResolvedConfig, colors: ColorConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(config, colors)?;
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
