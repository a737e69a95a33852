//! Sheet layout: maps extents to terminal rows and renders the frame.
//!
//! Layout is pure: [`compute_sheet_layout`] only does arithmetic on the
//! [`SheetFrame`] snapshot, so mouse hit-testing and rendering agree on where
//! everything is.

use super::constants::{DOCK_CHROME_ROWS, DOCK_PLACEHOLDER, HANDLE_GLYPH};
use super::dock::InputDock;
use super::message_log::MessageLog;
use super::styles::SheetStyles;
use crate::sheet::{SheetFrame, SheetOpacity};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    /// Whole terminal.
    pub screen: Rect,
    /// Area above the sheet.
    pub background: Rect,
    /// Sheet panel, bottom-anchored.
    pub sheet: Rect,
    /// Drag handle row, if the sheet is taller than the dock.
    pub handle: Option<Rect>,
    /// Message log between handle and dock.
    pub log: Option<Rect>,
    /// Input dock, lifted by the dock offset.
    pub dock: Rect,
    /// Simulated keyboard, covering the bottom rows.
    pub keyboard: Option<Rect>,
}

impl SheetLayout {
    /// Whether `row` falls on the sheet.
    pub fn sheet_contains_row(&self, row: u16) -> bool {
        row >= self.sheet.y && row < self.sheet.bottom()
    }

    /// Whether `row` falls on the dock.
    pub fn dock_contains_row(&self, row: u16) -> bool {
        row >= self.dock.y && row < self.dock.bottom()
    }

    /// Whether `row` falls on the simulated keyboard.
    pub fn keyboard_contains_row(&self, row: u16) -> bool {
        self.keyboard
            .is_some_and(|k| row >= k.y && row < k.bottom())
    }
}

/// Convert an extent to whole rows, clamped to `max_rows`.
pub fn units_to_rows(units: f64, units_per_row: f64, max_rows: u16) -> u16 {
    if !units.is_finite() || units <= 0.0 || units_per_row <= 0.0 {
        return 0;
    }
    let rows = (units / units_per_row).round();
    rows.min(f64::from(max_rows)) as u16
}

/// Place the sheet, handle, log, dock and keyboard inside `area`.
///
/// `dock_rows` is the dock's measured height, border included.
pub fn compute_sheet_layout(
    area: Rect,
    frame: &SheetFrame,
    dock_rows: u16,
    units_per_row: f64,
) -> SheetLayout {
    let rows = area.height;
    let bottom = area.bottom();

    let sheet_rows = units_to_rows(frame.extent, units_per_row, rows);
    let sheet = Rect::new(area.x, bottom - sheet_rows, area.width, sheet_rows);
    let background = Rect::new(area.x, area.y, area.width, sheet.y - area.y);

    let keyboard_rows = units_to_rows(-frame.dock_offset, units_per_row, rows);
    let keyboard = (keyboard_rows > 0)
        .then(|| Rect::new(area.x, bottom - keyboard_rows, area.width, keyboard_rows));

    let dock_height = dock_rows.min(rows);
    let dock_bottom = (bottom - keyboard_rows).max(area.y + dock_height);
    let dock = Rect::new(area.x, dock_bottom - dock_height, area.width, dock_height);

    let above_dock = dock.y.saturating_sub(sheet.y);
    let handle = (above_dock >= 1 && sheet_rows > 0).then(|| Rect::new(area.x, sheet.y, area.width, 1));
    let log = (above_dock >= 2)
        .then(|| Rect::new(area.x, sheet.y + 1, area.width, above_dock - 1));

    SheetLayout {
        screen: area,
        background,
        sheet,
        handle,
        log,
        dock,
        keyboard,
    }
}

/// Everything the renderer reads besides the layout.
#[derive(Debug, Clone, Copy)]
pub struct SheetView<'a> {
    /// Todos added so far, drawn behind the sheet.
    pub todos: &'a [String],
    /// Submitted messages.
    pub log: &'a MessageLog,
    /// Dock text.
    pub dock: &'a InputDock,
    /// Whether the dock has focus.
    pub dock_focused: bool,
    /// Log and handle opacity.
    pub opacity: SheetOpacity,
    /// Styles.
    pub styles: &'a SheetStyles,
}

/// Render one frame.
pub fn render_sheet(frame: &mut Frame, layout: &SheetLayout, view: &SheetView) {
    render_background(frame, layout.background, view);

    frame.render_widget(Clear, layout.sheet);
    frame.render_widget(Block::default().style(view.styles.panel()), layout.sheet);

    if let (Some(area), Some(style)) = (layout.handle, view.styles.faded(view.opacity.handle)) {
        let handle = Paragraph::new(Line::from(Span::styled(HANDLE_GLYPH, style)))
            .alignment(Alignment::Center);
        frame.render_widget(handle, area);
    }

    if let (Some(area), Some(style)) = (layout.log, view.styles.faded(view.opacity.log)) {
        let lines: Vec<Line> = view
            .log
            .tail(area.height as usize)
            .map(|message| Line::from(Span::styled(message.display(), style)))
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    render_dock(frame, layout.dock, view);

    if let Some(area) = layout.keyboard {
        frame.render_widget(Clear, area);
        let keyboard = Paragraph::new("keyboard · Esc to dismiss")
            .alignment(Alignment::Center)
            .style(view.styles.keyboard());
        frame.render_widget(keyboard, area);
    }
}

fn render_background(frame: &mut Frame, area: Rect, view: &SheetView) {
    if area.height == 0 {
        return;
    }
    let mut lines = vec![Line::from("Todos")];
    lines.extend(
        view.todos
            .iter()
            .map(|todo| Line::from(Span::styled(format!("• {todo}"), view.styles.todo()))),
    );
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_dock(frame: &mut Frame, area: Rect, view: &SheetView) {
    if area.height < DOCK_CHROME_ROWS {
        return;
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(view.styles.dock_border(view.dock_focused));
    let lines: Vec<Line> = if view.dock.is_empty() && !view.dock_focused {
        vec![Line::from(DOCK_PLACEHOLDER)]
    } else {
        view.dock
            .lines(area.width)
            .into_iter()
            .map(Line::from)
            .collect()
    };
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
