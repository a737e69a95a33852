//! Sheet styling and opacity mapping.
//!
//! Terminals have no alpha channel, so opacity is rendered as a grey level on
//! the 24-step greyscale ramp of the 256-colour palette.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Explicit setting, ignoring the environment.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== SheetStyles =====

/// First index of the greyscale ramp (darkest).
const GREY_RAMP_START: u8 = 232;
/// Steps in the greyscale ramp.
const GREY_RAMP_STEPS: u8 = 23;

/// Styles for the sheet and its contents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetStyles {
    colors: ColorConfig,
}

impl SheetStyles {
    /// Styles for the given color configuration.
    pub fn new(colors: ColorConfig) -> Self {
        Self { colors }
    }

    /// Sheet panel background.
    pub fn panel(&self) -> Style {
        if self.colors.colors_enabled() {
            Style::default().bg(Color::Indexed(235))
        } else {
            Style::default()
        }
    }

    /// Background list of todos.
    pub fn todo(&self) -> Style {
        if self.colors.colors_enabled() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    }

    /// Dock border; highlighted while focused.
    pub fn dock_border(&self, focused: bool) -> Style {
        match (self.colors.colors_enabled(), focused) {
            (true, true) => Style::default().fg(Color::Yellow),
            (true, false) => Style::default().fg(Color::DarkGray),
            (false, true) => Style::default().add_modifier(Modifier::BOLD),
            (false, false) => Style::default(),
        }
    }

    /// Simulated keyboard area.
    pub fn keyboard(&self) -> Style {
        if self.colors.colors_enabled() {
            Style::default().fg(Color::Black).bg(Color::Gray)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        }
    }

    /// Style for content faded to `opacity`.
    ///
    /// `None` when the content is fully transparent and should not be drawn.
    /// Without colors there is no fade: content shows from half opacity up.
    pub fn faded(&self, opacity: f64) -> Option<Style> {
        if !opacity.is_finite() || opacity <= 0.0 {
            return None;
        }
        if !self.colors.colors_enabled() {
            return (opacity >= 0.5).then(Style::default);
        }
        Some(Style::default().fg(grey_level(opacity)))
    }
}

/// Grey for `opacity` in `[0, 1]`; 0 is the darkest ramp step.
pub fn grey_level(opacity: f64) -> Color {
    let step = (opacity.clamp(0.0, 1.0) * f64::from(GREY_RAMP_STEPS)).round() as u8;
    Color::Indexed(GREY_RAMP_START + step)
}
