//! Configuration file loading with precedence handling.

use crate::sheet::spring::SpringConfig;
use crate::sheet::tuning::{
    SheetTuning, DEFAULT_DOCK_EXTENT, DEFAULT_KEYBOARD_DURATION, MID_COVER_RATIO,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Config file environment variable.
pub const ENV_CONFIG: &str = "SHEETDOCK_CONFIG";
/// Simulated keyboard height override, in rows.
pub const ENV_KEYBOARD_ROWS: &str = "SHEETDOCK_KEYBOARD_ROWS";
/// Extent units per terminal row override.
pub const ENV_UNITS_PER_ROW: &str = "SHEETDOCK_UNITS_PER_ROW";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; unspecified ones fall back to defaults.
/// Corresponds to `~/.config/sheetdock/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Extent units represented by one terminal row.
    #[serde(default)]
    pub units_per_row: Option<u16>,

    /// Simulated on-screen keyboard height in rows.
    #[serde(default)]
    pub keyboard_rows: Option<u16>,

    /// Keyboard animation duration in milliseconds.
    #[serde(default)]
    pub keyboard_duration_ms: Option<u64>,

    /// Fraction of the screen left uncovered at MID.
    #[serde(default)]
    pub mid_cover_ratio: Option<f64>,

    /// Settle spring damping.
    #[serde(default)]
    pub spring_damping: Option<f64>,

    /// Settle spring stiffness.
    #[serde(default)]
    pub spring_stiffness: Option<f64>,

    /// Grow a collapsed sheet with the keyboard.
    #[serde(default)]
    pub grow_collapsed_sheet: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Extent units per terminal row.
    pub units_per_row: u16,
    /// Simulated keyboard height in rows.
    pub keyboard_rows: u16,
    /// Keyboard animation duration in milliseconds.
    pub keyboard_duration_ms: u64,
    /// Fraction of the screen left uncovered at MID.
    pub mid_cover_ratio: f64,
    /// Settle spring damping.
    pub spring_damping: f64,
    /// Settle spring stiffness.
    pub spring_stiffness: f64,
    /// Grow a collapsed sheet with the keyboard.
    pub grow_collapsed_sheet: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let spring = SpringConfig::default();
        Self {
            units_per_row: 16,
            keyboard_rows: 12,
            keyboard_duration_ms: DEFAULT_KEYBOARD_DURATION.as_millis() as u64,
            mid_cover_ratio: MID_COVER_RATIO,
            spring_damping: spring.damping,
            spring_stiffness: spring.stiffness,
            grow_collapsed_sheet: true,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Sheet tuning for this configuration, clamped into usable ranges.
    pub fn tuning(&self) -> SheetTuning {
        SheetTuning {
            mid_cover_ratio: self.mid_cover_ratio,
            spring: SpringConfig {
                damping: self.spring_damping,
                stiffness: self.spring_stiffness,
                ..SpringConfig::default()
            },
            keyboard_duration: Duration::from_millis(self.keyboard_duration_ms),
            grow_collapsed_sheet: self.grow_collapsed_sheet,
            initial_dock_extent: DEFAULT_DOCK_EXTENT,
        }
        .sanitized()
    }

    /// Units per row, never zero.
    pub fn row_units(&self) -> f64 {
        f64::from(self.units_per_row.max(1))
    }

    /// Simulated keyboard height in extent units.
    pub fn keyboard_extent(&self) -> f64 {
        f64::from(self.keyboard_rows) * self.row_units()
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/sheetdock/sheetdock.log` on Linux, or the
/// platform state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("sheetdock").join("sheetdock.log")
    } else {
        PathBuf::from("sheetdock.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/sheetdock/config.toml` on Linux, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sheetdock").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SHEETDOCK_CONFIG` environment variable
/// 3. Default path `~/.config/sheetdock/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed,
/// or `SHEETDOCK_CONFIG` is not valid unicode.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    match std::env::var(ENV_CONFIG) {
        Ok(env_path) => return load_config_file(PathBuf::from(env_path)),
        Err(std::env::VarError::NotUnicode(raw)) => {
            return Err(ConfigError::InvalidPath(raw.to_string_lossy().into_owned()));
        }
        Err(std::env::VarError::NotPresent) => {}
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        units_per_row: config.units_per_row.unwrap_or(defaults.units_per_row),
        keyboard_rows: config.keyboard_rows.unwrap_or(defaults.keyboard_rows),
        keyboard_duration_ms: config
            .keyboard_duration_ms
            .unwrap_or(defaults.keyboard_duration_ms),
        mid_cover_ratio: config.mid_cover_ratio.unwrap_or(defaults.mid_cover_ratio),
        spring_damping: config.spring_damping.unwrap_or(defaults.spring_damping),
        spring_stiffness: config.spring_stiffness.unwrap_or(defaults.spring_stiffness),
        grow_collapsed_sheet: config
            .grow_collapsed_sheet
            .unwrap_or(defaults.grow_collapsed_sheet),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `SHEETDOCK_KEYBOARD_ROWS` and `SHEETDOCK_UNITS_PER_ROW`. Values
/// that do not parse as row counts are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(rows) = env_u16(ENV_KEYBOARD_ROWS) {
        config.keyboard_rows = rows;
    }
    if let Some(units) = env_u16(ENV_UNITS_PER_ROW) {
        config.units_per_row = units;
    }
    config
}

fn env_u16(name: &str) -> Option<u16> {
    std::env::var(name).ok()?.trim().parse().ok()
}

/// Apply CLI argument overrides to resolved config.
///
/// Only flags the user actually passed override anything.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    keyboard_rows_override: Option<u16>,
    units_per_row_override: Option<u16>,
    grow_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(rows) = keyboard_rows_override {
        config.keyboard_rows = rows;
    }
    if let Some(units) = units_per_row_override {
        config.units_per_row = units;
    }
    if let Some(grow) = grow_override {
        config.grow_collapsed_sheet = grow;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
