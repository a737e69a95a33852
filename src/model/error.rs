//! Error types for the sheetdock application.
//!
//! Each concern owns its error enum ([`ConfigError`], [`LoggingError`],
//! [`TuiError`]); [`AppError`] composes them so `main` can propagate any of
//! them with `?`.
//!
//! The sheet controller itself has no error type. Out-of-range numeric input
//! (drag deltas, keyboard heights, layout measurements) is clamped or ignored,
//! and missing platform data falls back to defaults.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::view::TuiError;
use thiserror::Error;

/// Top-level application error.
///
/// All failures here are fatal: they happen before the terminal is taken over
/// (config, logging) or mean the terminal can no longer be driven (TUI).
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal setup, rendering or restore failed.
    #[error("Terminal error: {0}")]
    Tui(#[from] TuiError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn config_error_converts_to_app_error() {
        let err = ConfigError::InvalidPath("bad".to_string());
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Config(_)));
        assert!(app.to_string().contains("bad"));
    }

    #[test]
    fn logging_error_converts_to_app_error() {
        let err = LoggingError::InvalidPath(PathBuf::from("/"));
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Logging(_)));
    }

    #[test]
    fn tui_error_converts_to_app_error() {
        let err = TuiError::Io(std::io::Error::other("gone"));
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Tui(_)));
        assert!(app.to_string().contains("gone"));
    }
}
