//! sheetdock - Entry Point

use clap::Parser;
use sheetdock::model::AppError;
use std::path::PathBuf;
use tracing::info;

/// sheetdock - bottom sheet with an input dock in the terminal
#[derive(Parser, Debug)]
#[command(name = "sheetdock")]
#[command(version)]
#[command(about = "Draggable bottom sheet with a todo input dock and simulated keyboard")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Simulated keyboard height in rows
    #[arg(short, long)]
    pub keyboard_rows: Option<u16>,

    /// Extent units per terminal row (must be positive)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub units_per_row: Option<u16>,

    /// Only shift the dock when the keyboard shows; never grow the sheet
    #[arg(long)]
    pub no_keyboard_growth: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = sheetdock::config::load_config_with_precedence(args.config.clone())?;
        let merged = sheetdock::config::merge_config(config_file);
        let with_env = sheetdock::config::apply_env_overrides(merged);
        let grow_override = args.no_keyboard_growth.then_some(false);
        sheetdock::config::apply_cli_overrides(
            with_env,
            args.keyboard_rows,
            args.units_per_row,
            grow_override,
        )
    };

    // Held until exit so buffered log lines are flushed.
    let _log_guard = sheetdock::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let colors = sheetdock::view::ColorConfig::from_env_and_args(args.no_color);
    sheetdock::view::run(&config, colors)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["sheetdock", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["sheetdock", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["sheetdock"]);
        assert_eq!(args.config, None);
        assert_eq!(args.keyboard_rows, None);
        assert_eq!(args.units_per_row, None);
        assert!(!args.no_keyboard_growth);
        assert!(!args.no_color);
    }

    #[test]
    fn test_keyboard_rows_short_and_long() {
        let args = Args::parse_from(["sheetdock", "-k", "8"]);
        assert_eq!(args.keyboard_rows, Some(8));
        let args = Args::parse_from(["sheetdock", "--keyboard-rows", "10"]);
        assert_eq!(args.keyboard_rows, Some(10));
    }

    #[test]
    fn test_units_per_row_rejects_zero() {
        let err = Args::try_parse_from(["sheetdock", "--units-per-row", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_units_per_row_accepts_positive() {
        let args = Args::parse_from(["sheetdock", "-u", "20"]);
        assert_eq!(args.units_per_row, Some(20));
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from(["sheetdock", "--no-keyboard-growth", "--no-color"]);
        assert!(args.no_keyboard_growth);
        assert!(args.no_color);
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["sheetdock", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_cli_flags_flow_through_precedence_chain() {
        let args = Args::parse_from(["sheetdock", "-k", "3", "--no-keyboard-growth"]);
        let resolved = sheetdock::config::apply_cli_overrides(
            sheetdock::config::merge_config(None),
            args.keyboard_rows,
            args.units_per_row,
            args.no_keyboard_growth.then_some(false),
        );
        assert_eq!(resolved.keyboard_rows, 3);
        assert_eq!(resolved.units_per_row, 16);
        assert!(!resolved.grow_collapsed_sheet);
    }
}
