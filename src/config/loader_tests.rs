//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

/// RAII guard to ensure environment variable cleanup even under test parallelism.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_ends_with_sheetdock_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("sheetdock") && path_str.ends_with("config.toml"),
        "Path should contain 'sheetdock' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_sheetdock_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("sheetdock.log"),
        "Default log path should end with 'sheetdock.log', got: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(result, Ok(None));
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = write_temp(
        "sheetdock_test_config.toml",
        r#"
units_per_row = 8
keyboard_rows = 10
keyboard_duration_ms = 400
mid_cover_ratio = 0.5
spring_damping = 30.0
spring_stiffness = 300.0
grow_collapsed_sheet = false
log_file_path = "/tmp/sheetdock-test.log"
"#,
    );

    let config = load_config_file(&config_path)
        .expect("Should parse valid TOML")
        .expect("File exists");
    assert_eq!(config.units_per_row, Some(8));
    assert_eq!(config.keyboard_rows, Some(10));
    assert_eq!(config.keyboard_duration_ms, Some(400));
    assert_eq!(config.mid_cover_ratio, Some(0.5));
    assert_eq!(config.spring_damping, Some(30.0));
    assert_eq!(config.spring_stiffness, Some(300.0));
    assert_eq!(config.grow_collapsed_sheet, Some(false));
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/sheetdock-test.log"))
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = write_temp("sheetdock_test_invalid.toml", "this is not valid TOML ][}{");

    match load_config_file(&config_path) {
        Err(ConfigError::ParseError { path, reason: _ }) => assert_eq!(path, config_path),
        other => panic!("Expected ParseError, got {:?}", other),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"");
    assert!(result.is_err(), "Unknown fields should be rejected");
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_keeps_defaults_for_missing_fields() {
    let file = ConfigFile {
        keyboard_rows: Some(6),
        ..ConfigFile::default()
    };
    let resolved = merge_config(Some(file));
    let defaults = ResolvedConfig::default();
    assert_eq!(resolved.keyboard_rows, 6);
    assert_eq!(resolved.units_per_row, defaults.units_per_row);
    assert_eq!(resolved.mid_cover_ratio, defaults.mid_cover_ratio);
    assert_eq!(resolved.grow_collapsed_sheet, defaults.grow_collapsed_sheet);
}

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();
    assert_eq!(config.units_per_row, 16);
    assert_eq!(config.keyboard_rows, 12);
    assert_eq!(config.keyboard_duration_ms, 250);
    assert_eq!(config.mid_cover_ratio, 0.33);
    assert_eq!(config.spring_damping, 20.0);
    assert_eq!(config.spring_stiffness, 200.0);
    assert!(config.grow_collapsed_sheet);
}

#[test]
fn tuning_carries_resolved_values() {
    let config = ResolvedConfig {
        keyboard_duration_ms: 400,
        spring_damping: 30.0,
        grow_collapsed_sheet: false,
        ..ResolvedConfig::default()
    };
    let tuning = config.tuning();
    assert_eq!(tuning.keyboard_duration, Duration::from_millis(400));
    assert_eq!(tuning.spring.damping, 30.0);
    assert_eq!(tuning.spring.stiffness, 200.0);
    assert!(!tuning.grow_collapsed_sheet);
    assert_eq!(tuning.initial_dock_extent, DEFAULT_DOCK_EXTENT);
}

#[test]
fn tuning_clamps_out_of_range_values() {
    let config = ResolvedConfig {
        mid_cover_ratio: 3.0,
        spring_damping: -1.0,
        ..ResolvedConfig::default()
    };
    let tuning = config.tuning();
    assert_eq!(tuning.mid_cover_ratio, 1.0);
    assert_eq!(tuning.spring.damping, 20.0);
}

#[test]
fn keyboard_extent_scales_rows_by_units() {
    let config = ResolvedConfig {
        keyboard_rows: 10,
        units_per_row: 16,
        ..ResolvedConfig::default()
    };
    assert_eq!(config.keyboard_extent(), 160.0);
    let zero_units = ResolvedConfig {
        units_per_row: 0,
        ..ResolvedConfig::default()
    };
    assert_eq!(zero_units.row_units(), 1.0);
}

#[test]
#[serial(sheetdock_env)]
fn apply_env_overrides_reads_rows_and_units() {
    let _rows = EnvGuard::new(ENV_KEYBOARD_ROWS);
    let _units = EnvGuard::new(ENV_UNITS_PER_ROW);
    env::set_var(ENV_KEYBOARD_ROWS, "9");
    env::set_var(ENV_UNITS_PER_ROW, " 20 ");

    let config = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(config.keyboard_rows, 9);
    assert_eq!(config.units_per_row, 20);
}

#[test]
#[serial(sheetdock_env)]
fn apply_env_overrides_ignores_garbage() {
    let _rows = EnvGuard::new(ENV_KEYBOARD_ROWS);
    env::set_var(ENV_KEYBOARD_ROWS, "lots");

    let config = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(config.keyboard_rows, ResolvedConfig::default().keyboard_rows);
}

#[test]
#[serial(sheetdock_env)]
fn apply_env_overrides_no_change_when_unset() {
    let _rows = EnvGuard::new(ENV_KEYBOARD_ROWS);
    let _units = EnvGuard::new(ENV_UNITS_PER_ROW);
    let config = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(config, ResolvedConfig::default());
}

#[test]
#[serial(sheetdock_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(ENV_CONFIG);
    let explicit = write_temp("sheetdock_test_explicit.toml", "keyboard_rows = 3");
    let from_env = write_temp("sheetdock_test_env.toml", "keyboard_rows = 4");
    env::set_var(ENV_CONFIG, &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .expect("Should load")
        .expect("File exists");
    assert_eq!(config.keyboard_rows, Some(3));

    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(sheetdock_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(ENV_CONFIG);
    let from_env = write_temp("sheetdock_test_env_only.toml", "units_per_row = 5");
    env::set_var(ENV_CONFIG, &from_env);

    let config = load_config_with_precedence(None)
        .expect("Should load")
        .expect("File exists");
    assert_eq!(config.units_per_row, Some(5));

    fs::remove_file(from_env).ok();
}

#[test]
#[serial(sheetdock_config)]
fn load_config_with_precedence_missing_env_file_is_not_error() {
    let _guard = EnvGuard::new(ENV_CONFIG);
    env::set_var(ENV_CONFIG, "/nonexistent/sheetdock/config.toml");
    assert_eq!(load_config_with_precedence(None), Ok(None));
}

#[test]
fn apply_cli_overrides_only_touches_given_flags() {
    let base = ResolvedConfig::default();
    let config = apply_cli_overrides(base.clone(), Some(7), None, Some(false));
    assert_eq!(config.keyboard_rows, 7);
    assert_eq!(config.units_per_row, base.units_per_row);
    assert!(!config.grow_collapsed_sheet);

    assert_eq!(apply_cli_overrides(base.clone(), None, None, None), base);
}

#[test]
#[serial(sheetdock_env)]
fn precedence_chain_file_then_env_then_cli() {
    let _rows = EnvGuard::new(ENV_KEYBOARD_ROWS);
    let _units = EnvGuard::new(ENV_UNITS_PER_ROW);
    let file = ConfigFile {
        keyboard_rows: Some(4),
        units_per_row: Some(8),
        ..ConfigFile::default()
    };
    env::set_var(ENV_KEYBOARD_ROWS, "6");

    let merged = merge_config(Some(file));
    assert_eq!(merged.keyboard_rows, 4);
    let with_env = apply_env_overrides(merged);
    assert_eq!(with_env.keyboard_rows, 6);
    assert_eq!(with_env.units_per_row, 8);
    let with_cli = apply_cli_overrides(with_env, Some(2), None, None);
    assert_eq!(with_cli.keyboard_rows, 2);
    assert_eq!(with_cli.units_per_row, 8);
}
