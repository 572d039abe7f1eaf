//! Unit tests for TOML configuration parsing.

use pantilt_stepper::config::{
    DeviceConfig, Millis, StepsPerSec, PAN_STOP_WINDOW, TILT_STOP_WINDOW,
};
use pantilt_stepper::AxisId;

/// Test parsing a configuration with only the required tables.
#[test]
fn test_parse_axes_only() {
    let toml_str = r#"
[pan]
phase_pins = [17, 18, 27, 22]
soft_max_steps = 4096

[tilt]
phase_pins = [5, 6, 13, 19]
soft_max_steps = 1024
"#;

    let config: DeviceConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.pan.phase_pins, [17, 18, 27, 22]);
    assert_eq!(config.tilt.soft_max_steps, 1024);
    assert_eq!(config.timer_channel, 0);
    assert_eq!(config.debounce, Millis(5));
    assert!(!config.invert_phases);
    assert!(!config.invert_direction);
    assert_eq!(config.speed.min, StepsPerSec(100));
    assert_eq!(config.speed.default, StepsPerSec(400));
    assert_eq!(config.speed.max, StepsPerSec(900));
    assert_eq!(config.timeouts.stop, Millis(15_000));
    assert_eq!(config.timeouts.home, Millis(150_000));
    assert_eq!(config.timeouts.settle, Millis(10_000));
}

/// Test the per-axis stop windows fall back to their named defaults.
#[test]
fn test_stop_window_defaults_per_axis() {
    let toml_str = r#"
[pan]
phase_pins = [17, 18, 27, 22]
soft_max_steps = 4096

[tilt]
phase_pins = [5, 6, 13, 19]
soft_max_steps = 1024
stop_window = 12
"#;

    let config: DeviceConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.pan.stop_window_for(AxisId::Pan), PAN_STOP_WINDOW);
    assert_eq!(config.tilt.stop_window_for(AxisId::Tilt), 12);

    let mut tilt = config.tilt.clone();
    tilt.stop_window = None;
    assert_eq!(tilt.stop_window_for(AxisId::Tilt), TILT_STOP_WINDOW);
}

/// Test parsing every optional table.
#[test]
fn test_parse_full_config() {
    let toml_str = r#"
timer_channel = 3
debounce_ms = 8
invert_phases = true
invert_direction = true

[speed]
min = 50
default = 200
max = 1200

[timeouts]
stop_ms = 2000
home_ms = 60000
settle_ms = 4000

[pan]
phase_pins = [17, 18, 27, 22]
soft_max_steps = 4096

[pan.endstop]
min_pin = 23
max_pin = 24
active_high = true

[tilt]
phase_pins = [5, 6, 13, 19]
soft_max_steps = 1024
"#;

    let config: DeviceConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.timer_channel, 3);
    assert_eq!(config.debounce.value(), 8);
    assert!(config.invert_phases);
    assert!(config.invert_direction);
    assert_eq!(config.speed.max.value(), 1200);
    assert_eq!(config.timeouts.home.value(), 60_000);

    let endstop = config.pan.endstop.expect("pan endstop");
    assert_eq!((endstop.min_pin, endstop.max_pin), (23, 24));
    assert!(endstop.active_high);
    assert!(config.tilt.endstop.is_none());
}

/// Test that a missing axis table is a parse error.
#[test]
fn test_missing_axis_table() {
    let toml_str = r#"
[pan]
phase_pins = [17, 18, 27, 22]
soft_max_steps = 4096
"#;

    let result: Result<DeviceConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}
