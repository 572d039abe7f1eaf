//! Unit tests for configuration validation.

use pantilt_stepper::config::{
    parse_config, validate_config, AxisConfig, DeviceConfig, EndstopConfig, SpeedLimits,
    StepsPerSec,
};
use pantilt_stepper::error::{ConfigError, Error};
use pantilt_stepper::AxisId;

fn config() -> DeviceConfig {
    DeviceConfig::new(
        AxisConfig::new([17, 18, 27, 22], 4096),
        AxisConfig::new([5, 6, 13, 19], 1024),
    )
}

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let mut config = config();
    config.pan = config.pan.with_endstop(EndstopConfig {
        min_pin: 23,
        max_pin: 24,
        active_high: true,
    });
    config.tilt = config.tilt.with_endstop(EndstopConfig {
        min_pin: 25,
        max_pin: 26,
        active_high: false,
    });
    assert!(validate_config(&config).is_ok());
}

/// Test speed bounds must be ordered.
#[test]
fn test_default_speed_above_max() {
    let mut config = config();
    config.speed = SpeedLimits::new(StepsPerSec(100), StepsPerSec(1000), StepsPerSec(900));

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidSpeedRange {
            min: 100,
            default: 1000,
            max: 900,
        }))
    );
}

/// Test a zero minimum speed is rejected.
#[test]
fn test_zero_min_speed() {
    let mut config = config();
    config.speed.min = StepsPerSec(0);
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidSpeedRange { .. }))
    ));
}

/// Test a negative soft ceiling is rejected.
#[test]
fn test_negative_soft_limit() {
    let mut config = config();
    config.pan.soft_max_steps = -10;

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidSoftLimit {
            axis: AxisId::Pan,
            steps: -10,
        }))
    );
}

/// Test a phase pin repeated inside one axis.
#[test]
fn test_duplicate_phase_pin() {
    let mut config = config();
    config.tilt.phase_pins = [5, 6, 6, 19];

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::DuplicatePin(6)))
    );
}

/// Test an endstop wired to a phase output of the other axis.
#[test]
fn test_endstop_collides_with_phase_pin() {
    let mut config = config();
    config.pan.endstop = Some(EndstopConfig {
        min_pin: 23,
        max_pin: 13,
        active_high: false,
    });

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::DuplicatePin(13)))
    );
}

/// Test zero debounce through the TOML loader.
#[test]
fn test_zero_debounce_from_toml() {
    let toml_str = r#"
debounce_ms = 0

[pan]
phase_pins = [17, 18, 27, 22]
soft_max_steps = 4096

[tilt]
phase_pins = [5, 6, 13, 19]
soft_max_steps = 1024
"#;

    assert_eq!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::InvalidDebounce))
    );
}

/// Test a zero stop timeout through the TOML loader.
#[test]
fn test_zero_stop_timeout_from_toml() {
    let toml_str = r#"
[timeouts]
stop_ms = 0

[pan]
phase_pins = [17, 18, 27, 22]
soft_max_steps = 4096

[tilt]
phase_pins = [5, 6, 13, 19]
soft_max_steps = 1024
"#;

    assert_eq!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::InvalidTimeout("stop_ms")))
    );
}

/// Test malformed TOML surfaces as a parse error.
#[test]
fn test_malformed_toml() {
    assert!(matches!(
        parse_config("[pan\nphase_pins = 1"),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}
