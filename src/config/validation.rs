//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::motor::AxisId;

use super::{AxisConfig, DeviceConfig};

/// Validate a device configuration.
///
/// Checks:
/// - Speed bounds are ordered and non-zero
/// - Soft step ceilings are positive
/// - Debounce delay and timeouts are non-zero
/// - No GPIO id is requested twice
pub fn validate_config(config: &DeviceConfig) -> Result<()> {
    if !config.speed.is_valid() {
        return Err(Error::Config(ConfigError::InvalidSpeedRange {
            min: config.speed.min.0,
            default: config.speed.default.0,
            max: config.speed.max.0,
        }));
    }

    for id in AxisId::ALL {
        validate_axis(id, config.axis(id))?;
    }

    if config.debounce.0 == 0 {
        return Err(Error::Config(ConfigError::InvalidDebounce));
    }

    let timeouts = [
        ("stop_ms", config.timeouts.stop),
        ("home_ms", config.timeouts.home),
        ("settle_ms", config.timeouts.settle),
    ];
    for (name, value) in timeouts {
        if value.0 == 0 {
            return Err(Error::Config(ConfigError::InvalidTimeout(name)));
        }
    }

    // Every pin is requested exclusively
    let mut seen: heapless::Vec<u8, 16> = heapless::Vec::new();
    for pin in config.pan.pins().chain(config.tilt.pins()) {
        if seen.contains(&pin) {
            return Err(Error::Config(ConfigError::DuplicatePin(pin)));
        }
        // At most 12 pins exist, capacity cannot be exceeded
        let _ = seen.push(pin);
    }

    Ok(())
}

fn validate_axis(id: AxisId, config: &AxisConfig) -> Result<()> {
    if config.soft_max_steps <= 0 {
        return Err(Error::Config(ConfigError::InvalidSoftLimit {
            axis: id,
            steps: config.soft_max_steps,
        }));
    }

    Ok(())
}
