//! Configuration module for pantilt-stepper.
//!
//! Provides types for loading and validating the device configuration
//! from TOML files (with `std` feature) or pre-built values.

mod axis;
mod limits;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use axis::{AxisConfig, EndstopConfig, PAN_STOP_WINDOW, TILT_STOP_WINDOW};
pub use limits::{SpeedLimits, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
pub use system::{DeviceConfig, Timeouts};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Millis, StepsPerSec};
