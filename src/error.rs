//! Error types for pantilt-stepper.
//!
//! Provides unified error handling across configuration, the command surface,
//! and hardware interaction.

use core::fmt;

use crate::motor::AxisId;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all pantilt-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Command issued while the device cannot accept it
    State(StateError),
    /// Command parameter rejected
    Param(ParamError),
    /// A bounded wait expired
    Timeout(TimeoutError),
    /// Hardware interaction error
    Motor(MotorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Speed bounds are not ordered `0 < min <= default <= max`
    InvalidSpeedRange {
        /// Minimum speed
        min: u32,
        /// Default speed
        default: u32,
        /// Maximum speed
        max: u32,
    },
    /// Soft step ceiling must be positive
    InvalidSoftLimit {
        /// Offending axis
        axis: AxisId,
        /// Configured ceiling
        steps: i32,
    },
    /// Debounce delay must be non-zero
    InvalidDebounce,
    /// A timeout must be non-zero
    InvalidTimeout(&'static str),
    /// The same GPIO id is assigned twice
    DuplicatePin(u8),
    /// Endstops are configured but no input pins were supplied (or vice versa)
    EndstopMismatch(AxisId),
    /// A required builder part was not supplied
    Missing(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Device state errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// The device already has an open session
    Busy,
    /// The tick source timer channel is owned by another driver
    ChannelClaimed(u8),
}

/// Parameter errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    /// Requested speed is outside the configured bounds
    SpeedOutOfRange {
        /// Requested speed
        requested: u32,
        /// Minimum allowed
        min: u32,
        /// Maximum allowed
        max: u32,
    },
    /// Supplied calibration is internally inconsistent
    InconsistentCalibration {
        /// Offending axis
        axis: AxisId,
        /// Supplied travel
        max_steps: i32,
        /// Supplied position
        cur_steps: i32,
    },
}

/// Bounded waits that can expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutError {
    /// Stop did not complete in time
    Stop,
    /// Homing sweep of an axis did not complete in time
    Homing(AxisId),
    /// Motion did not settle in time
    Settle,
}

/// Motor hardware errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// Phase output write failed
    PinError,
    /// Endstop input read failed
    InputError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::State(e) => write!(f, "State error: {}", e),
            Error::Param(e) => write!(f, "Parameter error: {}", e),
            Error::Timeout(e) => write!(f, "Timeout: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidSpeedRange { min, default, max } => write!(
                f,
                "Invalid speed range: need 0 < min ({}) <= default ({}) <= max ({})",
                min, default, max
            ),
            ConfigError::InvalidSoftLimit { axis, steps } => {
                write!(f, "Invalid soft limit for {}: {}. Must be > 0", axis, steps)
            }
            ConfigError::InvalidDebounce => write!(f, "Debounce delay must be > 0"),
            ConfigError::InvalidTimeout(name) => write!(f, "Timeout '{}' must be > 0", name),
            ConfigError::DuplicatePin(pin) => write!(f, "GPIO {} assigned more than once", pin),
            ConfigError::EndstopMismatch(axis) => {
                write!(f, "Endstop pins and endstop configuration disagree for {}", axis)
            }
            ConfigError::Missing(part) => write!(f, "{} is required", part),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::Busy => write!(f, "Device is already open"),
            StateError::ChannelClaimed(ch) => write!(f, "Timer channel {} is already claimed", ch),
        }
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::SpeedOutOfRange { requested, min, max } => {
                write!(f, "Speed {} outside [{}, {}]", requested, min, max)
            }
            ParamError::InconsistentCalibration {
                axis,
                max_steps,
                cur_steps,
            } => write!(
                f,
                "Calibration for {} inconsistent: position {} outside [0, {}]",
                axis, cur_steps, max_steps
            ),
        }
    }
}

impl fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeoutError::Stop => write!(f, "stop did not complete"),
            TimeoutError::Homing(axis) => write!(f, "homing of {} did not complete", axis),
            TimeoutError::Settle => write!(f, "motion did not settle"),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO phase output failed"),
            MotorError::InputError => write!(f, "GPIO endstop input failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<StateError> for Error {
    fn from(e: StateError) -> Self {
        Error::State(e)
    }
}

impl From<ParamError> for Error {
    fn from(e: ParamError) -> Self {
        Error::Param(e)
    }
}

impl From<TimeoutError> for Error {
    fn from(e: TimeoutError) -> Self {
        Error::Timeout(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for StateError {}

#[cfg(feature = "std")]
impl std::error::Error for ParamError {}

#[cfg(feature = "std")]
impl std::error::Error for TimeoutError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}
