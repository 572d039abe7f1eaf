//! # pantilt-stepper
//!
//! Interrupt-driven dual-axis stepper engine for pan/tilt fixtures, with
//! embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Proportional interpolation**: diagonal moves step both axes along a
//!   Bresenham line
//! - **embedded-hal 1.0**: Uses `OutputPin` for the four coil phases and
//!   `InputPin` for endstops
//! - **no_std compatible**: The motion engine and tick handler work without
//!   the standard library
//! - **Homing**: Calibrates travel against hardware endstops or a soft ceiling
//! - **Cruise**: Continuous sweep between the calibrated bounds
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pantilt_stepper::{AxisId, PanTiltDevice, TimerChannels};
//!
//! let config = pantilt_stepper::load_config("pantilt.toml")?;
//!
//! let device = PanTiltDevice::builder()
//!     .config(config)
//!     .phase_pins(AxisId::Pan, pan_pins)
//!     .phase_pins(AxisId::Tilt, tilt_pins)
//!     .tick_source(timer)
//!     .debounce_timer(debounce)
//!     .channels(TimerChannels::new())
//!     .build()?;
//!
//! // Hook device.on_tick() to the timer interrupt, then:
//! let session = device.open()?;
//! session.reset(Default::default())?;
//! session.move_by(120, -40);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): TOML loading and the blocking command surface
//! - `log` (default): Logging through the `log` facade
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod hal;
pub mod motion;
pub mod motor;

#[cfg(feature = "std")]
pub mod command;
#[cfg(feature = "std")]
pub mod registry;
#[cfg(feature = "std")]
pub mod sync;

// Re-exports for ergonomic API
pub use config::{validate_config, AxisConfig, DeviceConfig, EndstopConfig, SpeedLimits};
pub use error::{Error, Result};
pub use hal::{OneShotTimer, TickSource};
pub use motion::Direction;
pub use motor::{AxisId, Calibration, Limit, MotionEngine, Mode, NoEndstop, RunState, Status};

#[cfg(feature = "std")]
pub use command::{Command, MoveOutcome, Response};
#[cfg(feature = "std")]
pub use motor::{DeviceBuilder, PanTiltDevice, Session};
#[cfg(feature = "std")]
pub use registry::{ChannelClaim, TimerChannels};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Millis, StepsPerSec};
