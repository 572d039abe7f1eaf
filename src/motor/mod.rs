//! Motor module for pantilt-stepper.
//!
//! Axis state, phase outputs, endstops and the two-axis motion engine, plus
//! the blocking device surface under `std`.

mod axis;
mod endstop;
mod engine;
mod phases;
pub mod state;
mod status;

#[cfg(feature = "std")]
mod builder;
#[cfg(feature = "std")]
mod device;

pub use axis::{Axis, AxisId, Limit};
pub use endstop::{Debouncer, EndstopInputs, NoEndstop};
pub use engine::{MotionEngine, TickReport};
pub use phases::PhaseOutputs;
pub use state::{Mode, RunState};
pub use status::{Calibration, Status};

#[cfg(feature = "std")]
pub use builder::DeviceBuilder;
#[cfg(feature = "std")]
pub use device::{PanTiltDevice, Session};
