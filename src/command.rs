//! Command surface.
//!
//! Requests a caller sends through an open [`Session`](crate::motor::Session)
//! and the replies they produce.

use crate::config::units::StepsPerSec;
use crate::motor::{Calibration, Status};

/// A request to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Halt within the stop window and wait for the axes to stop.
    Stop,
    /// Home both axes, or adopt the supplied calibration if it is non-empty.
    Reset(Calibration),
    /// Relative move in steps.
    Move {
        /// Pan delta.
        dx: i32,
        /// Tilt delta.
        dy: i32,
    },
    /// Read position, travel and speed.
    GetStatus,
    /// Change the step rate.
    SetSpeed(u32),
    /// Return to the middle of both axes' travel.
    GoBack,
    /// Sweep both axes between their bounds until stopped.
    Cruise,
}

impl Command {
    /// Get the command name as a static string.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Stop => "Stop",
            Command::Reset(_) => "Reset",
            Command::Move { .. } => "Move",
            Command::GetStatus => "GetStatus",
            Command::SetSpeed(_) => "SetSpeed",
            Command::GoBack => "GoBack",
            Command::Cruise => "Cruise",
        }
    }
}

/// Whether a move command had anything to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveOutcome {
    /// Motion was published and the tick source started.
    Accepted,
    /// Both clamped deltas were zero; nothing changed.
    NoOp,
}

/// Reply to a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// The command took effect with nothing to report.
    Done,
    /// Outcome of Move, GoBack or Cruise.
    Motion(MoveOutcome),
    /// Calibration after Reset.
    Calibrated(Calibration),
    /// Reply to GetStatus.
    Status(Status),
    /// Speed now in effect after SetSpeed.
    Speed(StepsPerSec),
}
