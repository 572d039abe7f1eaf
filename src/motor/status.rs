//! Status and calibration records exchanged with callers.

use crate::config::units::StepsPerSec;
use crate::error::ParamError;

use super::axis::AxisId;
use super::state::RunState;

/// Snapshot returned by GetStatus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    /// Pan position.
    pub x: i32,
    /// Tilt position.
    pub y: i32,
    /// Whether a command is moving the axes.
    pub status: RunState,
    /// Configured step rate.
    pub speed: StepsPerSec,
    /// Pan travel.
    pub x_max: i32,
    /// Tilt travel.
    pub y_max: i32,
}

/// Travel and position of both axes.
///
/// Supplied to Reset to skip the homing sweep, and returned by Reset.
/// An all-zero calibration asks for a physical sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Calibration {
    /// Pan travel.
    pub x_max: i32,
    /// Tilt travel.
    pub y_max: i32,
    /// Pan position.
    pub x_cur: i32,
    /// Tilt position.
    pub y_cur: i32,
}

impl Calibration {
    /// Create a calibration.
    pub const fn new(x_max: i32, y_max: i32, x_cur: i32, y_cur: i32) -> Self {
        Self {
            x_max,
            y_max,
            x_cur,
            y_cur,
        }
    }

    /// Whether this asks for a physical sweep.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Travel and position of one axis.
    pub fn axis(&self, id: AxisId) -> (i32, i32) {
        match id {
            AxisId::Pan => (self.x_max, self.x_cur),
            AxisId::Tilt => (self.y_max, self.y_cur),
        }
    }

    /// Check `max > 0` and `0 <= cur <= max` on both axes.
    pub fn validate(&self) -> Result<(), ParamError> {
        for id in AxisId::ALL {
            let (max_steps, cur_steps) = self.axis(id);
            if max_steps <= 0 || !(0..=max_steps).contains(&cur_steps) {
                return Err(ParamError::InconsistentCalibration {
                    axis: id,
                    max_steps,
                    cur_steps,
                });
            }
        }
        Ok(())
    }
}
