//! Speed bounds configuration.

use serde::Deserialize;

use super::units::StepsPerSec;
use crate::error::ParamError;

/// Lowest accepted speed when none is configured.
pub const MIN_SPEED: StepsPerSec = StepsPerSec(100);
/// Speed applied at attach when none is configured.
pub const DEFAULT_SPEED: StepsPerSec = StepsPerSec(400);
/// Highest accepted speed when none is configured.
pub const MAX_SPEED: StepsPerSec = StepsPerSec(900);

/// Accepted step-rate range and the rate applied at attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SpeedLimits {
    /// Minimum accepted speed.
    #[serde(default = "default_min")]
    pub min: StepsPerSec,

    /// Speed in effect until the first SetSpeed.
    #[serde(default = "default_default")]
    pub default: StepsPerSec,

    /// Maximum accepted speed.
    #[serde(default = "default_max")]
    pub max: StepsPerSec,
}

fn default_min() -> StepsPerSec {
    MIN_SPEED
}

fn default_default() -> StepsPerSec {
    DEFAULT_SPEED
}

fn default_max() -> StepsPerSec {
    MAX_SPEED
}

impl Default for SpeedLimits {
    fn default() -> Self {
        Self {
            min: MIN_SPEED,
            default: DEFAULT_SPEED,
            max: MAX_SPEED,
        }
    }
}

impl SpeedLimits {
    /// Create new speed limits.
    pub fn new(min: StepsPerSec, default: StepsPerSec, max: StepsPerSec) -> Self {
        Self { min, default, max }
    }

    /// Check if the bounds are ordered `0 < min <= default <= max`.
    pub fn is_valid(&self) -> bool {
        self.min.0 > 0 && self.min <= self.default && self.default <= self.max
    }

    /// Check if a speed is within bounds.
    pub fn contains(&self, speed: StepsPerSec) -> bool {
        speed >= self.min && speed <= self.max
    }

    /// Accept a requested speed or report the bounds it violates.
    pub fn check(&self, speed: StepsPerSec) -> Result<StepsPerSec, ParamError> {
        if self.contains(speed) {
            Ok(speed)
        } else {
            Err(ParamError::SpeedOutOfRange {
                requested: speed.0,
                min: self.min.0,
                max: self.max.0,
            })
        }
    }
}
