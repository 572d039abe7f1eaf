//! Travel direction of an axis.

use core::fmt;

/// Direction an axis is travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Toward position 0.
    Negative,
    /// Not moving.
    #[default]
    Stopped,
    /// Toward `max_steps`.
    Positive,
}

impl Direction {
    /// Get direction from a signed step delta.
    #[inline]
    pub fn from_delta(delta: i32) -> Self {
        match delta {
            d if d > 0 => Direction::Positive,
            d if d < 0 => Direction::Negative,
            _ => Direction::Stopped,
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Negative => -1,
            Direction::Stopped => 0,
            Direction::Positive => 1,
        }
    }

    /// The opposite direction. `Stopped` stays stopped.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Negative => Direction::Positive,
            Direction::Stopped => Direction::Stopped,
            Direction::Positive => Direction::Negative,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Negative => "negative",
            Direction::Stopped => "stopped",
            Direction::Positive => "positive",
        })
    }
}
