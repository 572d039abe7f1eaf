//! Unit types for timing quantities.
//!
//! Keeps step rates and durations apart so a speed is never passed where a
//! timer period is expected.

use serde::Deserialize;

/// Step rate in steps (ticks) per second.
///
/// One tick of the tick source advances each active axis by at most one step,
/// so this is also the tick frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
pub struct StepsPerSec(pub u32);

impl StepsPerSec {
    /// Create a new StepsPerSec value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Tick period in microseconds for this rate.
    ///
    /// A zero rate yields `u32::MAX`.
    #[inline]
    pub const fn period_us(self) -> u32 {
        if self.0 == 0 {
            u32::MAX
        } else {
            1_000_000 / self.0
        }
    }
}

/// Duration in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
pub struct Millis(pub u32);

impl Millis {
    /// Create a new Millis value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Convert to a std duration.
    #[cfg(feature = "std")]
    #[inline]
    pub fn as_duration(self) -> std::time::Duration {
        std::time::Duration::from_millis(u64::from(self.0))
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to StepsPerSec.
    fn steps_per_sec(self) -> StepsPerSec;
    /// Convert to Millis.
    fn millis(self) -> Millis;
}

impl UnitExt for u32 {
    #[inline]
    fn steps_per_sec(self) -> StepsPerSec {
        StepsPerSec(self)
    }

    #[inline]
    fn millis(self) -> Millis {
        Millis(self)
    }
}
