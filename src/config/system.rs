//! Device configuration - root configuration structure.

use serde::Deserialize;

use super::axis::AxisConfig;
use super::limits::SpeedLimits;
use super::units::Millis;
use crate::motor::AxisId;

/// Bounded waits of the command surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Timeouts {
    /// How long Stop waits for the axes to halt.
    #[serde(default = "default_stop_ms", rename = "stop_ms")]
    pub stop: Millis,

    /// How long homing waits for each axis.
    #[serde(default = "default_home_ms", rename = "home_ms")]
    pub home: Millis,

    /// How long a command polls for motion to settle.
    #[serde(default = "default_settle_ms", rename = "settle_ms")]
    pub settle: Millis,
}

fn default_stop_ms() -> Millis {
    Millis(15_000)
}

fn default_home_ms() -> Millis {
    Millis(150_000)
}

fn default_settle_ms() -> Millis {
    Millis(10_000)
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            stop: default_stop_ms(),
            home: default_home_ms(),
            settle: default_settle_ms(),
        }
    }
}

/// Root configuration structure from TOML.
///
/// Set once at attach; nothing here is persisted across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceConfig {
    /// Pan (horizontal) axis.
    pub pan: AxisConfig,

    /// Tilt (vertical) axis.
    pub tilt: AxisConfig,

    /// Hardware timer channel driving the tick source.
    #[serde(default)]
    pub timer_channel: u8,

    /// Delay between an endstop edge and sampling its level.
    #[serde(default = "default_debounce_ms", rename = "debounce_ms")]
    pub debounce: Millis,

    /// Phase outputs are active-low.
    #[serde(default)]
    pub invert_phases: bool,

    /// Swap which phase sequence counts as positive travel.
    #[serde(default)]
    pub invert_direction: bool,

    /// Accepted step rates.
    #[serde(default)]
    pub speed: SpeedLimits,

    /// Command surface waits.
    #[serde(default)]
    pub timeouts: Timeouts,
}

fn default_debounce_ms() -> Millis {
    Millis(5)
}

impl DeviceConfig {
    /// Create a configuration with defaults for everything but the axes.
    pub fn new(pan: AxisConfig, tilt: AxisConfig) -> Self {
        Self {
            pan,
            tilt,
            timer_channel: 0,
            debounce: default_debounce_ms(),
            invert_phases: false,
            invert_direction: false,
            speed: SpeedLimits::default(),
            timeouts: Timeouts::default(),
        }
    }

    /// Get an axis configuration.
    pub fn axis(&self, id: AxisId) -> &AxisConfig {
        match id {
            AxisId::Pan => &self.pan,
            AxisId::Tilt => &self.tilt,
        }
    }
}
