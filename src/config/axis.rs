//! Per-axis configuration from TOML.

use serde::Deserialize;

use crate::motor::AxisId;

/// Pan lookahead window applied by Stop, in steps.
pub const PAN_STOP_WINDOW: u32 = 30;
/// Tilt lookahead window applied by Stop, in steps.
pub const TILT_STOP_WINDOW: u32 = 8;

/// Physical limit switches of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EndstopConfig {
    /// GPIO id of the switch at position 0.
    pub min_pin: u8,

    /// GPIO id of the switch at `max_steps`.
    pub max_pin: u8,

    /// Level the input reads when the switch is pressed.
    #[serde(default)]
    pub active_high: bool,
}

/// Configuration of one stepper axis.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AxisConfig {
    /// GPIO ids of the four phase outputs, phase A first.
    pub phase_pins: [u8; 4],

    /// Software travel ceiling in steps.
    pub soft_max_steps: i32,

    /// Remaining travel Stop lets through before halting.
    #[serde(default)]
    pub stop_window: Option<u32>,

    /// Optional hardware endstops. Absent means soft limits only.
    #[serde(default)]
    pub endstop: Option<EndstopConfig>,
}

impl AxisConfig {
    /// Create an axis configuration with soft limits only.
    pub fn new(phase_pins: [u8; 4], soft_max_steps: i32) -> Self {
        Self {
            phase_pins,
            soft_max_steps,
            stop_window: None,
            endstop: None,
        }
    }

    /// Add hardware endstops.
    pub fn with_endstop(mut self, endstop: EndstopConfig) -> Self {
        self.endstop = Some(endstop);
        self
    }

    /// Override the Stop lookahead window.
    pub fn with_stop_window(mut self, steps: u32) -> Self {
        self.stop_window = Some(steps);
        self
    }

    /// Stop lookahead window, falling back to the axis default.
    pub fn stop_window_for(&self, axis: AxisId) -> u32 {
        self.stop_window.unwrap_or(match axis {
            AxisId::Pan => PAN_STOP_WINDOW,
            AxisId::Tilt => TILT_STOP_WINDOW,
        })
    }

    /// All GPIO ids this axis requests.
    pub fn pins(&self) -> impl Iterator<Item = u8> + '_ {
        self.phase_pins.iter().copied().chain(
            self.endstop
                .iter()
                .flat_map(|e| [e.min_pin, e.max_pin].into_iter()),
        )
    }
}
