//! Phase outputs of one axis.
//!
//! Generic over embedded-hal 1.0 output pins; writes the energization
//! pattern for a logical position and never touches motion state.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::MotorError;
use crate::motion::pattern::{idle_levels, phase_levels, step_index};

/// The four coil outputs of a stepper axis.
pub struct PhaseOutputs<P>
where
    P: OutputPin,
{
    /// Phase A..D pins.
    pins: [P; 4],

    /// Outputs are active-low.
    invert: bool,

    /// Positive travel walks the pattern table backwards.
    reverse: bool,

    /// Whether any coil is currently energized.
    powered: bool,
}

impl<P> PhaseOutputs<P>
where
    P: OutputPin,
{
    /// Wrap four phase pins, phase A first.
    pub fn new(pins: [P; 4], invert: bool, reverse: bool) -> Self {
        Self {
            pins,
            invert,
            reverse,
            powered: false,
        }
    }

    /// Whether the coils are energized.
    #[inline]
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Drive the pattern for `position`.
    pub fn apply_step(&mut self, position: i32) -> Result<(), MotorError> {
        let position = if self.reverse {
            position.wrapping_neg()
        } else {
            position
        };
        let levels = phase_levels(step_index(position), self.invert);
        self.write(levels)?;
        self.powered = true;
        Ok(())
    }

    /// Re-apply the pattern for `position` so holding torque resumes in phase.
    #[inline]
    pub fn power_on(&mut self, position: i32) -> Result<(), MotorError> {
        self.apply_step(position)
    }

    /// De-energize every coil.
    pub fn power_off(&mut self) -> Result<(), MotorError> {
        self.write(idle_levels(self.invert))?;
        self.powered = false;
        Ok(())
    }

    fn write(&mut self, levels: [bool; 4]) -> Result<(), MotorError> {
        for (pin, level) in self.pins.iter_mut().zip(levels) {
            pin.set_state(PinState::from(level))
                .map_err(|_| MotorError::PinError)?;
        }
        Ok(())
    }
}
