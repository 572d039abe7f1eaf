//! Endstop inputs and edge debouncing.
//!
//! A raw edge only (re)arms the debounce timer. When the timer expires the
//! input level is sampled and the edge is confirmed if it reads as pressed.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};

use crate::config::EndstopConfig;
use crate::error::MotorError;

use super::axis::{AxisId, Limit};

/// The two limit switches of one axis.
pub struct EndstopInputs<I>
where
    I: InputPin,
{
    min: I,
    max: I,
    active_high: bool,
}

impl<I> EndstopInputs<I>
where
    I: InputPin,
{
    /// Wrap the min and max switch inputs.
    pub fn new(min: I, max: I, active_high: bool) -> Self {
        Self {
            min,
            max,
            active_high,
        }
    }

    /// Wrap the inputs using the polarity from configuration.
    pub fn from_config(min: I, max: I, config: &EndstopConfig) -> Self {
        Self::new(min, max, config.active_high)
    }

    /// Sample a switch; `true` if it reads as pressed.
    pub fn is_triggered(&mut self, limit: Limit) -> Result<bool, MotorError> {
        let pin = match limit {
            Limit::Min => &mut self.min,
            Limit::Max => &mut self.max,
        };
        let high = pin.is_high().map_err(|_| MotorError::InputError)?;
        Ok(high == self.active_high)
    }
}

/// Input pin type for axes without endstops.
///
/// Always reads low; never sampled when no endstop is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEndstop;

impl ErrorType for NoEndstop {
    type Error = Infallible;
}

impl InputPin for NoEndstop {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// Edge interrupts awaiting their debounce sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debouncer {
    /// Pending edges, indexed by axis then limit.
    pending: [[bool; 2]; 2],
    /// Timer running for the pending edges.
    armed: bool,
}

impl Debouncer {
    /// Create an idle debouncer.
    pub const fn new() -> Self {
        Self {
            pending: [[false; 2]; 2],
            armed: false,
        }
    }

    /// Record a raw edge.
    ///
    /// Every edge restarts the debounce window, so the caller re-arms the
    /// timer each time. Edges still pending when it expires share one sample.
    pub fn edge(&mut self, axis: AxisId, limit: Limit) {
        self.pending[axis.index()][limit.index()] = true;
        self.armed = true;
    }

    /// Whether an edge is waiting for its sample.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Take the pending edges when the timer expires.
    pub fn expire(&mut self) -> impl Iterator<Item = (AxisId, Limit)> {
        let pending = core::mem::take(&mut self.pending);
        self.armed = false;
        AxisId::ALL.into_iter().flat_map(move |axis| {
            Limit::ALL
                .into_iter()
                .filter(move |limit| pending[axis.index()][limit.index()])
                .map(move |limit| (axis, limit))
        })
    }
}
