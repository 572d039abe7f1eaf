//! Builder pattern for PanTiltDevice.

use std::sync::Arc;

use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::{validate_config, DeviceConfig};
use crate::error::{ConfigError, Error, Result};
use crate::hal::{OneShotTimer, TickSource};
use crate::registry::TimerChannels;

use super::axis::{Axis, AxisId};
use super::device::PanTiltDevice;
use super::endstop::EndstopInputs;
use super::engine::MotionEngine;
use super::phases::PhaseOutputs;

/// Builder for attaching a [`PanTiltDevice`].
///
/// Every part is required except endstop pins, which must be supplied exactly
/// for the axes whose configuration has an `endstop` table.
pub struct DeviceBuilder<P, I, T, D>
where
    P: OutputPin,
    I: InputPin,
    T: TickSource,
    D: OneShotTimer,
{
    config: Option<DeviceConfig>,
    phase_pins: [Option<[P; 4]>; 2],
    endstop_pins: [Option<(I, I)>; 2],
    ticker: Option<T>,
    debounce_timer: Option<D>,
    channels: Option<Arc<TimerChannels>>,
    name: heapless::String<32>,
}

impl<P, I, T, D> Default for DeviceBuilder<P, I, T, D>
where
    P: OutputPin,
    I: InputPin,
    T: TickSource,
    D: OneShotTimer,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, I, T, D> DeviceBuilder<P, I, T, D>
where
    P: OutputPin,
    I: InputPin,
    T: TickSource,
    D: OneShotTimer,
{
    /// Create a new builder.
    pub fn new() -> Self {
        let mut name = heapless::String::new();
        let _ = name.push_str("pantilt");
        Self {
            config: None,
            phase_pins: [None, None],
            endstop_pins: [None, None],
            ticker: None,
            debounce_timer: None,
            channels: None,
            name,
        }
    }

    /// Set the device configuration.
    pub fn config(mut self, config: DeviceConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the four phase outputs of an axis, phase A first.
    pub fn phase_pins(mut self, axis: AxisId, pins: [P; 4]) -> Self {
        self.phase_pins[axis.index()] = Some(pins);
        self
    }

    /// Set the min and max endstop inputs of an axis.
    pub fn endstop_pins(mut self, axis: AxisId, min: I, max: I) -> Self {
        self.endstop_pins[axis.index()] = Some((min, max));
        self
    }

    /// Set the periodic tick source.
    pub fn tick_source(mut self, ticker: T) -> Self {
        self.ticker = Some(ticker);
        self
    }

    /// Set the one-shot debounce timer.
    pub fn debounce_timer(mut self, timer: D) -> Self {
        self.debounce_timer = Some(timer);
        self
    }

    /// Set the registry the timer channel is claimed from.
    pub fn channels(mut self, channels: Arc<TimerChannels>) -> Self {
        self.channels = Some(channels);
        self
    }

    /// Set the owner name recorded with the timer channel claim.
    pub fn name(mut self, name: &str) -> Self {
        if let Ok(name) = heapless::String::try_from(name) {
            self.name = name;
        }
        self
    }

    /// Build the device and claim its timer channel.
    ///
    /// # Errors
    ///
    /// Returns an error if a required part is missing, the configuration is
    /// invalid, endstop pins disagree with the configuration, or the timer
    /// channel is already claimed.
    pub fn build(self) -> Result<PanTiltDevice<P, I, T, D>> {
        let config = self.config.ok_or(Error::Config(ConfigError::Missing("config")))?;
        validate_config(&config)?;

        let ticker = self
            .ticker
            .ok_or(Error::Config(ConfigError::Missing("tick source")))?;
        let debounce_timer = self
            .debounce_timer
            .ok_or(Error::Config(ConfigError::Missing("debounce timer")))?;
        let channels = self
            .channels
            .ok_or(Error::Config(ConfigError::Missing("timer channels")))?;

        let [pan_pins, tilt_pins] = self.phase_pins;
        let [pan_endstops, tilt_endstops] = self.endstop_pins;
        let pan = build_axis(&config, AxisId::Pan, pan_pins, pan_endstops)?;
        let tilt = build_axis(&config, AxisId::Tilt, tilt_pins, tilt_endstops)?;

        let claim = channels.claim(config.timer_channel, &self.name)?;
        info!(
            "{} attached on timer channel {}",
            self.name.as_str(),
            config.timer_channel
        );

        Ok(PanTiltDevice::new(
            &config,
            MotionEngine::new(pan, tilt),
            ticker,
            debounce_timer,
            claim,
        ))
    }
}

fn build_axis<P, I>(
    config: &DeviceConfig,
    id: AxisId,
    pins: Option<[P; 4]>,
    endstop_pins: Option<(I, I)>,
) -> Result<Axis<P, I>>
where
    P: OutputPin,
    I: InputPin,
{
    let axis_config = config.axis(id);
    let pins = pins.ok_or(Error::Config(ConfigError::Missing(match id {
        AxisId::Pan => "pan phase pins",
        AxisId::Tilt => "tilt phase pins",
    })))?;

    let endstops = match (&axis_config.endstop, endstop_pins) {
        (Some(endstop), Some((min, max))) => Some(EndstopInputs::from_config(min, max, endstop)),
        (None, None) => None,
        _ => return Err(Error::Config(ConfigError::EndstopMismatch(id))),
    };

    let phases = PhaseOutputs::new(pins, config.invert_phases, config.invert_direction);
    Ok(Axis::new(id, axis_config, phases, endstops))
}
