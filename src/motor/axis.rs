//! Per-axis motion state.

use core::fmt;

use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::AxisConfig;
use crate::error::MotorError;
use crate::motion::Direction;

use super::endstop::EndstopInputs;
use super::phases::PhaseOutputs;
use super::state::Mode;

/// Identifies one of the two axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisId {
    /// Horizontal axis.
    Pan,
    /// Vertical axis.
    Tilt,
}

impl AxisId {
    /// Both axes, pan first.
    pub const ALL: [AxisId; 2] = [AxisId::Pan, AxisId::Tilt];

    /// Array index of this axis.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            AxisId::Pan => 0,
            AxisId::Tilt => 1,
        }
    }

    /// Get the axis name as a static string.
    pub const fn name(self) -> &'static str {
        match self {
            AxisId::Pan => "pan",
            AxisId::Tilt => "tilt",
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One end of an axis's travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Limit {
    /// Position 0.
    Min,
    /// Position `max_steps`.
    Max,
}

impl Limit {
    /// Both limits, min first.
    pub const ALL: [Limit; 2] = [Limit::Min, Limit::Max];

    /// Array index of this limit.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Limit::Min => 0,
            Limit::Max => 1,
        }
    }

    /// Direction of travel that runs into this limit.
    #[inline]
    pub const fn approach(self) -> Direction {
        match self {
            Limit::Min => Direction::Negative,
            Limit::Max => Direction::Positive,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Limit::Min => "min",
            Limit::Max => "max",
        })
    }
}

/// One stepper axis: position, calibrated travel, mode and homing bookkeeping.
///
/// `0 <= current_steps <= max_steps` holds between ticks.
pub struct Axis<P, I>
where
    P: OutputPin,
    I: InputPin,
{
    id: AxisId,

    /// Logical position in steps.
    pub(crate) current_steps: i32,

    /// Calibrated travel upper bound; the lower bound is 0.
    pub(crate) max_steps: i32,

    /// Current travel direction.
    pub(crate) direction: Direction,

    /// Operating mode.
    pub(crate) mode: Mode,

    /// Homing odometer.
    pub(crate) total_steps: i32,

    /// Min endstop seen during homing.
    pub(crate) reached_min: bool,

    /// Max endstop seen during homing.
    pub(crate) reached_max: bool,

    /// Configured software ceiling.
    soft_max_steps: i32,

    /// Travel Stop lets through before halting.
    stop_window: u32,

    phases: PhaseOutputs<P>,

    endstops: Option<EndstopInputs<I>>,
}

impl<P, I> Axis<P, I>
where
    P: OutputPin,
    I: InputPin,
{
    /// Create an axis centred in its soft range with coils unpowered.
    pub fn new(
        id: AxisId,
        config: &AxisConfig,
        phases: PhaseOutputs<P>,
        endstops: Option<EndstopInputs<I>>,
    ) -> Self {
        Self {
            id,
            current_steps: config.soft_max_steps / 2,
            max_steps: config.soft_max_steps,
            direction: Direction::Stopped,
            mode: Mode::Stop,
            total_steps: 0,
            reached_min: false,
            reached_max: false,
            soft_max_steps: config.soft_max_steps,
            stop_window: config.stop_window_for(id),
            phases,
            endstops,
        }
    }

    /// Which axis this is.
    #[inline]
    pub fn id(&self) -> AxisId {
        self.id
    }

    /// Logical position in steps.
    #[inline]
    pub fn position(&self) -> i32 {
        self.current_steps
    }

    /// Calibrated travel.
    #[inline]
    pub fn max_steps(&self) -> i32 {
        self.max_steps
    }

    /// Configured software ceiling.
    #[inline]
    pub fn soft_max_steps(&self) -> i32 {
        self.soft_max_steps
    }

    /// Current travel direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Operating mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Homing odometer.
    #[inline]
    pub fn total_steps(&self) -> i32 {
        self.total_steps
    }

    /// Min endstop seen during the current homing.
    #[inline]
    pub fn reached_min(&self) -> bool {
        self.reached_min
    }

    /// Max endstop seen during the current homing.
    #[inline]
    pub fn reached_max(&self) -> bool {
        self.reached_max
    }

    /// Stop lookahead window in steps.
    #[inline]
    pub fn stop_window(&self) -> u32 {
        self.stop_window
    }

    /// Whether hardware endstops are fitted.
    #[inline]
    pub fn has_endstops(&self) -> bool {
        self.endstops.is_some()
    }

    /// Whether the coils are energized.
    #[inline]
    pub fn is_powered(&self) -> bool {
        self.phases.is_powered()
    }

    /// Position of a limit.
    #[inline]
    pub fn bound(&self, limit: Limit) -> i32 {
        match limit {
            Limit::Min => 0,
            Limit::Max => self.max_steps,
        }
    }

    /// Clamp a requested delta against the known travel.
    ///
    /// A delta toward a bound the axis already sits on becomes 0; otherwise
    /// the target is kept inside `[0, max_steps]`.
    pub fn clamp_delta(&self, delta: i32) -> i32 {
        let target = self.current_steps.saturating_add(delta);
        target.clamp(0, self.max_steps.max(0)) - self.current_steps
    }

    /// The limit this axis has run into, if any.
    ///
    /// Axes homing against hardware endstops are left to the switches.
    pub fn soft_boundary(&self) -> Option<Limit> {
        if !self.mode.is_active() || (self.mode == Mode::Reset && self.has_endstops()) {
            return None;
        }
        match self.direction {
            Direction::Positive if self.current_steps >= self.max_steps => Some(Limit::Max),
            Direction::Negative if self.current_steps <= 0 => Some(Limit::Min),
            _ => None,
        }
    }

    /// Enter `mode` travelling in `direction`.
    pub(crate) fn start(&mut self, mode: Mode, direction: Direction) {
        self.mode = mode;
        self.direction = direction;
    }

    /// Halt in place.
    pub(crate) fn halt(&mut self) {
        self.mode = Mode::Stop;
        self.direction = Direction::Stopped;
    }

    /// Snap the position to a limit.
    pub(crate) fn snap_to(&mut self, limit: Limit) {
        self.current_steps = self.bound(limit);
    }

    /// Adopt a calibration.
    pub(crate) fn calibrate(&mut self, max_steps: i32, current_steps: i32) {
        self.max_steps = max_steps;
        self.current_steps = current_steps;
    }

    /// Prepare a homing sweep toward the positive end.
    ///
    /// Without endstops the sweep starts from 0 and runs the full soft range,
    /// so the odometer ends at the travel. With endstops the start position
    /// is nominal; the switches fix it.
    pub(crate) fn begin_homing(&mut self) {
        self.total_steps = 0;
        self.reached_min = false;
        self.reached_max = false;
        self.max_steps = self.soft_max_steps;
        self.current_steps = if self.has_endstops() {
            self.soft_max_steps / 2
        } else {
            0
        };
        self.start(Mode::Reset, Direction::Positive);
    }

    /// Move one step in the current direction and drive the new pattern.
    pub(crate) fn advance(&mut self) -> Result<(), MotorError> {
        self.current_steps += self.direction.sign();
        self.phases.apply_step(self.current_steps)
    }

    /// Energize the coils at the current position.
    pub(crate) fn power_on(&mut self) -> Result<(), MotorError> {
        self.phases.power_on(self.current_steps)
    }

    /// De-energize the coils.
    pub(crate) fn power_off(&mut self) -> Result<(), MotorError> {
        self.phases.power_off()
    }

    /// Sample an endstop. Axes without endstops never report a hit.
    pub(crate) fn endstop_triggered(&mut self, limit: Limit) -> Result<bool, MotorError> {
        match self.endstops.as_mut() {
            Some(inputs) => inputs.is_triggered(limit),
            None => Ok(false),
        }
    }
}
