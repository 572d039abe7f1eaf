//! Two-axis motion engine.
//!
//! Owns both axes, the active move and the step-spread accumulator. Every
//! method is non-blocking: [`MotionEngine::tick`] runs from the hardware
//! timer interrupt and [`MotionEngine::debounce_expired`] from the debounce
//! timer, while the command surface calls the `begin_*` methods to publish
//! new work. Callers serialize access (see `PanTiltDevice`).

use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::units::StepsPerSec;
use crate::error::ParamError;
use crate::motion::{Direction, MoveDescriptor, MoveProgress, SpreadStep, StepSpread};

use super::axis::{Axis, AxisId, Limit};
use super::endstop::Debouncer;
use super::state::Mode;
use super::status::{Calibration, Status};

/// Completions a tick or debounce sample produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub struct TickReport {
    /// A requested stop has fully taken effect.
    pub stop_complete: bool,
    /// The tick found both axes halted and released their coils.
    pub idle: bool,
    /// Homing finished for the axis at this index.
    pub homed: [bool; 2],
}

impl TickReport {
    /// Whether homing finished for an axis.
    #[inline]
    pub fn homed(&self, id: AxisId) -> bool {
        self.homed[id.index()]
    }
}

/// Motion state of the whole device.
pub struct MotionEngine<P, I>
where
    P: OutputPin,
    I: InputPin,
{
    axes: [Axis<P, I>; 2],

    /// Aggregate mode.
    mode: Mode,

    /// Active NORMAL move.
    destination: MoveDescriptor,

    /// Progress through `destination`.
    progress: MoveProgress,

    spread: StepSpread,

    /// Stop waits for the next idle tick.
    stop_requested: bool,

    debouncer: Debouncer,
}

impl<P, I> MotionEngine<P, I>
where
    P: OutputPin,
    I: InputPin,
{
    /// Create an idle engine.
    pub fn new(pan: Axis<P, I>, tilt: Axis<P, I>) -> Self {
        Self {
            axes: [pan, tilt],
            mode: Mode::Stop,
            destination: MoveDescriptor::default(),
            progress: MoveProgress::default(),
            spread: StepSpread::default(),
            stop_requested: false,
            debouncer: Debouncer::new(),
        }
    }

    /// Get an axis.
    #[inline]
    pub fn axis(&self, id: AxisId) -> &Axis<P, I> {
        &self.axes[id.index()]
    }

    #[inline]
    fn axis_mut(&mut self, id: AxisId) -> &mut Axis<P, I> {
        &mut self.axes[id.index()]
    }

    /// Aggregate mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Active NORMAL move.
    #[inline]
    pub fn destination(&self) -> &MoveDescriptor {
        &self.destination
    }

    /// Progress through the active move.
    #[inline]
    pub fn progress(&self) -> &MoveProgress {
        &self.progress
    }

    /// Whether a Stop is waiting for the axes to halt.
    #[inline]
    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Whether nothing is moving.
    pub fn is_idle(&self) -> bool {
        self.mode == Mode::Stop && self.axes.iter().all(|a| !a.mode().is_active())
    }

    /// Snapshot for GetStatus.
    pub fn status(&self, speed: StepsPerSec) -> Status {
        let [pan, tilt] = &self.axes;
        Status {
            x: pan.position(),
            y: tilt.position(),
            status: self.mode.into(),
            speed,
            x_max: pan.max_steps(),
            y_max: tilt.max_steps(),
        }
    }

    /// Travel and position of both axes.
    pub fn calibration(&self) -> Calibration {
        let [pan, tilt] = &self.axes;
        Calibration::new(
            pan.max_steps(),
            tilt.max_steps(),
            pan.position(),
            tilt.position(),
        )
    }

    /// Deltas that bring both axes to the middle of their travel.
    pub fn centre_offset(&self) -> (i32, i32) {
        let [pan, tilt] = &self.axes;
        (
            pan.max_steps() / 2 - pan.position(),
            tilt.max_steps() / 2 - tilt.position(),
        )
    }

    /// Publish a relative move.
    ///
    /// Each delta is clamped against the known travel first. Returns `false`,
    /// leaving everything untouched, when nothing is left to move.
    pub fn begin_move(&mut self, dx: i32, dy: i32) -> bool {
        let dx = self.axis(AxisId::Pan).clamp_delta(dx);
        let dy = self.axis(AxisId::Tilt).clamp_delta(dy);
        if dx == 0 && dy == 0 {
            return false;
        }

        self.plan(dx, dy);
        self.mode = Mode::Normal;
        for id in AxisId::ALL {
            if self.axis(id).mode() == Mode::Normal {
                self.power_on(id);
            }
        }
        debug!(
            "move {} {} as {} x ({}, {})",
            dx,
            dy,
            self.destination.times,
            self.destination.x,
            self.destination.y
        );
        self.refresh_mode();
        true
    }

    /// Start oscillating both calibrated axes between their bounds.
    ///
    /// Returns `false` when neither axis has any travel.
    pub fn begin_cruise(&mut self) -> bool {
        let mut started = false;
        for id in AxisId::ALL {
            let axis = self.axis_mut(id);
            if axis.max_steps() <= 0 {
                axis.halt();
                continue;
            }
            let direction = if axis.position() >= axis.max_steps() {
                Direction::Negative
            } else {
                Direction::Positive
            };
            axis.start(Mode::Cruise, direction);
            self.power_on(id);
            started = true;
        }
        if started {
            self.mode = Mode::Cruise;
            info!("cruise started");
        }
        self.refresh_mode();
        started
    }

    /// Start the homing sweep on both axes.
    pub fn begin_homing(&mut self) {
        self.stop_requested = false;
        self.destination = MoveDescriptor::default();
        self.progress = MoveProgress::default();
        self.mode = Mode::Reset;
        for id in AxisId::ALL {
            self.axis_mut(id).begin_homing();
            self.power_on(id);
        }
        info!("homing started");
        self.refresh_mode();
    }

    /// Adopt a caller-supplied calibration instead of sweeping.
    pub fn calibrate(&mut self, calibration: &Calibration) -> Result<(), ParamError> {
        calibration.validate()?;
        for id in AxisId::ALL {
            let (max_steps, cur_steps) = calibration.axis(id);
            self.axis_mut(id).calibrate(max_steps, cur_steps);
        }
        info!(
            "calibration adopted: pan {}/{} tilt {}/{}",
            calibration.x_cur,
            calibration.x_max,
            calibration.y_cur,
            calibration.y_max
        );
        Ok(())
    }

    /// Ask the axes to halt.
    ///
    /// A NORMAL move keeps at most each axis's stop window of its remaining
    /// travel; CRUISE reverts to NORMAL with nothing pending. The stop takes
    /// effect on the first tick that finds both axes stopped, which reports
    /// `stop_complete`. Returns `false` if the device is already idle.
    pub fn request_stop(&mut self) -> bool {
        if self.is_idle() {
            return false;
        }
        match self.mode {
            Mode::Normal => {
                let (rx, ry) = self.progress.remaining(&self.destination);
                let dx = self.clip_to_window(AxisId::Pan, rx);
                let dy = self.clip_to_window(AxisId::Tilt, ry);
                debug!("stop: pending travel cut to {} {}", dx, dy);
                self.plan(dx, dy);
            }
            Mode::Cruise => {
                self.plan(0, 0);
                self.mode = Mode::Normal;
            }
            Mode::Reset | Mode::Stop => {
                for axis in self.axes.iter_mut() {
                    axis.halt();
                }
            }
        }
        self.stop_requested = true;
        true
    }

    /// Halt and de-energize immediately.
    pub fn force_stop(&mut self) {
        for id in AxisId::ALL {
            self.axis_mut(id).halt();
            self.power_off(id);
        }
        self.destination = MoveDescriptor::default();
        self.progress = MoveProgress::default();
        self.stop_requested = false;
        self.mode = Mode::Stop;
        warn!("forced stop");
    }

    /// Run one timer period.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        if self.axes.iter().all(|a| !a.mode().is_active()) {
            self.mode = Mode::Stop;
            report.idle = true;
            for id in AxisId::ALL {
                if self.axis(id).is_powered() {
                    self.power_off(id);
                }
            }
            if core::mem::take(&mut self.stop_requested) {
                report.stop_complete = true;
            }
            return report;
        }

        for id in AxisId::ALL {
            if let Some(limit) = self.axis(id).soft_boundary() {
                report.homed[id.index()] |= self.on_limit(id, limit);
            }
        }

        match self.mode {
            Mode::Normal => self.normal_tick(),
            Mode::Cruise => self.sweep_tick(Mode::Cruise),
            Mode::Reset => self.sweep_tick(Mode::Reset),
            Mode::Stop => {}
        }

        self.refresh_mode();
        report
    }

    /// Record a raw endstop edge.
    ///
    /// Returns `true` when the debounce timer must be (re)armed, which is
    /// every edge on an axis fitted with endstops.
    pub fn endstop_edge(&mut self, id: AxisId, limit: Limit) -> bool {
        if !self.axis(id).has_endstops() {
            return false;
        }
        self.debouncer.edge(id, limit);
        true
    }

    /// Sample every pending endstop and act on confirmed hits.
    pub fn debounce_expired(&mut self) -> TickReport {
        let mut report = TickReport::default();
        let fired: heapless::Vec<(AxisId, Limit), 4> = self.debouncer.expire().collect();
        for (id, limit) in fired {
            match self.axis_mut(id).endstop_triggered(limit) {
                Ok(true) => {
                    debug!("{} {} endstop confirmed", id, limit);
                    report.homed[id.index()] |= self.on_limit(id, limit);
                }
                Ok(false) => trace!("{} {} endstop bounce ignored", id, limit),
                Err(_) => warn!("{} {} endstop read failed", id, limit),
            }
        }
        self.refresh_mode();
        report
    }

    /// Lay out a NORMAL move and set each axis's mode and direction.
    fn plan(&mut self, dx: i32, dy: i32) {
        self.destination = MoveDescriptor::reduce(dx, dy);
        self.progress = MoveProgress::default();
        self.spread = StepSpread::for_move(&self.destination);
        for (id, delta) in AxisId::ALL.into_iter().zip([dx, dy]) {
            let axis = self.axis_mut(id);
            if delta == 0 {
                axis.halt();
            } else {
                axis.start(Mode::Normal, Direction::from_delta(delta));
            }
        }
    }

    fn clip_to_window(&self, id: AxisId, remaining: u32) -> i32 {
        let axis = self.axis(id);
        if axis.mode() != Mode::Normal {
            return 0;
        }
        let kept = remaining.min(axis.stop_window()).min(i32::MAX as u32) as i32;
        kept * axis.direction().sign()
    }

    fn normal_tick(&mut self) {
        if self.progress.times >= self.destination.times {
            self.finish_move();
            return;
        }

        let proposed = self.spread.next_step();
        let step = SpreadStep {
            x: proposed.x && self.progress.x < self.destination.x,
            y: proposed.y && self.progress.y < self.destination.y,
        };
        let done = self.progress.record(&self.destination, step);

        // An axis halted at a bound still counts its share so the move ends
        if step.x {
            self.step_if(AxisId::Pan, Mode::Normal);
        }
        if step.y {
            self.step_if(AxisId::Tilt, Mode::Normal);
        }

        if done {
            self.finish_move();
        } else if self.progress.at_macro_boundary() {
            self.spread.restart();
        }
    }

    fn sweep_tick(&mut self, mode: Mode) {
        for id in AxisId::ALL {
            if self.step_if(id, mode) && mode == Mode::Reset {
                self.axis_mut(id).total_steps += 1;
            }
        }
    }

    /// Step an axis if it is in `mode`; returns whether it stepped.
    fn step_if(&mut self, id: AxisId, mode: Mode) -> bool {
        let axis = self.axis_mut(id);
        if axis.mode() != mode {
            return false;
        }
        if axis.advance().is_err() {
            warn!("{} phase write failed, halting", id);
            axis.halt();
            return false;
        }
        true
    }

    fn finish_move(&mut self) {
        for axis in self.axes.iter_mut() {
            if axis.mode() == Mode::Normal {
                axis.halt();
            }
        }
        trace!("move complete");
    }

    /// Apply the boundary rules for an axis that reached `limit`.
    ///
    /// Returns `true` when this completes homing for the axis.
    fn on_limit(&mut self, id: AxisId, limit: Limit) -> bool {
        let axis = self.axis_mut(id);
        if axis.direction() != limit.approach() {
            return false;
        }

        match axis.mode() {
            Mode::Stop => false,
            Mode::Normal => {
                axis.snap_to(limit);
                axis.halt();
                debug!("{} stopped at {} limit", id, limit);
                false
            }
            Mode::Cruise => {
                axis.snap_to(limit);
                axis.direction = limit.approach().reversed();
                false
            }
            Mode::Reset if !axis.has_endstops() => {
                axis.max_steps = axis.total_steps;
                axis.snap_to(limit);
                axis.halt();
                info!("{} homed against soft limit: {} steps", id, axis.max_steps());
                true
            }
            Mode::Reset => {
                match limit {
                    Limit::Min => axis.reached_min = true,
                    Limit::Max => axis.reached_max = true,
                }
                if axis.reached_min && axis.reached_max {
                    axis.max_steps = axis.total_steps;
                    axis.snap_to(limit);
                    axis.halt();
                    info!("{} homed between endstops: {} steps", id, axis.max_steps());
                    true
                } else {
                    // Measure from this switch to the opposite one
                    axis.total_steps = 0;
                    axis.direction = limit.approach().reversed();
                    false
                }
            }
        }
    }

    fn power_on(&mut self, id: AxisId) {
        let axis = self.axis_mut(id);
        if axis.power_on().is_err() {
            warn!("{} phase write failed, halting", id);
            axis.halt();
        }
    }

    fn power_off(&mut self, id: AxisId) {
        if self.axis_mut(id).power_off().is_err() {
            warn!("{} coil release failed", id);
        }
    }

    fn refresh_mode(&mut self) {
        if self.axes.iter().all(|a| !a.mode().is_active()) {
            self.mode = Mode::Stop;
        }
    }
}
