//! Blocking command surface over the motion engine.
//!
//! Three contexts share a [`PanTiltDevice`]: the caller's thread issuing
//! commands through a [`Session`], the tick source callback ([`on_tick`]) and
//! the endstop callbacks ([`on_endstop_edge`], [`on_debounce_timeout`]).
//! Engine state lives behind a critical section that the callbacks hold for
//! their whole body and commands hold only to publish work. A command mutex
//! keeps one command in flight at a time; commands wait on completions the
//! callbacks signal.
//!
//! [`on_tick`]: PanTiltDevice::on_tick
//! [`on_endstop_edge`]: PanTiltDevice::on_endstop_edge
//! [`on_debounce_timeout`]: PanTiltDevice::on_debounce_timeout

use core::cell::RefCell;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::digital::{InputPin, OutputPin};

use crate::command::{Command, MoveOutcome, Response};
use crate::config::units::{Millis, StepsPerSec};
use crate::config::{DeviceConfig, SpeedLimits, Timeouts};
use crate::error::{Error, Result, StateError, TimeoutError};
use crate::hal::{OneShotTimer, TickSource};
use crate::registry::ChannelClaim;
use crate::sync::Completion;

use super::axis::{AxisId, Limit};
use super::builder::DeviceBuilder;
use super::engine::{MotionEngine, TickReport};
use super::status::{Calibration, Status};

/// Interval between polls while waiting for motion to settle.
const SETTLE_POLL: Duration = Duration::from_millis(10);

/// A pan/tilt fixture bound to its pins, timers and timer channel.
pub struct PanTiltDevice<P, I, T, D>
where
    P: OutputPin,
    I: InputPin,
    T: TickSource,
    D: OneShotTimer,
{
    engine: critical_section::Mutex<RefCell<MotionEngine<P, I>>>,
    commands: Mutex<()>,
    ticker: Mutex<T>,
    debounce_timer: Mutex<D>,
    opened: AtomicBool,
    speed: AtomicU32,
    limits: SpeedLimits,
    timeouts: Timeouts,
    debounce: Millis,
    stop_done: Completion,
    homed: [Completion; 2],
    claim: ChannelClaim,
}

impl<P, I, T, D> PanTiltDevice<P, I, T, D>
where
    P: OutputPin,
    I: InputPin,
    T: TickSource,
    D: OneShotTimer,
{
    /// Create a builder.
    pub fn builder() -> DeviceBuilder<P, I, T, D> {
        DeviceBuilder::new()
    }

    pub(crate) fn new(
        config: &DeviceConfig,
        engine: MotionEngine<P, I>,
        ticker: T,
        debounce_timer: D,
        claim: ChannelClaim,
    ) -> Self {
        Self {
            engine: critical_section::Mutex::new(RefCell::new(engine)),
            commands: Mutex::new(()),
            ticker: Mutex::new(ticker),
            debounce_timer: Mutex::new(debounce_timer),
            opened: AtomicBool::new(false),
            speed: AtomicU32::new(config.speed.default.value()),
            limits: config.speed,
            timeouts: config.timeouts,
            debounce: config.debounce,
            stop_done: Completion::new(),
            homed: [Completion::new(), Completion::new()],
            claim,
        }
    }

    /// Open the device for commands.
    ///
    /// # Errors
    ///
    /// Returns `StateError::Busy` while another session is open.
    pub fn open(&self) -> Result<Session<'_, P, I, T, D>> {
        self.opened
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::State(StateError::Busy))?;
        debug!("device opened");
        Ok(Session { device: self })
    }

    /// Whether a session is open.
    pub fn is_open(&self) -> bool {
        self.opened.load(Ordering::Acquire)
    }

    /// Timer channel the tick source runs on.
    pub fn timer_channel(&self) -> u8 {
        self.claim.channel()
    }

    /// Configured step rate.
    pub fn speed(&self) -> StepsPerSec {
        StepsPerSec(self.speed.load(Ordering::Relaxed))
    }

    /// Snapshot of position, travel and speed; never waits on a command.
    pub fn status(&self) -> Status {
        let speed = self.speed();
        self.inspect(|engine| engine.status(speed))
    }

    /// Read the engine inside the critical section.
    pub fn inspect<R>(&self, f: impl FnOnce(&MotionEngine<P, I>) -> R) -> R {
        critical_section::with(|cs| f(&self.engine.borrow_ref(cs)))
    }

    /// Run a closure against the engine inside the critical section.
    pub(crate) fn with_engine<R>(&self, f: impl FnOnce(&mut MotionEngine<P, I>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.engine.borrow_ref_mut(cs)))
    }

    /// Tick source callback.
    pub fn on_tick(&self) {
        let report = self.with_engine(|engine| engine.tick());
        self.signal(report);
        if report.idle {
            self.park_ticker();
        }
    }

    /// Raw endstop edge callback.
    pub fn on_endstop_edge(&self, axis: AxisId, limit: Limit) {
        if self.with_engine(|engine| engine.endstop_edge(axis, limit)) {
            self.debounce_timer().arm(self.debounce.value());
        }
    }

    /// Debounce timer expiry callback.
    pub fn on_debounce_timeout(&self) {
        let report = self.with_engine(|engine| engine.debounce_expired());
        self.signal(report);
    }

    fn signal(&self, report: TickReport) {
        if report.stop_complete {
            self.stop_done.complete();
        }
        for id in AxisId::ALL {
            if report.homed(id) {
                self.homed[id.index()].complete();
            }
        }
    }

    fn lock_commands(&self) -> MutexGuard<'_, ()> {
        self.commands.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ticker(&self) -> MutexGuard<'_, T> {
        self.ticker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn debounce_timer(&self) -> MutexGuard<'_, D> {
        self.debounce_timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Stop the tick source once motion has ended on its own.
    ///
    /// Idleness is re-read under the ticker lock so a command that starts
    /// motion between the idle tick and here keeps its ticker running.
    fn park_ticker(&self) {
        let mut ticker = self.ticker();
        if self.inspect(|engine| engine.is_idle() && !engine.stop_requested()) {
            ticker.stop();
            trace!("tick source parked");
        }
    }

    fn start_ticker(&self) {
        let period = self.speed().period_us();
        self.ticker().start(period);
    }

    /// Halt now, de-energize and stop the tick source.
    fn force_stop(&self) {
        self.with_engine(|engine| engine.force_stop());
        self.ticker().stop();
    }

    /// Poll until both axes stop, forcing a stop past the settle bound.
    fn wait_settled(&self) -> Result<()> {
        let deadline = Instant::now() + self.timeouts.settle.as_duration();
        loop {
            if self.inspect(|engine| engine.is_idle()) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                warn!("motion did not settle within {} ms", self.timeouts.settle.value());
                self.force_stop();
                return Err(Error::Timeout(TimeoutError::Settle));
            }
            thread::sleep(SETTLE_POLL);
        }
    }

    fn move_locked(&self, dx: i32, dy: i32) -> MoveOutcome {
        if self.with_engine(|engine| engine.begin_move(dx, dy)) {
            self.start_ticker();
            MoveOutcome::Accepted
        } else {
            MoveOutcome::NoOp
        }
    }

    fn go_back_locked(&self) -> MoveOutcome {
        let accepted = self.with_engine(|engine| {
            let (dx, dy) = engine.centre_offset();
            engine.begin_move(dx, dy)
        });
        if accepted {
            self.start_ticker();
            MoveOutcome::Accepted
        } else {
            MoveOutcome::NoOp
        }
    }

    fn stop_locked(&self) -> Result<()> {
        self.stop_done.reinit();
        if !self.with_engine(|engine| engine.request_stop()) {
            return Ok(());
        }
        // The tick source may have been stopped by an earlier forced stop
        self.start_ticker();

        if self.stop_done.wait_timeout(self.timeouts.stop.as_duration()) {
            self.ticker().stop();
            info!("stopped");
            Ok(())
        } else {
            warn!("stop did not complete within {} ms", self.timeouts.stop.value());
            self.force_stop();
            Err(Error::Timeout(TimeoutError::Stop))
        }
    }

    fn cruise_locked(&self) -> Result<MoveOutcome> {
        self.go_back_locked();
        self.wait_settled()?;
        if self.with_engine(|engine| engine.begin_cruise()) {
            self.start_ticker();
            Ok(MoveOutcome::Accepted)
        } else {
            Ok(MoveOutcome::NoOp)
        }
    }

    fn reset_locked(&self, calibration: Calibration) -> Result<Calibration> {
        if !calibration.is_empty() {
            self.with_engine(|engine| engine.calibrate(&calibration))?;
            return Ok(calibration);
        }

        for completion in &self.homed {
            completion.reinit();
        }
        self.with_engine(|engine| engine.begin_homing());
        self.start_ticker();

        let home = self.timeouts.home.as_duration();
        for id in AxisId::ALL {
            if !self.homed[id.index()].wait_timeout(home) {
                warn!("{} homing did not complete within {} ms", id, self.timeouts.home.value());
                self.force_stop();
                return Err(Error::Timeout(TimeoutError::Homing(id)));
            }
        }
        self.wait_settled()?;

        let measured = self.inspect(|engine| engine.calibration());
        self.move_locked(-measured.x_max, -measured.y_max);
        self.wait_settled()?;
        self.go_back_locked();
        self.wait_settled()?;

        let calibration = self.inspect(|engine| engine.calibration());
        info!(
            "homed: pan {}/{} tilt {}/{}",
            calibration.x_cur,
            calibration.x_max,
            calibration.y_cur,
            calibration.y_max
        );
        Ok(calibration)
    }

    fn set_speed_locked(&self, speed: u32) -> Result<StepsPerSec> {
        let speed = self.limits.check(StepsPerSec(speed))?;
        self.speed.store(speed.value(), Ordering::Relaxed);
        self.ticker().set_period(speed.period_us());
        debug!("speed set to {} steps/s", speed.value());
        Ok(speed)
    }
}

impl<P, I, T, D> Drop for PanTiltDevice<P, I, T, D>
where
    P: OutputPin,
    I: InputPin,
    T: TickSource,
    D: OneShotTimer,
{
    fn drop(&mut self) {
        self.force_stop();
        debug!("device detached from timer channel {}", self.claim.channel());
    }
}

/// Exclusive access to a [`PanTiltDevice`], released on drop.
pub struct Session<'a, P, I, T, D>
where
    P: OutputPin,
    I: InputPin,
    T: TickSource,
    D: OneShotTimer,
{
    device: &'a PanTiltDevice<P, I, T, D>,
}

impl<P, I, T, D> Session<'_, P, I, T, D>
where
    P: OutputPin,
    I: InputPin,
    T: TickSource,
    D: OneShotTimer,
{
    /// Run a command and wait for its reply.
    pub fn execute(&self, command: Command) -> Result<Response> {
        trace!("command {}", command.name());
        match command {
            Command::Stop => self.stop().map(|()| Response::Done),
            Command::Reset(calibration) => self.reset(calibration).map(Response::Calibrated),
            Command::Move { dx, dy } => Ok(Response::Motion(self.move_by(dx, dy))),
            Command::GetStatus => Ok(Response::Status(self.status())),
            Command::SetSpeed(speed) => self.set_speed(speed).map(Response::Speed),
            Command::GoBack => Ok(Response::Motion(self.go_back())),
            Command::Cruise => self.cruise().map(Response::Motion),
        }
    }

    /// Relative move; returns without waiting for it to finish.
    pub fn move_by(&self, dx: i32, dy: i32) -> MoveOutcome {
        let _guard = self.device.lock_commands();
        self.device.move_locked(dx, dy)
    }

    /// Halt within the stop window and wait for the axes to stop.
    ///
    /// Returns at once, touching nothing, if the device is already idle.
    ///
    /// # Errors
    ///
    /// Returns `TimeoutError::Stop` after forcing a stop if the axes do not
    /// halt in time.
    pub fn stop(&self) -> Result<()> {
        let _guard = self.device.lock_commands();
        self.device.stop_locked()
    }

    /// Move both axes to the middle of their travel.
    pub fn go_back(&self) -> MoveOutcome {
        let _guard = self.device.lock_commands();
        self.device.go_back_locked()
    }

    /// Re-centre, then sweep both axes between their bounds until stopped.
    ///
    /// # Errors
    ///
    /// Returns `TimeoutError::Settle` if re-centering does not finish.
    pub fn cruise(&self) -> Result<MoveOutcome> {
        let _guard = self.device.lock_commands();
        self.device.cruise_locked()
    }

    /// Home both axes, or adopt `calibration` if it is non-empty.
    ///
    /// A physical homing sweeps to the positive bound, returns to the origin
    /// and finishes centred. Returns the calibration now in effect.
    ///
    /// # Errors
    ///
    /// Returns `ParamError::InconsistentCalibration` for a bad calibration and
    /// a `TimeoutError` if homing or one of the follow-up moves overruns.
    pub fn reset(&self, calibration: Calibration) -> Result<Calibration> {
        let _guard = self.device.lock_commands();
        self.device.reset_locked(calibration)
    }

    /// Change the step rate.
    ///
    /// # Errors
    ///
    /// Returns `ParamError::SpeedOutOfRange` outside the configured bounds.
    pub fn set_speed(&self, speed: u32) -> Result<StepsPerSec> {
        let _guard = self.device.lock_commands();
        self.device.set_speed_locked(speed)
    }

    /// Snapshot of position, travel and speed.
    pub fn status(&self) -> Status {
        self.device.status()
    }
}

impl<P, I, T, D> Drop for Session<'_, P, I, T, D>
where
    P: OutputPin,
    I: InputPin,
    T: TickSource,
    D: OneShotTimer,
{
    fn drop(&mut self) {
        self.device.opened.store(false, Ordering::Release);
        debug!("device closed");
    }
}
