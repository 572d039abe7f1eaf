//! Timer seams the engine is driven by.
//!
//! Phase outputs and endstop inputs use embedded-hal pins directly; the two
//! timers below have no embedded-hal counterpart and are supplied by the board
//! support layer. Their callbacks call back into `PanTiltDevice::on_tick` and
//! `PanTiltDevice::on_debounce_timeout`.

/// Periodic tick source.
pub trait TickSource {
    /// Start firing every `period_us` microseconds. Restarting a running
    /// source only changes its period.
    fn start(&mut self, period_us: u32);

    /// Stop firing.
    fn stop(&mut self);

    /// Change the period; takes effect from the next tick.
    fn set_period(&mut self, period_us: u32);
}

/// One-shot timer for endstop debouncing.
pub trait OneShotTimer {
    /// Fire once after `delay_ms`. Re-arming replaces the pending expiry.
    fn arm(&mut self, delay_ms: u32);
}
