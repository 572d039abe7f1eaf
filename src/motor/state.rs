//! Operating modes of an axis and of the device.

use core::fmt;

/// Operating mode shared by axes and the device.
///
/// The device mode is `Stop` when both axes are stopped and otherwise the
/// mode of the command in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Idle; coils may be de-energized.
    #[default]
    Stop,
    /// Bounded move in progress.
    Normal,
    /// Continuous back-and-forth between the calibrated bounds.
    Cruise,
    /// Homing sweep in progress.
    Reset,
}

impl Mode {
    /// Get the mode name as a static string.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Stop => "Stop",
            Mode::Normal => "Normal",
            Mode::Cruise => "Cruise",
            Mode::Reset => "Reset",
        }
    }

    /// Whether this mode moves the axis.
    #[inline]
    pub fn is_active(self) -> bool {
        self != Mode::Stop
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Running state reported by GetStatus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// Device mode is `Stop`.
    Stopped,
    /// Any other mode.
    Running,
}

impl From<Mode> for RunState {
    fn from(mode: Mode) -> Self {
        if mode.is_active() {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }
}
