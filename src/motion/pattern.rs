//! Half-step coil energization patterns.

/// Eight-step energization sequence; bit 3 is phase A, bit 0 is phase D.
pub const STEP_PATTERNS: [u8; 8] = [0x08, 0x0c, 0x04, 0x06, 0x02, 0x03, 0x01, 0x09];

/// Number of steps in one electrical cycle.
pub const STEPS_PER_CYCLE: i32 = STEP_PATTERNS.len() as i32;

/// Map a logical position to its pattern index in `[0, 8)`.
///
/// Negative positions wrap the same way positive ones do, so stepping
/// across zero never skips a phase.
#[inline]
pub fn step_index(position: i32) -> usize {
    position.rem_euclid(STEPS_PER_CYCLE) as usize
}

/// Output levels for the four phases at a pattern index.
///
/// With `invert` set the outputs are active-low.
#[inline]
pub fn phase_levels(index: usize, invert: bool) -> [bool; 4] {
    let pattern = STEP_PATTERNS[index % STEP_PATTERNS.len()];
    let mut levels = [false; 4];
    for (phase, level) in levels.iter_mut().enumerate() {
        *level = (pattern & (0x08 >> phase) != 0) != invert;
    }
    levels
}

/// Output levels with every coil de-energized.
#[inline]
pub const fn idle_levels(invert: bool) -> [bool; 4] {
    [invert; 4]
}
