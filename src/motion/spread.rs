//! Two-axis step spreading.
//!
//! A diagonal move `(dx, dy)` is reduced by the gcd of its magnitudes into a
//! macro-step `(x, y)` repeated `times` times. Inside each macro-step a
//! Bresenham accumulator decides, tick by tick, which axes advance so both
//! reach their share together.

/// Greatest common divisor.
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// A reduced move: `times` repetitions of `x` pan and `y` tilt steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveDescriptor {
    /// Pan steps per macro-step.
    pub x: u32,
    /// Tilt steps per macro-step.
    pub y: u32,
    /// Number of macro-steps.
    pub times: u32,
}

impl MoveDescriptor {
    /// Reduce a signed request to its macro-step form.
    ///
    /// A zero axis never steps and the move runs as a single macro-step.
    pub fn reduce(dx: i32, dy: i32) -> Self {
        let (x, y) = (dx.unsigned_abs(), dy.unsigned_abs());
        match (x, y) {
            (0, 0) => Self::default(),
            (_, 0) | (0, _) => Self { x, y, times: 1 },
            _ => {
                let g = gcd(x, y);
                Self {
                    x: x / g,
                    y: y / g,
                    times: g,
                }
            }
        }
    }

    /// Whether the move has no travel at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times == 0 || (self.x == 0 && self.y == 0)
    }

    /// Total pan and tilt steps over all macro-steps.
    #[inline]
    pub fn total(&self) -> (u32, u32) {
        (self.x * self.times, self.y * self.times)
    }
}

/// Progress through a [`MoveDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveProgress {
    /// Pan steps taken in the current macro-step.
    pub x: u32,
    /// Tilt steps taken in the current macro-step.
    pub y: u32,
    /// Completed macro-steps.
    pub times: u32,
}

impl MoveProgress {
    /// Pan and tilt steps still pending against `target`.
    pub fn remaining(&self, target: &MoveDescriptor) -> (u32, u32) {
        let left = target.times.saturating_sub(self.times);
        (
            (left * target.x).saturating_sub(self.x),
            (left * target.y).saturating_sub(self.y),
        )
    }

    /// Count the steps taken this tick; returns `true` when the move is done.
    ///
    /// Steps beyond the current macro-step's share are ignored.
    pub fn record(&mut self, target: &MoveDescriptor, step: SpreadStep) -> bool {
        if step.x && self.x < target.x {
            self.x += 1;
        }
        if step.y && self.y < target.y {
            self.y += 1;
        }
        if self.x >= target.x && self.y >= target.y && self.times < target.times {
            self.times += 1;
            self.x = 0;
            self.y = 0;
        }
        self.times >= target.times
    }

    /// Whether the current macro-step just started.
    #[inline]
    pub fn at_macro_boundary(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

/// Which axes advance on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpreadStep {
    /// Pan advances.
    pub x: bool,
    /// Tilt advances.
    pub y: bool,
}

/// Bresenham accumulator for one macro-step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepSpread {
    factor_a: u32,
    factor_b: u32,
    numerator: u32,
}

impl StepSpread {
    /// Accumulator for a macro-step of `x` pan and `y` tilt steps.
    pub fn new(x: u32, y: u32) -> Self {
        Self {
            factor_a: x + 1,
            factor_b: y + 1,
            numerator: 0,
        }
    }

    /// Accumulator for a descriptor's macro-step.
    pub fn for_move(target: &MoveDescriptor) -> Self {
        Self::new(target.x, target.y)
    }

    /// Clear the accumulator at a macro-step boundary.
    #[inline]
    pub fn restart(&mut self) {
        self.numerator = 0;
    }

    /// Decide which axes advance on this tick.
    ///
    /// The axis with the larger factor always steps; the other steps each time
    /// its accumulated factor reaches the larger one.
    pub fn next_step(&mut self) -> SpreadStep {
        let (a, b) = (self.factor_a, self.factor_b);
        if a == b {
            return SpreadStep { x: true, y: true };
        }
        let (lead, lag) = if a > b { (a, b) } else { (b, a) };
        self.numerator += lag;
        let minor = self.numerator >= lead;
        if minor {
            self.numerator -= lead;
        }
        if a > b {
            SpreadStep { x: true, y: minor }
        } else {
            SpreadStep { x: minor, y: true }
        }
    }
}
