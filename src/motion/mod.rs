//! Motion module for pantilt-stepper.
//!
//! Provides the coil energization patterns and the two-axis step spreading
//! used by the tick handler.

mod direction;
pub mod pattern;
mod spread;

pub use direction::Direction;
pub use spread::{gcd, MoveDescriptor, MoveProgress, SpreadStep, StepSpread};
