//! Property tests for two-axis step spreading.

use pantilt_stepper::motion::{MoveDescriptor, MoveProgress, SpreadStep, StepSpread};
use proptest::prelude::*;

/// Drive a move the way the tick handler does, recording cumulative steps
/// after every tick.
fn simulate(dx: i32, dy: i32) -> (MoveDescriptor, Vec<(u32, u32)>) {
    let target = MoveDescriptor::reduce(dx, dy);
    let mut spread = StepSpread::for_move(&target);
    let mut progress = MoveProgress::default();
    let mut totals = (0u32, 0u32);
    let mut trace = Vec::new();

    if target.is_empty() {
        return (target, trace);
    }

    loop {
        let proposed = spread.next_step();
        let step = SpreadStep {
            x: proposed.x && progress.x < target.x,
            y: proposed.y && progress.y < target.y,
        };
        totals.0 += u32::from(step.x);
        totals.1 += u32::from(step.y);
        let done = progress.record(&target, step);
        trace.push(totals);
        if done {
            break;
        }
        if progress.at_macro_boundary() {
            spread.restart();
        }
        assert!(trace.len() <= 4000, "move never completed");
    }

    (target, trace)
}

proptest! {
    #[test]
    fn prop_move_lands_exactly(dx in -1000i32..=1000, dy in -1000i32..=1000) {
        let (_, trace) = simulate(dx, dy);
        let last = trace.last().copied().unwrap_or((0, 0));
        prop_assert_eq!(last, (dx.unsigned_abs(), dy.unsigned_abs()));
    }

    #[test]
    fn prop_one_tick_per_lead_step(dx in -1000i32..=1000, dy in -1000i32..=1000) {
        let (_, trace) = simulate(dx, dy);
        let lead = dx.unsigned_abs().max(dy.unsigned_abs());
        prop_assert_eq!(trace.len(), lead as usize);
    }

    #[test]
    fn prop_stays_within_one_step_of_line(dx in -1000i32..=1000, dy in -1000i32..=1000) {
        let (target, trace) = simulate(dx, dy);
        let (x1, y1) = (i64::from(target.x), i64::from(target.y));
        for (px, py) in trace {
            let skew = (i64::from(py) * x1 - i64::from(px) * y1).abs();
            prop_assert!(skew < x1.max(y1).max(1), "skew {} at ({}, {})", skew, px, py);
        }
    }
}

#[test]
fn test_thirty_by_six_interleaves_tilt() {
    let (target, trace) = simulate(30, 6);
    assert_eq!(target, MoveDescriptor { x: 5, y: 1, times: 6 });
    assert_eq!(trace.len(), 30);
    for (tick, &(px, py)) in (1u32..).zip(&trace) {
        assert_eq!(px, tick);
        // Third tick of each five-tick macro-step carries the tilt step
        assert_eq!(py, tick / 5 + u32::from(tick % 5 >= 3));
    }
}
