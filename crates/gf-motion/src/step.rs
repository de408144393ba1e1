//! The pure per-tick advance.

use gf_core::{GeoPoint, bearing, destination, distance};

/// What one simulation step produced.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// The observer moved to this point.
    Advanced(GeoPoint),
    /// The observer was already within the arrival tolerance; nothing moved.
    Arrived,
}

/// Advance `current` towards `target` for one tick.
///
/// Moves `speed_mps × tick_secs` metres along the initial bearing, clamped to
/// the remaining distance so the observer lands on the target instead of
/// overshooting and oscillating around it.
pub fn step(
    current:     GeoPoint,
    target:      GeoPoint,
    speed_mps:   f64,
    tick_secs:   f64,
    tolerance_m: f64,
) -> StepOutcome {
    let remaining = distance(current, target);
    if remaining <= tolerance_m {
        return StepOutcome::Arrived;
    }

    let travel = (speed_mps * tick_secs).min(remaining);
    let heading = bearing(current, target);
    StepOutcome::Advanced(destination(current, heading, travel))
}
