//! Deterministic GPS-like position noise.
//!
//! Real fixes wander around the true position; a perfectly clean synthetic
//! track never exercises the detector's departure band.  `PositionNoise`
//! displaces each reported point by a random distance in `[0, max_m]` along
//! a random bearing, from a seeded `SmallRng` so runs are reproducible.

use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use gf_core::GeoPoint;

/// Seeded positional jitter.
pub struct PositionNoise {
    rng:   SmallRng,
    max_m: f64,
}

impl PositionNoise {
    pub fn new(seed: u64, max_m: f64) -> Self {
        Self {
            rng:   SmallRng::seed_from_u64(seed),
            max_m: max_m.max(0.0),
        }
    }

    #[inline]
    pub fn max_m(&self) -> f64 {
        self.max_m
    }

    /// Return `p` displaced by at most `max_m` metres.
    pub fn apply(&mut self, p: GeoPoint) -> GeoPoint {
        if self.max_m <= 0.0 {
            return p;
        }
        let heading = self.rng.gen_range(0.0..TAU);
        let offset = self.rng.gen_range(0.0..=self.max_m);
        p.offset(heading, offset)
    }
}

impl std::fmt::Debug for PositionNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionNoise").field("max_m", &self.max_m).finish()
    }
}
