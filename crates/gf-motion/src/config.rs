//! Simulator tuning.

use gf_core::{GeoError, GeoResult};

/// Speed limits, arrival tolerance, and optional position noise.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    /// Initial speed, m/s.  Default: 5.
    pub speed_mps: f64,
    /// Lower speed limit, m/s.  Default: 1.
    pub min_speed_mps: f64,
    /// Upper speed limit, m/s.  Default: 20.
    pub max_speed_mps: f64,
    /// Increment used by `increase_speed` / `decrease_speed`.  Default: 1.
    pub speed_step_mps: f64,
    /// The run ends once the observer is this close to the target, metres.
    /// Independent of the geofence radius.  Default: 5.
    pub arrival_tolerance_m: f64,
    /// Maximum horizontal noise added to reported positions, metres.
    /// `0` (the default) reports the true track.
    pub noise_m: f64,
    /// Seed for the noise generator.
    pub seed: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed_mps:           5.0,
            min_speed_mps:       1.0,
            max_speed_mps:       20.0,
            speed_step_mps:      1.0,
            arrival_tolerance_m: 5.0,
            noise_m:             0.0,
            seed:                42,
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> GeoResult<()> {
        let finite = [
            self.speed_mps,
            self.min_speed_mps,
            self.max_speed_mps,
            self.speed_step_mps,
            self.arrival_tolerance_m,
            self.noise_m,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(GeoError::Config("motion parameters must be finite".into()));
        }
        if self.min_speed_mps <= 0.0 || self.min_speed_mps > self.max_speed_mps {
            return Err(GeoError::Config(format!(
                "speed limits must satisfy 0 < min <= max, got {}..{}",
                self.min_speed_mps, self.max_speed_mps
            )));
        }
        if !(self.min_speed_mps..=self.max_speed_mps).contains(&self.speed_mps) {
            return Err(GeoError::InvalidSpeed(self.speed_mps));
        }
        if self.speed_step_mps <= 0.0 {
            return Err(GeoError::Config("speed_step_mps must be positive".into()));
        }
        if self.arrival_tolerance_m < 0.0 || self.noise_m < 0.0 {
            return Err(GeoError::Config(
                "arrival_tolerance_m and noise_m must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Clamp `v` into the configured speed range.
    #[inline]
    pub fn clamp_speed(&self, v: f64) -> f64 {
        v.clamp(self.min_speed_mps, self.max_speed_mps)
    }
}
