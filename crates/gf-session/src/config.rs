//! Session configuration.

use gf_arrival::DetectorConfig;
use gf_core::{GeoError, GeoResult};
use gf_motion::MotionConfig;

/// Top-level session configuration.
///
/// Typically loaded from a JSON file by the application (with the `serde`
/// feature) and handed to [`SessionBuilder`][crate::SessionBuilder].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub detector: DetectorConfig,
    pub motion:   MotionConfig,
    pub schedule: ScheduleConfig,
}

/// Simulation tick timing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScheduleConfig {
    /// Length of one simulation tick, both in real time (ticker period) and
    /// in simulated time (distance covered = speed × tick).  Default: 1000.
    pub tick_period_ms: u64,
    /// Unix timestamp (ms) stamped on the first simulated fix of each run.
    /// `None` uses the wall clock at `start`.
    pub start_unix_ms: Option<i64>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { tick_period_ms: 1_000, start_unix_ms: None }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> GeoResult<()> {
        self.detector.validate()?;
        self.motion.validate()?;
        if self.schedule.tick_period_ms == 0 {
            return Err(GeoError::Config("tick_period_ms must be positive".into()));
        }
        Ok(())
    }
}
