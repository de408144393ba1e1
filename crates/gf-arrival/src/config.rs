//! Detector tuning.

use gf_core::{GeoError, GeoResult};

/// Thresholds for [`ArrivalDetector`][crate::ArrivalDetector].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectorConfig {
    /// The departure band is `radius × departure_factor`.  Must be `>= 1`;
    /// `1.0` disables hysteresis.  Default: 1.5.
    pub departure_factor: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self { departure_factor: 1.5 }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> GeoResult<()> {
        if !self.departure_factor.is_finite() || self.departure_factor < 1.0 {
            return Err(GeoError::Config(format!(
                "departure_factor must be >= 1, got {}",
                self.departure_factor
            )));
        }
        Ok(())
    }
}
