//! Observer positions and geofence targets.

use crate::{GeoError, GeoPoint, GeoResult};

/// One position fix delivered by a position source.
///
/// The core only ever reads the latest fix; it never edits one.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObserverPosition {
    pub point: GeoPoint,
    /// Unix timestamp of the fix, milliseconds.
    pub unix_ms: i64,
    /// Horizontal accuracy reported by the sensor, metres, if known.
    pub accuracy_m: Option<f64>,
}

impl ObserverPosition {
    #[inline]
    pub fn new(point: GeoPoint, unix_ms: i64) -> Self {
        Self { point, unix_ms, accuracy_m: None }
    }

    pub fn with_accuracy(mut self, accuracy_m: f64) -> Self {
        self.accuracy_m = Some(accuracy_m);
        self
    }
}

/// A circular geofence: a centre point and a trigger radius in metres.
///
/// Targets are replaced wholesale, never edited, so the fields are private
/// and only reachable through the validating constructor.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    point:    GeoPoint,
    radius_m: f64,
}

impl Target {
    /// Validate `point` and `radius_m` (finite, `> 0`) and build a target.
    pub fn new(point: GeoPoint, radius_m: f64) -> GeoResult<Self> {
        point.validate()?;
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(GeoError::InvalidRadius(radius_m));
        }
        Ok(Self { point, radius_m })
    }

    #[inline]
    pub fn point(&self) -> GeoPoint {
        self.point
    }

    #[inline]
    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Distance from `p` to the target centre, metres.
    #[inline]
    pub fn distance_from(&self, p: GeoPoint) -> f64 {
        self.point.distance_m(p)
    }

    /// `true` if `p` lies inside or on the trigger radius.
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        self.distance_from(p) <= self.radius_m
    }
}
