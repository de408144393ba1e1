//! Plain data row types written by output backends.

use gf_arrival::{ArrivalEvent, ArrivalNotice, ArrivalState};
use gf_core::ObserverPosition;

/// One evaluated observer fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackRow {
    pub unix_ms:    i64,
    pub lat:        f64,
    pub lon:        f64,
    pub distance_m: f64,
    /// Detector state after this fix was evaluated.
    pub state:      ArrivalState,
}

impl TrackRow {
    pub fn new(position: &ObserverPosition, distance_m: f64, state: ArrivalState) -> Self {
        Self {
            unix_ms: position.unix_ms,
            lat:     position.point.lat,
            lon:     position.point.lon,
            distance_m,
            state,
        }
    }
}

/// One `Arrived` / `Departed` edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRow {
    pub unix_ms:    i64,
    pub event:      ArrivalEvent,
    pub distance_m: f64,
    pub lat:        f64,
    pub lon:        f64,
    pub radius_m:   f64,
}

impl From<&ArrivalNotice> for EventRow {
    fn from(n: &ArrivalNotice) -> Self {
        Self {
            unix_ms:    n.position.unix_ms,
            event:      n.event,
            distance_m: n.distance_m,
            lat:        n.position.point.lat,
            lon:        n.position.point.lon,
            radius_m:   n.target.radius_m(),
        }
    }
}
