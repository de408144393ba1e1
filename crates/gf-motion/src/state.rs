//! Simulator state.

use gf_core::GeoPoint;

/// The synthetic observer's state.
///
/// `path` always starts with the point the run began from and grows by one
/// point per advancing tick.  It is cleared when the run is stopped or the
/// start point is moved.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationState {
    pub current_position: GeoPoint,
    pub path:             Vec<GeoPoint>,
    /// Metres per second.
    pub speed_mps:        f64,
    pub running:          bool,
}

impl SimulationState {
    /// An idle state parked at `origin` with a one-point path.
    pub fn parked(origin: GeoPoint, speed_mps: f64) -> Self {
        Self {
            current_position: origin,
            path:             vec![origin],
            speed_mps,
            running:          false,
        }
    }

    /// Ground distance covered along `path`, metres.
    pub fn travelled_m(&self) -> f64 {
        self.path.windows(2).map(|w| w[0].distance_m(w[1])).sum()
    }
}
