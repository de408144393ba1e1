//! Detector outputs.

use gf_core::{ObserverPosition, Target};

/// An edge in the arrival state machine.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrivalEvent {
    /// The observer entered the trigger radius while `Armed`.
    Arrived,
    /// The observer left the departure band while `Notified`.
    Departed,
}

impl ArrivalEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            ArrivalEvent::Arrived  => "arrived",
            ArrivalEvent::Departed => "departed",
        }
    }
}

impl std::fmt::Display for ArrivalEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one [`ArrivalDetector::evaluate`][crate::ArrivalDetector::evaluate] call.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Evaluation {
    /// Distance from the observer to the target centre, metres.
    pub distance_m: f64,
    /// The transition taken, if any.
    pub event: Option<ArrivalEvent>,
}

/// An event together with the context it happened in.
///
/// This is what subscribers and observers receive.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrivalNotice {
    pub event:      ArrivalEvent,
    pub distance_m: f64,
    pub position:   ObserverPosition,
    pub target:     Target,
}
