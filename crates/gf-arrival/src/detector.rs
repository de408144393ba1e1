//! The hysteresis evaluation step.

use gf_core::{GeoResult, ObserverPosition, Target};

use crate::{ArrivalEvent, ArrivalState, DetectorConfig, Evaluation};

/// Stateful arrival/departure evaluator for one target.
///
/// The detector does not own the target: the caller passes it on every
/// [`evaluate`][Self::evaluate] and must call [`reset`][Self::reset] when it
/// replaces the target, otherwise a `Notified` state would leak into the new
/// approach.
#[derive(Clone, Debug, Default)]
pub struct ArrivalDetector {
    config:        DetectorConfig,
    state:         ArrivalState,
    last_distance: Option<f64>,
}

impl ArrivalDetector {
    /// Create an `Armed` detector, validating `config`.
    pub fn new(config: DetectorConfig) -> GeoResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state:         ArrivalState::Armed,
            last_distance: None,
        })
    }

    /// Feed one observer position.
    ///
    /// 1. `d <= radius` while `Armed` → `Notified`, emits `Arrived`.
    /// 2. `d > radius × departure_factor` while `Notified` → `Armed`, emits
    ///    `Departed`.
    /// 3. Otherwise no transition.
    pub fn evaluate(&mut self, observer: &ObserverPosition, target: &Target) -> Evaluation {
        let d = target.distance_from(observer.point);
        let radius = target.radius_m();
        self.last_distance = Some(d);

        let event = match self.state {
            ArrivalState::Armed if d <= radius => {
                self.state = ArrivalState::Notified;
                log::info!("arrived: {d:.1} m from {} (radius {radius} m)", target.point());
                Some(ArrivalEvent::Arrived)
            }
            ArrivalState::Notified if d > radius * self.config.departure_factor => {
                self.state = ArrivalState::Armed;
                log::info!("departed: {d:.1} m from {}, re-armed", target.point());
                Some(ArrivalEvent::Departed)
            }
            _ => None,
        };

        log::trace!("evaluate {} → {d:.1} m, state {}", observer.point, self.state);
        Evaluation { distance_m: d, event }
    }

    /// Force the detector back to `Armed` and forget the last distance.
    pub fn reset(&mut self) {
        if self.state.is_notified() {
            log::debug!("arrival detector reset from notified");
        }
        self.state = ArrivalState::Armed;
        self.last_distance = None;
    }

    #[inline]
    pub fn state(&self) -> ArrivalState {
        self.state
    }

    /// Distance computed by the most recent `evaluate`, if any since reset.
    #[inline]
    pub fn last_distance(&self) -> Option<f64> {
        self.last_distance
    }

    #[inline]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Outer edge of the departure band for `target`, metres.
    #[inline]
    pub fn departure_radius(&self, target: &Target) -> f64 {
        target.radius_m() * self.config.departure_factor
    }
}
