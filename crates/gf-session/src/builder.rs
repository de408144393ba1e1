//! Fluent builder for constructing a [`Session`].

use gf_arrival::ArrivalDetector;
use gf_core::{GeoPoint, SimClock};
use gf_motion::MotionSimulator;

use crate::{
    LogNotifier, Notifier, Session, SessionConfig, SessionObserver, SessionResult,
    SessionStatus, TrackingMode,
};

/// Fluent builder for [`Session`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                          |
/// |-------------------------|----------------------------------|
/// | `.notifier(n)`          | [`LogNotifier`]                  |
/// | `.observer(o)`          | none                             |
/// | `.mode(m)`              | [`TrackingMode::Simulated`]      |
/// | `.simulated_start(p)`   | unplaced (uses first live fix)   |
///
/// # Example
///
/// ```rust,ignore
/// let session = SessionBuilder::new(config)
///     .notifier(LogNotifier)
///     .mode(TrackingMode::Live)
///     .build()?;
/// ```
pub struct SessionBuilder {
    config:          SessionConfig,
    notifier:        Option<Box<dyn Notifier>>,
    observers:       Vec<Box<dyn SessionObserver>>,
    mode:            TrackingMode,
    simulated_start: Option<GeoPoint>,
}

impl SessionBuilder {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            notifier:        None,
            observers:       Vec::new(),
            mode:            TrackingMode::default(),
            simulated_start: None,
        }
    }

    /// Where arrival notifications go.
    pub fn notifier<N: Notifier + 'static>(mut self, notifier: N) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Attach an observer.  May be called more than once.
    pub fn observer<O: SessionObserver + 'static>(mut self, observer: O) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Initial position source.
    pub fn mode(mut self, mode: TrackingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Initial position of the simulated observer.
    pub fn simulated_start(mut self, point: GeoPoint) -> Self {
        self.simulated_start = Some(point);
        self
    }

    /// Validate the configuration and return an idle [`Session`].
    pub fn build(self) -> SessionResult<Session> {
        self.config.validate()?;

        let detector = ArrivalDetector::new(self.config.detector.clone())?;
        let mut simulator = MotionSimulator::new(self.config.motion.clone())?;
        if let Some(p) = self.simulated_start {
            simulator.place(p)?;
        }

        Ok(Session {
            clock:       SimClock::new(0, self.config.schedule.tick_period_ms),
            mode:        self.mode,
            status:      SessionStatus::Idle,
            target:      None,
            detector,
            simulator,
            last_live:   None,
            notifier:    self.notifier.unwrap_or_else(|| Box::new(LogNotifier)),
            observers:   self.observers,
            subscribers: Vec::new(),
            config:      self.config,
        })
    }
}
