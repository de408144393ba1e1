//! The `Session` struct and its state machine.

use std::time::{SystemTime, UNIX_EPOCH};

use gf_arrival::{ArrivalDetector, ArrivalEvent, ArrivalNotice, ArrivalState, Evaluation};
use gf_core::{GeoPoint, ObserverPosition, SimClock, Target};
use gf_motion::{MotionSimulator, SimulationState, StepOutcome};

use crate::{Notification, Notifier, SessionConfig, SessionError, SessionObserver, SessionResult};

// ── Modes and status ──────────────────────────────────────────────────────────

/// Which position source drives the detector.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackingMode {
    /// Positions come from the built-in motion simulator.
    #[default]
    Simulated,
    /// Positions come from an external sensor feed.
    Live,
}

impl TrackingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TrackingMode::Simulated => "simulated",
            TrackingMode::Live      => "live",
        }
    }
}

impl std::fmt::Display for TrackingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionStatus {
    #[default]
    Idle,
    Active,
}

/// What one call to [`Session::tick`] did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// No simulated run is active; nothing happened.
    Inactive,
    /// The simulated observer moved and its position was evaluated.
    Moved(Evaluation),
    /// The simulated observer reached the target; the session is now idle.
    Completed,
}

impl TickOutcome {
    /// `true` if the ticker should keep firing.
    #[inline]
    pub fn is_moving(&self) -> bool {
        matches!(self, TickOutcome::Moved(_))
    }
}

type ArrivalCallback = Box<dyn FnMut(&ArrivalNotice) + Send>;

// ── Session ───────────────────────────────────────────────────────────────────

/// One user's tracking session: a target, a position source, and the
/// detector between them.
///
/// `Session` is single-owner state.  It holds no timer and no lock; to share
/// it with a ticker and a live feed use [`SessionHandle`][crate::SessionHandle].
///
/// Create via [`SessionBuilder`][crate::SessionBuilder].
pub struct Session {
    pub(crate) config:    SessionConfig,
    pub(crate) mode:      TrackingMode,
    pub(crate) status:    SessionStatus,
    pub(crate) target:    Option<Target>,
    pub(crate) detector:  ArrivalDetector,
    pub(crate) simulator: MotionSimulator,
    pub(crate) clock:     SimClock,

    /// Most recent fix from the live feed, kept even while idle or simulating
    /// so it can seed a simulated run.
    pub(crate) last_live: Option<ObserverPosition>,

    pub(crate) notifier:    Box<dyn Notifier>,
    pub(crate) observers:   Vec<Box<dyn SessionObserver>>,
    pub(crate) subscribers: Vec<ArrivalCallback>,
}

impl Session {
    // ── Target ────────────────────────────────────────────────────────────

    /// Replace the target.  Always re-arms the detector, even mid-approach.
    ///
    /// During a simulated run the path restarts from the current position so
    /// the drawn track only shows movement towards the new target.
    pub fn set_target(&mut self, point: GeoPoint, radius_m: f64) -> SessionResult<()> {
        let target = Target::new(point, radius_m)?;
        log::info!("target set to {} with radius {radius_m} m", target.point());
        self.target = Some(target);
        self.detector.reset();
        if self.simulator.is_running() {
            self.simulator.start();
        }
        Ok(())
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Start tracking in `mode`.
    ///
    /// Fails with [`SessionError::NoTarget`] (leaving everything untouched)
    /// if no target is set.  Starting while already active restarts tracking.
    /// A simulated run starts from the simulated observer's position, or the
    /// last live fix if it has never been placed.
    pub fn start(&mut self, mode: TrackingMode) -> SessionResult<()> {
        if self.target.is_none() {
            return Err(SessionError::NoTarget);
        }
        if mode == TrackingMode::Simulated && self.simulator.position().is_none() {
            let origin = self.last_live.map(|p| p.point).ok_or(SessionError::NoStartPosition)?;
            self.simulator.place(origin)?;
        }

        if self.status == SessionStatus::Active {
            self.stop();
        }
        self.mode = mode;
        self.detector.reset();

        if mode == TrackingMode::Simulated {
            self.clock = SimClock::new(self.run_start_unix_ms(), self.config.schedule.tick_period_ms);
            self.simulator.start();
        }

        log::info!("{mode} tracking started");
        self.set_status(SessionStatus::Active);
        Ok(())
    }

    /// Stop tracking.  Clears the simulated path and re-arms the detector.
    ///
    /// Safe to call while idle.
    pub fn stop(&mut self) {
        self.simulator.stop();
        self.detector.reset();
        if self.status == SessionStatus::Active {
            log::info!("{} tracking stopped", self.mode);
            self.set_status(SessionStatus::Idle);
        }
    }

    /// Switch position source.  An active session is stopped first.
    pub fn set_mode(&mut self, mode: TrackingMode) {
        if mode == self.mode {
            return;
        }
        self.stop();
        self.mode = mode;
    }

    // ── Drivers ───────────────────────────────────────────────────────────

    /// One scheduler tick: advance the simulated observer and evaluate it.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != SessionStatus::Active || self.mode != TrackingMode::Simulated {
            return TickOutcome::Inactive;
        }
        let Some(target) = self.target else {
            return TickOutcome::Inactive;
        };

        self.clock.advance();
        match self.simulator.advance(target.point(), self.clock.tick_secs()) {
            Some(StepOutcome::Advanced(next)) => {
                let reported = self.simulator.reported(next);
                let position = ObserverPosition::new(reported, self.clock.current_unix_ms());
                log::debug!("{}: simulated observer at {}", self.clock, position.point);
                TickOutcome::Moved(self.process_position(&position, &target))
            }
            Some(StepOutcome::Arrived) => {
                self.complete_simulation();
                TickOutcome::Completed
            }
            None => TickOutcome::Inactive,
        }
    }

    /// Deliver a fix from the live sensor feed.
    ///
    /// Invalid coordinates are rejected before touching any state.  The fix
    /// is always remembered; it is only evaluated while a live session is
    /// active, in which case the evaluation is returned.
    pub fn on_position_update(&mut self, position: ObserverPosition) -> SessionResult<Option<Evaluation>> {
        if let Err(e) = position.point.validate() {
            log::warn!("rejected live fix: {e}");
            return Err(e.into());
        }
        self.last_live = Some(position);

        if self.status != SessionStatus::Active || self.mode != TrackingMode::Live {
            return Ok(None);
        }
        let Some(target) = self.target else {
            return Ok(None);
        };
        Ok(Some(self.process_position(&position, &target)))
    }

    // ── Subscriptions ─────────────────────────────────────────────────────

    /// Register a callback for every `Arrived` / `Departed` event.
    pub fn on_arrival_event<F>(&mut self, callback: F)
    where
        F: FnMut(&ArrivalNotice) + Send + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    pub fn add_observer<O: SessionObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    // ── Simulator controls ────────────────────────────────────────────────

    /// Move the simulated observer.  Only allowed while idle.
    pub fn set_simulated_start(&mut self, point: GeoPoint) -> SessionResult<()> {
        if self.status == SessionStatus::Active {
            return Err(SessionError::Active);
        }
        self.simulator.place(point)?;
        Ok(())
    }

    pub fn set_speed(&mut self, speed_mps: f64) -> SessionResult<f64> {
        Ok(self.simulator.set_speed(speed_mps)?)
    }

    pub fn increase_speed(&mut self) -> f64 {
        self.simulator.increase_speed()
    }

    pub fn decrease_speed(&mut self) -> f64 {
        self.simulator.decrease_speed()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Distance from the current observer position to the target, metres.
    ///
    /// `None` if there is no target or the active source has no position yet.
    pub fn current_distance(&self) -> Option<f64> {
        let target = self.target?;
        Some(target.distance_from(self.observer_point()?))
    }

    /// The observer's position according to the current mode's source.
    pub fn observer_point(&self) -> Option<GeoPoint> {
        match self.mode {
            TrackingMode::Simulated => self.simulator.position(),
            TrackingMode::Live      => self.last_live.map(|p| p.point),
        }
    }

    #[inline]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    #[inline]
    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    #[inline]
    pub fn target(&self) -> Option<Target> {
        self.target
    }

    #[inline]
    pub fn arrival_state(&self) -> ArrivalState {
        self.detector.state()
    }

    #[inline]
    pub fn simulation(&self) -> Option<&SimulationState> {
        self.simulator.state()
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.simulator.speed()
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Evaluate `position` and fan the result out.  Both drivers end here.
    fn process_position(&mut self, position: &ObserverPosition, target: &Target) -> Evaluation {
        let evaluation = self.detector.evaluate(position, target);
        for obs in &mut self.observers {
            obs.on_position(position, &evaluation);
        }

        if let Some(event) = evaluation.event {
            let notice = ArrivalNotice {
                event,
                distance_m: evaluation.distance_m,
                position:   *position,
                target:     *target,
            };
            if event == ArrivalEvent::Arrived {
                let n = Notification::arrival(evaluation.distance_m);
                self.notifier.notify(&n.title, &n.body);
            }
            for callback in &mut self.subscribers {
                callback(&notice);
            }
            for obs in &mut self.observers {
                obs.on_arrival_event(&notice);
            }
        }
        evaluation
    }

    fn complete_simulation(&mut self) {
        log::info!("simulated observer reached the target, stopping");
        if let Some(state) = self.simulator.state() {
            for obs in &mut self.observers {
                obs.on_simulation_complete(state);
            }
        }
        self.set_status(SessionStatus::Idle);
    }

    fn set_status(&mut self, to: SessionStatus) {
        let from = std::mem::replace(&mut self.status, to);
        if from != to {
            for obs in &mut self.observers {
                obs.on_status_change(from, to);
            }
        }
    }

    fn run_start_unix_ms(&self) -> i64 {
        self.config.schedule.start_unix_ms.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as i64)
                .unwrap_or_default()
        })
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("mode", &self.mode)
            .field("status", &self.status)
            .field("target", &self.target)
            .field("arrival_state", &self.detector.state())
            .field("observers", &self.observers.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
