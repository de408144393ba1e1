//! `MotionSimulator` — owns the synthetic observer and applies [`step`].

use gf_core::{GeoError, GeoPoint, GeoResult};

use crate::{MotionConfig, PositionNoise, SimulationState, StepOutcome, step};

/// Drives one synthetic observer towards a target, one tick at a time.
///
/// The observer must be [`place`][Self::place]d before a run can
/// [`start`][Self::start].  After a run completes the observer stays where it
/// ended, so the next run continues from there.
#[derive(Debug)]
pub struct MotionSimulator {
    config:    MotionConfig,
    speed_mps: f64,
    state:     Option<SimulationState>,
    noise:     PositionNoise,
}

impl MotionSimulator {
    /// Validate `config` and build an unplaced simulator.
    pub fn new(config: MotionConfig) -> GeoResult<Self> {
        config.validate()?;
        Ok(Self {
            speed_mps: config.speed_mps,
            noise:     PositionNoise::new(config.seed, config.noise_m),
            state:     None,
            config,
        })
    }

    // ── Placement and lifecycle ───────────────────────────────────────────

    /// Put the observer at `origin`, discarding any previous path.
    pub fn place(&mut self, origin: GeoPoint) -> GeoResult<()> {
        origin.validate()?;
        self.state = Some(SimulationState::parked(origin, self.speed_mps));
        Ok(())
    }

    /// Begin a run from the current position.
    ///
    /// Returns the starting point, or `None` if the observer was never placed.
    pub fn start(&mut self) -> Option<GeoPoint> {
        let speed = self.speed_mps;
        let state = self.state.as_mut()?;
        state.path.clear();
        state.path.push(state.current_position);
        state.speed_mps = speed;
        state.running = true;
        log::debug!("simulation started at {} ({speed} m/s)", state.current_position);
        Some(state.current_position)
    }

    /// Advance one tick towards `target`.
    ///
    /// Returns `None` when no run is in progress.  On
    /// [`StepOutcome::Arrived`] the run ends and the path is kept so it can
    /// still be displayed.
    pub fn advance(&mut self, target: GeoPoint, tick_secs: f64) -> Option<StepOutcome> {
        let tolerance = self.config.arrival_tolerance_m;
        let state = self.state.as_mut().filter(|s| s.running)?;

        let outcome = step(state.current_position, target, state.speed_mps, tick_secs, tolerance);
        match outcome {
            StepOutcome::Advanced(next) => {
                state.current_position = next;
                state.path.push(next);
            }
            StepOutcome::Arrived => {
                state.running = false;
                log::info!(
                    "simulation reached target after {} points ({:.0} m)",
                    state.path.len(),
                    state.travelled_m()
                );
            }
        }
        Some(outcome)
    }

    /// Abort the run and clear the path.  The observer stays where it is.
    pub fn stop(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.running = false;
            state.path.clear();
        }
    }

    // ── Reporting ─────────────────────────────────────────────────────────

    /// The position as a sensor would report it (true position plus noise).
    pub fn reported(&mut self, p: GeoPoint) -> GeoPoint {
        self.noise.apply(p)
    }

    #[inline]
    pub fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    #[inline]
    pub fn position(&self) -> Option<GeoPoint> {
        self.state.as_ref().map(|s| s.current_position)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.running)
    }

    #[inline]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    // ── Speed ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed_mps
    }

    /// Set the speed, clamped to the configured limits.  Takes effect on the
    /// next tick, including mid-run.
    pub fn set_speed(&mut self, speed_mps: f64) -> GeoResult<f64> {
        if !speed_mps.is_finite() {
            return Err(GeoError::InvalidSpeed(speed_mps));
        }
        self.speed_mps = self.config.clamp_speed(speed_mps);
        if let Some(state) = self.state.as_mut() {
            state.speed_mps = self.speed_mps;
        }
        Ok(self.speed_mps)
    }

    pub fn increase_speed(&mut self) -> f64 {
        let v = self.config.clamp_speed(self.speed_mps + self.config.speed_step_mps);
        self.set_speed(v).unwrap_or(self.speed_mps)
    }

    pub fn decrease_speed(&mut self) -> f64 {
        let v = self.config.clamp_speed(self.speed_mps - self.config.speed_step_mps);
        self.set_speed(v).unwrap_or(self.speed_mps)
    }
}
