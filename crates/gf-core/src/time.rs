//! Simulation time model.
//!
//! Simulated time is a monotonically increasing `Tick` counter.  `SimClock`
//! maps it onto wall-clock milliseconds:
//!
//!   unix_ms = start_unix_ms + tick * tick_duration_ms
//!
//! Keeping the canonical unit an integer tick means simulated timestamps are
//! exact and reproducible regardless of how fast the real ticker fires.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Ticks elapsed from `earlier` to `self` (saturating).
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and Unix wall-clock milliseconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (ms since epoch) of tick 0.
    pub start_unix_ms: i64,
    /// How many real milliseconds one tick represents.  Default: 1000.
    pub tick_duration_ms: u64,
    /// The current tick — advanced by `SimClock::advance()` each step.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start_unix_ms: i64, tick_duration_ms: u64) -> Self {
        Self {
            start_unix_ms,
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    /// Rewind to tick 0, keeping the start time and resolution.
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
    }

    /// Elapsed simulated milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> i64 {
        let ticks = i64::try_from(self.current_tick.0).unwrap_or(i64::MAX);
        let step = i64::try_from(self.tick_duration_ms).unwrap_or(i64::MAX);
        ticks.saturating_mul(step)
    }

    /// Current Unix timestamp (ms) corresponding to `current_tick`.
    #[inline]
    pub fn current_unix_ms(&self) -> i64 {
        self.start_unix_ms.saturating_add(self.elapsed_ms())
    }

    /// Length of one tick in seconds, for speed × time arithmetic.
    #[inline]
    pub fn tick_secs(&self) -> f64 {
        self.tick_duration_ms as f64 / 1_000.0
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed_ms().max(0) / 1_000;
        write!(f, "{} (+{}m{:02}s)", self.current_tick, secs / 60, secs % 60)
    }
}
