//! `gf-motion` — synthetic observer movement towards a target.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`step`]      | `step()` — the pure per-tick advance, `StepOutcome`          |
//! | [`state`]     | `SimulationState` — current point, path, speed, running flag |
//! | [`config`]    | `MotionConfig` — speed limits, arrival tolerance, noise      |
//! | [`noise`]     | `PositionNoise` — seeded GPS-like jitter                     |
//! | [`simulator`] | `MotionSimulator` — owns the state and applies `step`        |
//!
//! # Movement model
//!
//! Each tick the observer moves `speed × tick` metres along the initial
//! great-circle bearing to the target, never past it.  Once it is within
//! `arrival_tolerance_m` (5 m by default) the step reports
//! [`StepOutcome::Arrived`] instead of moving, and the simulation is over.
//!
//! The simulator holds no timer.  Whoever owns it (the tracking session)
//! decides when a tick happens.

pub mod config;
pub mod noise;
pub mod simulator;
pub mod state;
pub mod step;


pub use config::MotionConfig;
pub use noise::PositionNoise;
pub use simulator::MotionSimulator;
pub use state::SimulationState;
pub use step::{StepOutcome, step};
