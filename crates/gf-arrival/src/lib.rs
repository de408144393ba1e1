//! `gf-arrival` — turns a stream of observer positions into arrival and
//! departure events for one circular geofence.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`state`]    | `ArrivalState` (`Armed` / `Notified`)                     |
//! | [`event`]    | `ArrivalEvent`, `Evaluation`, `ArrivalNotice`             |
//! | [`config`]   | `DetectorConfig` — the departure hysteresis factor        |
//! | [`detector`] | `ArrivalDetector` — the evaluation step                   |
//!
//! # Hysteresis
//!
//! ```text
//!            Arrived (d <= r)
//!   Armed ─────────────────────▶ Notified
//!     ▲                             │
//!     └─────────────────────────────┘
//!          Departed (d > r × factor)
//! ```
//!
//! Entering uses the trigger radius `r`; leaving uses the wider band
//! `r × departure_factor` (1.5 by default).  A position that jitters around
//! `r` therefore produces one `Arrived`, not a burst of them.

pub mod config;
pub mod detector;
pub mod event;
pub mod state;


pub use config::DetectorConfig;
pub use detector::ArrivalDetector;
pub use event::{ArrivalEvent, ArrivalNotice, Evaluation};
pub use state::ArrivalState;
