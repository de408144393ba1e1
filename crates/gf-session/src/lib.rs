//! `gf-session` — the tracking session that ties a position source to the
//! arrival detector.
//!
//! # Lifecycle
//!
//! ```text
//!   Idle ──set_target──▶ Idle (target set) ──start(mode)──▶ Active
//!    ▲                                                         │
//!    └──────── stop() / simulated run reaches the target ──────┘
//! ```
//!
//! While `Active`:
//!
//! - **Simulated** — every scheduler tick calls [`Session::tick`], which
//!   advances the [`MotionSimulator`][gf_motion::MotionSimulator] and feeds
//!   the new position through the detector.  When the simulator comes within
//!   its arrival tolerance the session returns to `Idle` on its own.
//! - **Live** — every fix passed to [`Session::on_position_update`] goes
//!   straight to the detector.  The session stays `Active` until stopped.
//!
//! `Arrived` events are dispatched to the [`Notifier`] exactly once per
//! approach; both `Arrived` and `Departed` go to subscribers and observers.
//!
//! # Synchronous core, async drivers
//!
//! [`Session`] is plain single-owner state with no timer and no locking.
//! [`runtime::SessionHandle`] wraps it in `Arc<Mutex<_>>` and attaches the
//! two drivers: a cancellable 1 s `tokio` ticker for simulated runs and a
//! channel-fed task for live fixes.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gf_session::{SessionBuilder, SessionConfig, TrackingMode, LogNotifier};
//!
//! let mut session = SessionBuilder::new(SessionConfig::default())
//!     .notifier(LogNotifier)
//!     .build()?;
//! session.set_simulated_start(GeoPoint::new(0.0, 0.0))?;
//! session.set_target(GeoPoint::new(0.0, 0.0045), 100.0)?;
//! session.start(TrackingMode::Simulated)?;
//! while session.tick().is_moving() {}
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod notify;
pub mod observer;
pub mod runtime;
pub mod schedule;
pub mod session;

#[cfg(test)]
mod tests;

pub use builder::SessionBuilder;
pub use config::{ScheduleConfig, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use notify::{ChannelNotifier, LogNotifier, Notification, Notifier};
pub use observer::{NoopObserver, SessionObserver};
pub use runtime::SessionHandle;
pub use schedule::{CancelHandle, every};
pub use session::{Session, SessionStatus, TickOutcome, TrackingMode};
