//! `SessionHandle` — a shareable session with its async drivers attached.
//!
//! # Concurrency model
//!
//! The session is wrapped in `Arc<Mutex<_>>`.  Every mutation, whether it
//! comes from the caller, the simulation ticker, or the live feed task, takes
//! the lock, so `evaluate` and `step` never run concurrently.
//!
//! Each simulated run gets a `run_id`.  The ticker callback re-checks its id
//! under the lock before touching the session, and `stop()` bumps the id
//! under the same lock.  Once `stop()` returns no queued tick can mutate the
//! session, even one that was already waiting on the lock.
//!
//! The ticker holds only a `Weak` reference, so dropping every handle ends
//! it.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use gf_arrival::{ArrivalNotice, Evaluation};
use gf_core::{GeoPoint, ObserverPosition};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use crate::{CancelHandle, Session, SessionResult, TrackingMode, every};

/// Capacity of the arrival event broadcast channel.  Slow subscribers that
/// fall further behind than this miss the oldest events.
const EVENT_CAPACITY: usize = 64;

struct Shared {
    session: Session,
    run_id:  u64,
    ticker:  Option<CancelHandle>,
}

impl Shared {
    /// Invalidate the current run's ticker.  Must be called with the lock held.
    fn cancel_ticker(&mut self) {
        self.run_id += 1;
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    // A panic inside an observer must not wedge the session forever.
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cloneable, thread-safe handle to a [`Session`].
#[derive(Clone)]
pub struct SessionHandle {
    shared:      Arc<Mutex<Shared>>,
    events:      broadcast::Sender<ArrivalNotice>,
    tick_period: Duration,
}

impl SessionHandle {
    /// Take ownership of `session` and start forwarding its arrival events to
    /// the broadcast channel behind [`subscribe`][Self::subscribe].
    pub fn new(mut session: Session) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let tx = events.clone();
        session.on_arrival_event(move |notice| {
            // No receivers is fine.
            let _ = tx.send(*notice);
        });

        let tick_period = Duration::from_millis(session.config().schedule.tick_period_ms);
        Self {
            shared: Arc::new(Mutex::new(Shared { session, run_id: 0, ticker: None })),
            events,
            tick_period,
        }
    }

    // ── Control ───────────────────────────────────────────────────────────

    pub fn set_target(&self, point: GeoPoint, radius_m: f64) -> SessionResult<()> {
        lock(&self.shared).session.set_target(point, radius_m)
    }

    /// Start tracking.  In simulated mode this spawns the ticker, so it must
    /// be called from within a `tokio` runtime.
    pub fn start(&self, mode: TrackingMode) -> SessionResult<()> {
        let mut shared = lock(&self.shared);
        shared.cancel_ticker();
        shared.session.start(mode)?;

        if mode == TrackingMode::Simulated {
            let run_id = shared.run_id;
            let weak = Arc::downgrade(&self.shared);
            shared.ticker = Some(every(self.tick_period, move || tick_run(&weak, run_id)));
        }
        Ok(())
    }

    /// Stop tracking.  No simulation tick mutates the session after this
    /// returns.
    pub fn stop(&self) {
        let mut shared = lock(&self.shared);
        shared.cancel_ticker();
        shared.session.stop();
    }

    /// Switch position source, stopping any active run first.
    pub fn set_mode(&self, mode: TrackingMode) {
        let mut shared = lock(&self.shared);
        if shared.session.mode() != mode {
            shared.cancel_ticker();
        }
        shared.session.set_mode(mode);
    }

    // ── Live feed ─────────────────────────────────────────────────────────

    /// Deliver one live fix synchronously.
    pub fn on_position_update(&self, position: ObserverPosition) -> SessionResult<Option<Evaluation>> {
        lock(&self.shared).session.on_position_update(position)
    }

    /// Drain `feed` on a background task, delivering each fix to the session.
    ///
    /// Runs until the sender side closes or the returned handle is cancelled.
    /// Invalid fixes are logged and skipped.
    pub fn attach_feed(&self, mut feed: mpsc::Receiver<ObserverPosition>) -> CancelHandle {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let weak = Arc::downgrade(&self.shared);

        let task = tokio::spawn(async move {
            loop {
                let position = tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    next = feed.recv() => match next {
                        Some(p) => p,
                        None => break,
                    },
                };
                let Some(shared) = weak.upgrade() else { break };
                if let Err(e) = lock(&shared).session.on_position_update(position) {
                    log::warn!("live feed: {e}");
                }
            }
            log::debug!("live feed detached");
        });

        CancelHandle::new(token, task)
    }

    // ── Events and queries ────────────────────────────────────────────────

    /// Register a callback for every `Arrived` / `Departed` event.
    ///
    /// The callback runs with the session lock held and must not call back
    /// into this handle.
    pub fn on_arrival_event<F>(&self, callback: F)
    where
        F: FnMut(&ArrivalNotice) + Send + 'static,
    {
        lock(&self.shared).session.on_arrival_event(callback);
    }

    /// A receiver for arrival events, for background jobs running on their
    /// own task.
    pub fn subscribe(&self) -> broadcast::Receiver<ArrivalNotice> {
        self.events.subscribe()
    }

    pub fn current_distance(&self) -> Option<f64> {
        lock(&self.shared).session.current_distance()
    }

    /// Run `f` with exclusive access to the session.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut lock(&self.shared).session)
    }

    /// `true` while a simulation ticker is running.
    pub fn ticker_running(&self) -> bool {
        lock(&self.shared).ticker.as_ref().is_some_and(|t| !t.is_finished())
    }
}

/// One ticker callback for run `run_id`.
fn tick_run(weak: &Weak<Mutex<Shared>>, run_id: u64) -> ControlFlow<()> {
    let Some(shared) = weak.upgrade() else {
        return ControlFlow::Break(());
    };
    let mut shared = lock(&shared);
    if shared.run_id != run_id {
        return ControlFlow::Break(());
    }
    if shared.session.tick().is_moving() {
        ControlFlow::Continue(())
    } else {
        ControlFlow::Break(())
    }
}
