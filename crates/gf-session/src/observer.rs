//! Session observer trait for UI updates and data collection.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gf_arrival::{ArrivalNotice, Evaluation};
use gf_core::ObserverPosition;
use gf_motion::SimulationState;

use crate::SessionStatus;

/// Callbacks invoked by [`Session`][crate::Session] as positions flow
/// through it.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers run synchronously inside the
/// session's evaluation step, so they must not block.
///
/// # Example — distance printer
///
/// ```rust,ignore
/// struct DistancePrinter;
///
/// impl SessionObserver for DistancePrinter {
///     fn on_position(&mut self, pos: &ObserverPosition, eval: &Evaluation) {
///         println!("{}: {:.0} m", pos.point, eval.distance_m);
///     }
/// }
/// ```
pub trait SessionObserver: Send {
    /// Called after every position has been evaluated, live or simulated.
    fn on_position(&mut self, _position: &ObserverPosition, _evaluation: &Evaluation) {}

    /// Called for every `Arrived` and `Departed` transition.
    fn on_arrival_event(&mut self, _notice: &ArrivalNotice) {}

    /// Called whenever the session moves between `Idle` and `Active`.
    fn on_status_change(&mut self, _from: SessionStatus, _to: SessionStatus) {}

    /// Called once when a simulated run reaches the target and stops itself.
    fn on_simulation_complete(&mut self, _state: &SimulationState) {}
}

/// A [`SessionObserver`] that does nothing.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}

/// A shared observer.  Hand a clone to the session and keep the other to
/// reach the observer (e.g. to collect write errors) after the run.
impl<O: SessionObserver> SessionObserver for Arc<Mutex<O>> {
    fn on_position(&mut self, position: &ObserverPosition, evaluation: &Evaluation) {
        locked(self).on_position(position, evaluation);
    }

    fn on_arrival_event(&mut self, notice: &ArrivalNotice) {
        locked(self).on_arrival_event(notice);
    }

    fn on_status_change(&mut self, from: SessionStatus, to: SessionStatus) {
        locked(self).on_status_change(from, to);
    }

    fn on_simulation_complete(&mut self, state: &SimulationState) {
        locked(self).on_simulation_complete(state);
    }
}

fn locked<O>(shared: &Mutex<O>) -> MutexGuard<'_, O> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
