//! `TrackObserver<W>` — bridges `SessionObserver` to a `TrackWriter`.

use gf_arrival::{ArrivalEvent, ArrivalNotice, ArrivalState, Evaluation};
use gf_core::ObserverPosition;
use gf_session::{SessionObserver, SessionStatus};

use crate::row::{EventRow, TrackRow};
use crate::writer::TrackWriter;
use crate::{OutputError, OutputResult};

/// A [`SessionObserver`] that records every evaluated fix and every arrival
/// event to any [`TrackWriter`] backend.
///
/// Errors from the writer are stored internally because observer hooks have
/// no return value; only the first one is kept.  Rows are flushed each time
/// the session goes idle.
///
/// To get at the error after a run, share the observer with the session:
///
/// ```rust,ignore
/// let track = Arc::new(Mutex::new(TrackObserver::new(writer)));
/// let session = SessionBuilder::new(config).observer(Arc::clone(&track)).build()?;
/// // ... run ...
/// track.lock().unwrap().finish()?;
/// ```
pub struct TrackObserver<W: TrackWriter> {
    writer:     W,
    state:      ArrivalState,
    last_error: Option<OutputError>,
}

impl<W: TrackWriter> TrackObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, state: ArrivalState::Armed, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Finish the writer, reporting the first stored write error ahead of
    /// anything `finish` itself hits.
    ///
    /// For an observer shared with a session through `Arc<Mutex<_>>`, call
    /// this once the session has stopped.
    pub fn finish(&mut self) -> OutputResult<()> {
        let finished = self.writer.finish();
        match self.last_error.take() {
            Some(e) => Err(e),
            None => finished,
        }
    }

    /// Unwrap the inner writer (e.g. to inspect the files).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            log::warn!("track output: {e}");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TrackWriter + Send> SessionObserver for TrackObserver<W> {
    fn on_position(&mut self, position: &ObserverPosition, evaluation: &Evaluation) {
        // Position hooks run before event hooks, so track the edge here.
        match evaluation.event {
            Some(ArrivalEvent::Arrived)  => self.state = ArrivalState::Notified,
            Some(ArrivalEvent::Departed) => self.state = ArrivalState::Armed,
            None => {}
        }
        let row = TrackRow::new(position, evaluation.distance_m, self.state);
        let result = self.writer.write_fix(&row);
        self.store_err(result);
    }

    fn on_arrival_event(&mut self, notice: &ArrivalNotice) {
        let result = self.writer.write_event(&EventRow::from(notice));
        self.store_err(result);
    }

    fn on_status_change(&mut self, _from: SessionStatus, to: SessionStatus) {
        // Every start and stop re-arms the detector.
        self.state = ArrivalState::Armed;
        if to == SessionStatus::Idle {
            let result = self.writer.flush();
            self.store_err(result);
        }
    }
}
