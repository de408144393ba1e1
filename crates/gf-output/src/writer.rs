//! The `TrackWriter` trait implemented by all backend writers.

use crate::{EventRow, OutputResult, TrackRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are stored by the observer and retrieved with
/// [`TrackObserver::take_error`][crate::TrackObserver::take_error].
pub trait TrackWriter {
    /// Write one evaluated fix.
    fn write_fix(&mut self, row: &TrackRow) -> OutputResult<()>;

    /// Write one arrival or departure.
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Push buffered rows to disk.  Called whenever a session goes idle.
    fn flush(&mut self) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
