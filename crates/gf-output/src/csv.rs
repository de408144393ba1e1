//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `track.csv`
//! - `events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TrackWriter;
use crate::{EventRow, OutputResult, TrackRow};

pub const TRACK_HEADER: [&str; 5] = ["unix_ms", "lat", "lon", "distance_m", "state"];
pub const EVENT_HEADER: [&str; 6] = ["unix_ms", "event", "distance_m", "lat", "lon", "radius_m"];

/// Writes a session's track and events to two CSV files.
pub struct CsvWriter {
    track:    Writer<File>,
    events:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut track = Writer::from_path(dir.join("track.csv"))?;
        track.write_record(TRACK_HEADER)?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(EVENT_HEADER)?;

        Ok(Self { track, events, finished: false })
    }
}

impl TrackWriter for CsvWriter {
    fn write_fix(&mut self, row: &TrackRow) -> OutputResult<()> {
        self.track.write_record(&[
            row.unix_ms.to_string(),
            format!("{:.7}", row.lat),
            format!("{:.7}", row.lon),
            format!("{:.2}", row.distance_m),
            row.state.as_str().to_owned(),
        ])?;
        Ok(())
    }

    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.unix_ms.to_string(),
            row.event.as_str().to_owned(),
            format!("{:.2}", row.distance_m),
            format!("{:.7}", row.lat),
            format!("{:.7}", row.lon),
            row.radius_m.to_string(),
        ])?;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.track.flush()?;
        self.events.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.flush()
    }
}
