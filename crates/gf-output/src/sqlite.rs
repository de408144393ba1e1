//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `track.db` file in the configured output directory with
//! two tables: `track` and `events`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::TrackWriter;
use crate::{EventRow, OutputResult, TrackRow};

/// Writes a session's track and events to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `track.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("track.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS track (
                 unix_ms    INTEGER NOT NULL,
                 lat        REAL    NOT NULL,
                 lon        REAL    NOT NULL,
                 distance_m REAL    NOT NULL,
                 state      TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS events (
                 unix_ms    INTEGER NOT NULL,
                 event      TEXT    NOT NULL,
                 distance_m REAL    NOT NULL,
                 lat        REAL    NOT NULL,
                 lon        REAL    NOT NULL,
                 radius_m   REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl TrackWriter for SqliteWriter {
    fn write_fix(&mut self, row: &TrackRow) -> OutputResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO track (unix_ms, lat, lon, distance_m, state) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        stmt.execute(rusqlite::params![
            row.unix_ms,
            row.lat,
            row.lon,
            row.distance_m,
            row.state.as_str(),
        ])?;
        Ok(())
    }

    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO events (unix_ms, event, distance_m, lat, lon, radius_m) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.unix_ms,
                row.event.as_str(),
                row.distance_m,
                row.lat,
                row.lon,
                row.radius_m,
            ],
        )?;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        // Every insert autocommits.
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
