//! `gf-output` — track and event recorders for geofence sessions.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                |
//! |-----------|---------|------------------------------|
//! | *(none)*  | CSV     | `track.csv`, `events.csv`    |
//! | `sqlite`  | SQLite  | `track.db`                   |
//!
//! Both implement [`TrackWriter`] and are driven by [`TrackObserver`], which
//! implements `gf_session::SessionObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gf_output::{CsvWriter, TrackObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let session = SessionBuilder::new(config)
//!     .observer(TrackObserver::new(writer))
//!     .build()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TrackObserver;
pub use row::{EventRow, TrackRow};
pub use writer::TrackWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
