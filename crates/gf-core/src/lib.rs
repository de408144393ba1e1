//! `gf-core` — foundational types for the geofence arrival detector.
//!
//! This crate is a dependency of every other `gf-*` crate.  It has no `gf-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`geo`]         | `GeoPoint`, haversine distance, bearing, destination     |
//! | [`position`]    | `ObserverPosition`, `Target`                             |
//! | [`time`]        | `Tick`, `SimClock`                                       |
//! | [`error`]       | `GeoError`, `GeoResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod position;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{GeoError, GeoResult};
pub use geo::{EARTH_RADIUS_M, GeoPoint, bearing, destination, distance};
pub use position::{ObserverPosition, Target};
pub use time::{SimClock, Tick};
