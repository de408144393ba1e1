//! Input-validation error type.
//!
//! Sub-crates define their own error enums and wrap `GeoError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised when values cross into the core from the outside world.
///
/// The geodesy functions themselves never fail; these errors exist so that
/// bad input is rejected before it can reach them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("trigger radius must be a positive finite number of metres, got {0}")]
    InvalidRadius(f64),

    #[error("speed must be a positive finite number of m/s, got {0}")]
    InvalidSpeed(f64),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for validation in all `gf-*` crates.
pub type GeoResult<T> = Result<T, GeoError>;
